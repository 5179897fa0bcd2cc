// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transform collaborators wrapped for pipeline use.
//!
//! ```text
//! Pipelines --> transform
//!   concat   join sources with ";\n", track line offsets
//!   sass     grass, two output densities, include paths
//!   css      lightningcss, vendor prefixes + printing
//!   js       minify-js
//!   maps     sourcemap builders + URL footers
//! ```
//!
//! Nothing in here understands units or batches; every function maps plain
//! inputs to plain outputs and a domain error.

pub mod concat;
pub mod css;
pub mod js;
pub mod maps;
pub mod sass;


/// Inserts a `.min` marker before the file extension.
///
/// `app.js` becomes `app.min.js`; a name without an extension gets a plain
/// `.min` suffix.
#[must_use]
pub fn with_min_suffix(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}.min{}", &name[..dot], &name[dot..]),
        _ => format!("{name}.min"),
    }
}
