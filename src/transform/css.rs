// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! CSS post-processing via `lightningcss`.
//!
//! Deployment builds run every compiled stylesheet through here to pick up
//! vendor prefixes for the supported browser matrix; printing density
//! follows the preprocessor's.

use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::error::PipelineError;

/// Encodes a browser version the way `lightningcss` expects
/// (`major << 16 | minor << 8 | patch`).
const fn version(major: u32, minor: u32) -> Option<u32> {
    Some(major << 16 | minor << 8)
}

/// The browser matrix vendor prefixes are generated for.
#[must_use]
pub fn browser_targets() -> Targets {
    Targets::from(Browsers {
        chrome: version(90, 0),
        edge: version(90, 0),
        firefox: version(88, 0),
        safari: version(13, 1),
        ios_saf: version(13, 4),
        ..Browsers::default()
    })
}

/// Vendor-prefixes and re-prints a compiled stylesheet.
///
/// `minify` selects the printing density and should match the density the
/// preprocessor was run with.
///
/// # Errors
///
/// Returns a [`PipelineError::Prefix`] if the stylesheet fails to parse or
/// print.
pub fn prefix_stylesheet(file: &Path, css: &str, minify: bool) -> Result<String, PipelineError> {
    let prefix_error = |message: String| PipelineError::Prefix {
        file: file.to_path_buf(),
        message,
    };

    let targets = browser_targets();

    let mut sheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: file.display().to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| prefix_error(e.to_string()))?;

    sheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| prefix_error(e.to_string()))?;

    let output = sheet
        .to_css(PrinterOptions {
            minify,
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| prefix_error(e.to_string()))?;

    Ok(output.code)
}
