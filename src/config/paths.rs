// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! project_root/            (default ".")
//!   public/                (document_root)
//!     assets/              (asset_dir)
//!     css/                 (css_dir)
//!     js/                  (scripts_dir)
//!   node_modules/          (node_modules)
//! ```
//!
//! All paths are optional and resolved from `project_root` / `document_root`
//! if not set; relative overrides resolve against their parent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project and output directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the project; every other path resolves relative to this.
    pub project_root: PathBuf,
    /// Web document root (default: `project_root/public`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_root: Option<PathBuf>,
    /// Destination for copied static assets (default: `document_root/assets`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_dir: Option<PathBuf>,
    /// Third-party package directory (default: `project_root/node_modules`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_modules: Option<PathBuf>,
    /// Compiled stylesheet output directory (default: `document_root/css`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_dir: Option<PathBuf>,
    /// Compiled script output directory (default: `document_root/js`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            document_root: None,
            asset_dir: None,
            node_modules: None,
            css_dir: None,
            scripts_dir: None,
        }
    }
}

impl PathsConfig {
    /// Resolve all relative paths and fill in defaults.
    ///
    /// After this call every optional field is `Some`; the accessor methods
    /// then return the effective values without recomputing them.
    pub fn resolve(&mut self) {
        let root = self.project_root.clone();

        let resolve = |path: &mut Option<PathBuf>, parent: &Path, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(parent.join(p.clone()));
            }
            None => {
                *path = Some(parent.join(default));
            }
            _ => {}
        };

        resolve(&mut self.document_root, &root, "public");
        resolve(&mut self.node_modules, &root, "node_modules");

        let document_root = self
            .document_root
            .clone()
            .unwrap_or_else(|| root.join("public"));

        resolve(&mut self.asset_dir, &document_root, "assets");
        resolve(&mut self.css_dir, &document_root, "css");
        resolve(&mut self.scripts_dir, &document_root, "js");
    }

    /// The effective document root.
    #[must_use]
    pub fn document_root(&self) -> PathBuf {
        self.document_root
            .clone()
            .unwrap_or_else(|| self.project_root.join("public"))
    }

    /// The effective static-asset destination directory.
    #[must_use]
    pub fn asset_dir(&self) -> PathBuf {
        self.asset_dir
            .clone()
            .unwrap_or_else(|| self.document_root().join("assets"))
    }

    /// The effective third-party package directory.
    #[must_use]
    pub fn node_modules(&self) -> PathBuf {
        self.node_modules
            .clone()
            .unwrap_or_else(|| self.project_root.join("node_modules"))
    }

    /// The effective stylesheet output directory.
    #[must_use]
    pub fn css_dir(&self) -> PathBuf {
        self.css_dir
            .clone()
            .unwrap_or_else(|| self.document_root().join("css"))
    }

    /// The effective script output directory.
    #[must_use]
    pub fn scripts_dir(&self) -> PathBuf {
        self.scripts_dir
            .clone()
            .unwrap_or_else(|| self.document_root().join("js"))
    }
}
