// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for assetpipe.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. assetpipe.toml (cwd)
//! 3. --config FILE (repeatable)
//! 4. ASSETPIPE_* env vars
//! 5. --set KEY=VALUE overrides
//! ```
//!
//! # Normalization
//!
//! Loading ends with [`Config::resolve_and_validate`], which performs the
//! one-time, irreversible normalization pass:
//!
//! ```text
//! paths     --> defaults filled, relative paths anchored at project_root
//! assets    --> shorthand forms parsed into canonical AssetSpecs
//! bundles   --> partitioned by `type` into scripts / styles,
//!               per-unit defaults resolved, invalid units dropped (warned)
//! ```
//!
//! The partition deep-copies declarations; the resolved collections share
//! nothing with the raw `bundles` map, and nothing mutates them afterwards.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{Aliases, AssetDecl, AssetSpec, BundleDecl, GlobalConfig, ScriptUnit, StyleUnit, UnitKind};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Project and output paths.
    pub paths: PathsConfig,
    /// Ordered search paths for stylesheet preprocessing.
    pub include_paths: Vec<PathBuf>,
    /// Raw static-asset declarations (shorthand forms allowed).
    pub assets: Vec<AssetDecl>,
    /// Raw bundle declarations, keyed by unit key.
    pub bundles: BTreeMap<String, BundleDecl>,
    /// Task aliases.
    pub aliases: Aliases,

    /// Script units, partitioned and resolved from `bundles`.
    #[serde(skip)]
    scripts: BTreeMap<String, ScriptUnit>,
    /// Style units, partitioned and resolved from `bundles`.
    #[serde(skip)]
    styles: BTreeMap<String, StyleUnit>,
    /// Canonical asset specs, normalized from `assets`.
    #[serde(skip)]
    asset_specs: Vec<AssetSpec>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use assetpipe::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("assetpipe.toml")
    ///     .add_toml_file_optional("assetpipe.local.toml")
    ///     .with_env_prefix("ASSETPIPE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolved script units.
    #[must_use]
    pub const fn scripts(&self) -> &BTreeMap<String, ScriptUnit> {
        &self.scripts
    }

    /// Resolved style units.
    #[must_use]
    pub const fn styles(&self) -> &BTreeMap<String, StyleUnit> {
        &self.styles
    }

    /// Canonical asset copy specifications.
    #[must_use]
    pub fn asset_specs(&self) -> &[AssetSpec] {
        &self.asset_specs
    }

    /// Effective stylesheet include paths (anchored at the project root).
    #[must_use]
    pub fn include_paths(&self) -> Vec<PathBuf> {
        self.include_paths
            .iter()
            .map(|p| {
                if p.is_relative() {
                    self.paths.project_root.join(p)
                } else {
                    p.clone()
                }
            })
            .collect()
    }

    /// Resolve paths, normalize assets and partition bundles.
    ///
    /// This is the normalization pass described in the module docs. It runs
    /// exactly once, from [`ConfigLoader::build`]; repeated calls are
    /// idempotent but pointless.
    pub fn resolve_and_validate(&mut self) {
        self.paths.resolve();

        let default_dest = self.paths.asset_dir();
        self.asset_specs = self
            .assets
            .iter()
            .filter_map(|decl| {
                let spec = decl.normalize(&default_dest);
                if spec.is_none() {
                    tracing::warn!(?decl, "Skipping asset declaration without a source");
                }
                spec
            })
            .collect();

        self.scripts.clear();
        self.styles.clear();
        for (key, decl) in &self.bundles {
            match decl.kind {
                None => {
                    tracing::warn!(
                        key = %key,
                        "Dropping bundle without a `type` discriminator"
                    );
                }
                Some(UnitKind::Script) => match decl.resolve_script(&self.paths) {
                    Some(unit) => {
                        self.scripts.insert(key.clone(), unit);
                    }
                    None => {
                        tracing::warn!(
                            key = %key,
                            "Dropping invalid script bundle (requires non-empty `name` and `files`)"
                        );
                    }
                },
                Some(UnitKind::Style) => match decl.resolve_style(&self.paths) {
                    Some(unit) => {
                        self.styles.insert(key.clone(), unit);
                    }
                    None => {
                        tracing::warn!(
                            key = %key,
                            "Dropping invalid style bundle (requires non-empty `files`)"
                        );
                    }
                },
            }
        }
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration
    /// options. Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_unit_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.project_root".into(),
            self.paths.project_root.display().to_string(),
        );
        options.insert(
            "paths.document_root".into(),
            self.paths.document_root().display().to_string(),
        );
        options.insert(
            "paths.asset_dir".into(),
            self.paths.asset_dir().display().to_string(),
        );
        options.insert(
            "paths.node_modules".into(),
            self.paths.node_modules().display().to_string(),
        );
        options.insert(
            "paths.css_dir".into(),
            self.paths.css_dir().display().to_string(),
        );
        options.insert(
            "paths.scripts_dir".into(),
            self.paths.scripts_dir().display().to_string(),
        );
        for (i, path) in self.include_paths.iter().enumerate() {
            options.insert(format!("include_paths.{i}"), path.display().to_string());
        }
    }

    fn format_unit_options(&self, options: &mut BTreeMap<String, String>) {
        for (key, unit) in &self.scripts {
            options.insert(format!("scripts.{key}.name"), unit.name.clone());
            options.insert(
                format!("scripts.{key}.output_path"),
                unit.output_path.display().to_string(),
            );
            options.insert(format!("scripts.{key}.minify"), unit.minify.to_string());
            options.insert(format!("scripts.{key}.watch"), unit.watch.to_string());
        }
        for (key, unit) in &self.styles {
            options.insert(
                format!("styles.{key}.output_path"),
                unit.output_path.display().to_string(),
            );
            options.insert(format!("styles.{key}.minify"), unit.minify.to_string());
            options.insert(
                format!("styles.{key}.watch"),
                unit.watch.is_enabled().to_string(),
            );
        }
        for (i, spec) in self.asset_specs.iter().enumerate() {
            options.insert(format!("assets.{i}.source"), spec.source.clone());
            options.insert(
                format!("assets.{i}.dest"),
                spec.dest.display().to_string(),
            );
        }
    }
}
