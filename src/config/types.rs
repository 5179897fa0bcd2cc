// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for assetpipe.
//!
//! # Declared vs. resolved units
//!
//! ```text
//! [bundles.<key>]  --> BundleDecl (raw, serde)
//!        |
//!        | partition + resolve (once, at load time)
//!        v
//! ScriptUnit / StyleUnit (owned, defaults filled in)
//! ```
//!
//! Raw declarations stay untouched after loading; everything downstream of
//! the normalizer reads the resolved collections only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;

use super::paths::PathsConfig;

/// Task aliases mapping alias names to task-name lists.
pub type Aliases = BTreeMap<String, Vec<String>>;

/// Kind discriminator carried by every declared bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Script,
    Style,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script => write!(f, "script"),
            Self::Style => write!(f, "style"),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stdout output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("assetpipe.log"),
        }
    }
}

/// Raw `watch` field of a bundle declaration.
///
/// Styles accept either a plain toggle or a list of extra patterns to watch
/// in addition to the unit's own sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WatchDecl {
    /// `watch = true` / `watch = false`
    Toggle(bool),
    /// `watch = ["scss/lib/**/*.scss"]`
    Extra(Vec<String>),
}

/// A single `[bundles.<key>]` declaration, before partitioning.
///
/// Validity is not enforced here; the partition step drops declarations
/// that are unusable for their kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleDecl {
    /// Kind discriminator (`type = "script"` / `type = "style"`).
    /// Declarations without one belong to neither collection and are
    /// dropped at partition time.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<UnitKind>,
    /// Output artifact name; required for script units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source glob patterns, relative to the project root.
    #[serde(default)]
    pub files: Vec<String>,
    /// Output directory; defaults to the kind's configured directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Whether deployment builds minify this unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    /// Watch toggle (scripts) or toggle/extra-pattern list (styles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchDecl>,
}

impl BundleDecl {
    /// Resolves this declaration into a script unit.
    ///
    /// Returns `None` when the declaration is invalid for the script kind:
    /// missing or empty `name`, or no source patterns.
    #[must_use]
    pub fn resolve_script(&self, paths: &PathsConfig) -> Option<ScriptUnit> {
        let name = self.name.as_deref()?.trim();
        if name.is_empty() || self.files.is_empty() {
            return None;
        }

        let watch = match &self.watch {
            Some(WatchDecl::Toggle(enabled)) => *enabled,
            // Extra-pattern lists are a style-unit form; a non-empty list
            // still reads as "watching requested".
            Some(WatchDecl::Extra(extra)) => !extra.is_empty(),
            None => true,
        };

        Some(ScriptUnit {
            name: name.to_string(),
            files: self.files.clone(),
            output_path: self
                .output_path
                .clone()
                .unwrap_or_else(|| paths.scripts_dir()),
            minify: self.minify.unwrap_or(true),
            watch,
        })
    }

    /// Resolves this declaration into a style unit.
    ///
    /// Returns `None` when the declaration has no source patterns.
    #[must_use]
    pub fn resolve_style(&self, paths: &PathsConfig) -> Option<StyleUnit> {
        if self.files.is_empty() {
            return None;
        }

        let watch = match &self.watch {
            Some(WatchDecl::Toggle(true)) => WatchSetting::Enabled(Vec::new()),
            Some(WatchDecl::Toggle(false)) | None => WatchSetting::Disabled,
            Some(WatchDecl::Extra(extra)) => WatchSetting::Enabled(extra.clone()),
        };

        Some(StyleUnit {
            files: self.files.clone(),
            output_path: self.output_path.clone().unwrap_or_else(|| paths.css_dir()),
            minify: self.minify.unwrap_or(true),
            watch,
        })
    }
}

/// A script bundle with all defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptUnit {
    /// Output artifact name (e.g. `app.js`).
    pub name: String,
    /// Source glob patterns, concatenated in declaration order.
    pub files: Vec<String>,
    /// Output directory.
    pub output_path: PathBuf,
    /// Whether deployment builds minify this unit.
    pub minify: bool,
    /// Whether the watch coordinator rebuilds this unit on change.
    pub watch: bool,
}

/// A style bundle with all defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleUnit {
    /// Source glob patterns; each matched file compiles independently.
    pub files: Vec<String>,
    /// Output directory.
    pub output_path: PathBuf,
    /// Whether deployment builds minify this unit.
    pub minify: bool,
    /// Watch setting, normalized from the declared toggle/list form.
    pub watch: WatchSetting,
}

/// Normalized watch setting for a style unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WatchSetting {
    /// Never rebuilt by the watch coordinator.
    Disabled,
    /// Watched; carries extra patterns beyond the unit's own sources.
    Enabled(Vec<String>),
}

impl WatchSetting {
    /// Returns the extra watch patterns when watching is enabled.
    #[must_use]
    pub fn extra_patterns(&self) -> Option<&[String]> {
        match self {
            Self::Disabled => None,
            Self::Enabled(extra) => Some(extra),
        }
    }

    /// Returns whether watching is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// A raw static-asset declaration, accepting shorthand forms.
///
/// ```text
/// assets = [
///   "vendor/img/**/*.png",                       # bare source
///   ["vendor/fonts/*.woff2", "public/fonts"],    # [source, dest]
///   { source = "vendor/icons/*.svg" },           # full table
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetDecl {
    /// Bare source pattern; destination defaults to the asset directory.
    Source(String),
    /// `[source]` or `[source, dest]` pair.
    Pair(Vec<String>),
    /// Full `{ source, dest }` table.
    Full {
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dest: Option<PathBuf>,
    },
}

impl AssetDecl {
    /// Normalizes this declaration into a canonical [`AssetSpec`].
    ///
    /// Returns `None` for declarations without a resolvable source (empty
    /// strings, empty pairs); those are skipped, not errors.
    #[must_use]
    pub fn normalize(&self, default_dest: &PathBuf) -> Option<AssetSpec> {
        let (source, dest) = match self {
            Self::Source(source) => (source.clone(), None),
            Self::Pair(parts) => {
                let source = parts.first()?.clone();
                (source, parts.get(1).map(PathBuf::from))
            }
            Self::Full { source, dest } => (source.clone(), dest.clone()),
        };

        if source.trim().is_empty() {
            return None;
        }

        Some(AssetSpec {
            source,
            dest: dest.unwrap_or_else(|| default_dest.clone()),
        })
    }
}

/// A normalized static-asset copy specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSpec {
    /// Source glob pattern, relative to the project root.
    pub source: String,
    /// Destination directory.
    pub dest: PathBuf,
}

/// Normalizes a unit key for case-insensitive selection.
///
/// Keys are trimmed and lower-cased, so `" Main "`, `"main"` and `"MAIN"`
/// all select the same unit.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
