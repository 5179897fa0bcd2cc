// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build pipelines.
//!
//! # Architecture
//!
//! ```text
//! BatchRunner (JoinSet + semaphore)
//!      |
//!      +--> script::build_script   select -> concat -> [minify] -> write
//!      +--> style::build_style     select -> sass -> [prefix] -> write
//!                                  per-file isolation
//!      |
//!      v
//! BatchReport (per-unit PipelineOutcome, never fails the batch)
//!
//! assets::copy_assets: sequential copy chain for `init`
//! ```
//!
//! # Modes
//!
//! | Mode    | Preprocessing          | Minify | Prefix | Source maps |
//! |---------|------------------------|--------|--------|-------------|
//! | Convert | expanded               | no     | no     | yes         |
//! | Deploy  | compressed if `minify` | if `minify`, `.min` suffix | yes | no |

pub mod assets;
pub mod batch;
pub mod script;
pub mod style;


/// Build mode for one batch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Development build: unminified, source-mapped.
    Convert,
    /// Deployment build: minified, vendor-prefixed, no source maps.
    Deploy,
}

impl Mode {
    /// Returns whether this is a deployment build.
    #[must_use]
    pub const fn is_deploy(self) -> bool {
        matches!(self, Self::Deploy)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Convert => write!(f, "convert"),
            Self::Deploy => write!(f, "deploy"),
        }
    }
}

/// Output density of the stylesheet preprocessor.
///
/// Exactly one density is chosen per style build; the two arms of the
/// original complementary-boolean selection collapse into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDensity {
    /// Whitespace-free output for minified deployment builds.
    Compressed,
    /// Readable nested output for everything else.
    Expanded,
}

impl OutputDensity {
    /// Chooses the density for one style build.
    #[must_use]
    pub const fn select(mode: Mode, minify: bool) -> Self {
        if mode.is_deploy() && minify {
            Self::Compressed
        } else {
            Self::Expanded
        }
    }
}

/// Terminal result of one unit's pipeline.
///
/// A failed pipeline still completes from the batch's point of view;
/// failure is data, not control flow (no unit ever aborts its siblings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The unit built; `artifacts` counts the files written.
    Success { unit: String, artifacts: usize },
    /// The unit failed; the reason has already been logged.
    Failed { unit: String, reason: String },
}

impl PipelineOutcome {
    /// The unit key this outcome belongs to.
    #[must_use]
    pub fn unit(&self) -> &str {
        match self {
            Self::Success { unit, .. } | Self::Failed { unit, .. } => unit,
        }
    }

    /// Returns whether the pipeline succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}
