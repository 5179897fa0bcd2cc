// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stylesheet pipeline.
//!
//! ```text
//! select --> per file:
//!   sass (Compressed if deploy && minify, else Expanded)
//!   deploy:            lightningcss vendor prefixes
//!   deploy && minify:  <stem>.min.css
//!   convert:           <stem>.css + sourceMappingURL footer + .map
//! --> write under unit.output_path
//! ```
//!
//! Files compile independently; one malformed stylesheet fails only itself,
//! the rest of the unit still builds.

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::config::types::StyleUnit;
use crate::error::Result;
use crate::transform::css::prefix_stylesheet;
use crate::transform::maps::{style_map_footer, style_source_map};
use crate::transform::sass::compile_file;
use crate::transform::with_min_suffix;
use crate::utility::fs::copy::write_artifact;
use crate::utility::fs::select::select_files;

use super::{Mode, OutputDensity, PipelineOutcome};

/// Builds one style bundle.
///
/// Stage errors are folded into the returned outcome; this function never
/// propagates an error to the batch.
pub async fn build_style(config: &Config, key: &str, unit: &StyleUnit, mode: Mode) -> PipelineOutcome {
    info!(unit = %key, %mode, "Building style bundle");

    let selected = match select_files(&config.paths.project_root, &unit.files) {
        Ok(selected) => selected,
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::error!(unit = %key, error = %reason, "Source selection failed");
            return PipelineOutcome::Failed {
                unit: key.to_string(),
                reason,
            };
        }
    };

    if selected.is_empty() {
        warn!(unit = %key, patterns = ?unit.files, "No sources matched; nothing to build");
        return PipelineOutcome::Success {
            unit: key.to_string(),
            artifacts: 0,
        };
    }

    let include_paths = config.include_paths();
    let density = OutputDensity::select(mode, unit.minify);

    let mut artifacts = 0usize;
    let mut failures = Vec::new();

    for file in &selected {
        match build_one(config, unit, mode, density, &include_paths, file).await {
            Ok(written) => artifacts += written,
            Err(e) => {
                let reason = format!("{}: {e:#}", file.display());
                tracing::error!(
                    unit = %key,
                    error = %reason,
                    "Stylesheet failed; continuing with remaining files"
                );
                failures.push(reason);
            }
        }
    }

    if failures.is_empty() {
        PipelineOutcome::Success {
            unit: key.to_string(),
            artifacts,
        }
    } else {
        PipelineOutcome::Failed {
            unit: key.to_string(),
            reason: failures.join("; "),
        }
    }
}

async fn build_one(
    config: &Config,
    unit: &StyleUnit,
    mode: Mode,
    density: OutputDensity,
    include_paths: &[std::path::PathBuf],
    file: &Path,
) -> Result<usize> {
    let stem = file
        .file_stem()
        .map_or_else(|| "style".to_string(), |s| s.to_string_lossy().into_owned());
    let base_name = format!("{stem}.css");

    let mut css = compile_file(file, density, include_paths)?;

    if mode.is_deploy() {
        css = prefix_stylesheet(file, &css, density == OutputDensity::Compressed)?;

        let artifact = if unit.minify {
            with_min_suffix(&base_name)
        } else {
            base_name
        };
        write_artifact(&unit.output_path.join(artifact), css.as_bytes()).await?;
        return Ok(1);
    }

    // Development build: artifact plus adjacent source map.
    let source_rel = file
        .strip_prefix(&config.paths.project_root)
        .unwrap_or(file)
        .display()
        .to_string();
    let source_content = tokio::fs::read_to_string(file).await.unwrap_or_default();

    let map_name = format!("{base_name}.map");
    let map = style_source_map(&base_name, &source_rel, &source_content)?;

    css.push_str(&style_map_footer(&map_name));

    write_artifact(&unit.output_path.join(&base_name), css.as_bytes()).await?;
    write_artifact(&unit.output_path.join(&map_name), map.as_bytes()).await?;
    Ok(2)
}
