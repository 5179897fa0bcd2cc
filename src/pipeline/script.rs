// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script bundle pipeline.
//!
//! ```text
//! select --> read --> concat(";\n")
//!   deploy && minify:  minify --> <name>.min.js
//!   deploy && !minify: <name> as-is
//!   convert:           <name> + sourceMappingURL footer, <name>.map
//! --> write under unit.output_path
//! ```

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::config::types::ScriptUnit;
use crate::error::{PipelineError, Result};
use crate::transform::concat::concat_sources;
use crate::transform::js::minify_script;
use crate::transform::maps::{concat_source_map, script_map_footer};
use crate::transform::with_min_suffix;
use crate::utility::fs::copy::write_artifact;
use crate::utility::fs::select::select_files;

use super::{Mode, PipelineOutcome};

/// Builds one script bundle.
///
/// Stage errors are folded into the returned outcome; this function never
/// propagates an error to the batch.
pub async fn build_script(config: &Config, key: &str, unit: &ScriptUnit, mode: Mode) -> PipelineOutcome {
    info!(unit = %key, artifact = %unit.name, %mode, "Building script bundle");

    match run(config, unit, mode).await {
        Ok(artifacts) => PipelineOutcome::Success {
            unit: key.to_string(),
            artifacts,
        },
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::error!(unit = %key, error = %reason, "Script bundle failed");
            PipelineOutcome::Failed {
                unit: key.to_string(),
                reason,
            }
        }
    }
}

async fn run(config: &Config, unit: &ScriptUnit, mode: Mode) -> Result<usize> {
    let root = &config.paths.project_root;
    let selected = select_files(root, &unit.files)?;

    if selected.is_empty() {
        warn!(artifact = %unit.name, patterns = ?unit.files, "No sources matched; nothing to build");
        return Ok(0);
    }
    debug!(artifact = %unit.name, count = selected.len(), "Selected sources");

    let mut sources = Vec::with_capacity(selected.len());
    for path in selected {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| PipelineError::Read {
                file: path.clone(),
                source: e,
            })?;
        // Source paths in maps stay project-relative where possible.
        let map_path = path.strip_prefix(root).map_or(path.clone(), PathBuf::from);
        sources.push((map_path, content));
    }

    let concatenated = concat_sources(sources);

    if mode.is_deploy() && unit.minify {
        let artifact = with_min_suffix(&unit.name);
        let minified = minify_script(&artifact, &concatenated.code)?;
        write_artifact(&unit.output_path.join(&artifact), minified.as_bytes()).await?;
        return Ok(1);
    }

    if mode.is_deploy() {
        write_artifact(&unit.output_path.join(&unit.name), concatenated.code.as_bytes()).await?;
        return Ok(1);
    }

    // Development build: artifact plus adjacent source map.
    let map_name = format!("{}.map", unit.name);
    let map = concat_source_map(&unit.name, &concatenated.spans)?;

    let mut code = concatenated.code;
    code.push_str(&script_map_footer(&map_name));

    write_artifact(&unit.output_path.join(&unit.name), code.as_bytes()).await?;
    write_artifact(&unit.output_path.join(&map_name), map.as_bytes()).await?;
    Ok(2)
}
