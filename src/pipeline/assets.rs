// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Static asset copying.
//!
//! Specs copy strictly one after another so that later entries may
//! intentionally overwrite files placed by earlier ones. The first failing
//! copy aborts the rest of the chain; the surrounding `init` operation
//! still completes (the failure lives in the report and the log).

use tracing::{debug, error, info};

use crate::config::Config;

/// Result of one asset-copy run.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Total files copied across all completed specs.
    pub files_copied: usize,
    /// Number of specs fully processed.
    pub specs_completed: usize,
    /// The error that aborted the chain, if any.
    pub aborted: Option<String>,
}

impl CopyReport {
    /// Returns whether the whole chain completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Copies every declared asset spec, sequentially, in declaration order.
pub async fn copy_assets(config: &Config) -> CopyReport {
    let specs = config.asset_specs();
    let mut report = CopyReport::default();

    if specs.is_empty() {
        debug!("No asset specs declared");
        return report;
    }

    let root = &config.paths.project_root;

    for spec in specs {
        match crate::utility::fs::copy::copy_matched_files(root, &spec.source, &spec.dest).await {
            Ok(copied) => {
                info!(
                    source = %spec.source,
                    dest = %spec.dest.display(),
                    files = copied,
                    "Copied assets"
                );
                report.files_copied += copied;
                report.specs_completed += 1;
            }
            Err(e) => {
                let reason = format!("{e:#}");
                error!(
                    source = %spec.source,
                    dest = %spec.dest.display(),
                    error = %reason,
                    "Asset copy failed; aborting remaining specs"
                );
                report.aborted = Some(reason);
                break;
            }
        }
    }

    report
}
