// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use anyhow::Context;
use tokio::fs;

use crate::error::{AssetError, Result};
use crate::utility::fs::select::select_files;

/// Copies all files matching `pattern` (relative to `root`) flat into `dest`.
///
/// The destination directory is created if needed. Files are copied one at
/// a time, in selection order; the first failing copy aborts the rest.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, the destination cannot be
/// created, or any single copy fails.
pub async fn copy_matched_files(root: &Path, pattern: &str, dest: &Path) -> Result<usize> {
    let sources = select_files(root, std::slice::from_ref(&pattern.to_string()))?;

    if sources.is_empty() {
        return Ok(0);
    }

    fs::create_dir_all(dest)
        .await
        .with_context(|| format!("failed to create directory {}", dest.display()))?;

    let mut copied = 0usize;
    for src in sources {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dst = dest.join(file_name);

        fs::copy(&src, &dst).await.map_err(|e| AssetError::CopyFailed {
            src: src.clone(),
            dest: dst.clone(),
            source: e,
        })?;
        copied += 1;
    }

    Ok(copied)
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if directory creation or the write itself fails.
pub async fn write_artifact(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
