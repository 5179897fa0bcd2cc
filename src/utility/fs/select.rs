// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Glob-based source selection.
//!
//! ```text
//! select_files(root, ["js/lib/*.js", "js/app/*.js"])
//!    walk root once (ignore::WalkParallel + flume)
//!    per pattern: wax match on root-relative path, sorted
//!    pattern order preserved, duplicates dropped
//! ```
//!
//! Pattern order is significant: script concatenation consumes the result
//! in exactly this order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use flume::bounded;
use tracing::warn;
use wax::{Glob, Program};

use crate::error::Result;

/// Builds the parallel walker used for selection.
///
/// Hidden files are skipped; ignore files are NOT honored, since build
/// inputs are frequently generated or vendored and must stay selectable.
fn build_walker(root: &Path) -> ignore::WalkBuilder {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.follow_links(false);
    builder.hidden(true);
    builder.git_ignore(false);
    builder.git_global(false);
    builder.git_exclude(false);
    builder
}

/// Collects every file under `root`, as paths relative to `root`.
fn walk_files(root: &Path) -> Vec<PathBuf> {
    // Bounded channel keeps memory flat on huge trees.
    let (tx, rx) = bounded::<PathBuf>(1000);
    let root_path = root.to_path_buf();

    let parallel = build_walker(root).build_parallel();
    parallel.run(|| {
        let tx = tx.clone();
        let root_path = root_path.clone();

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && let Ok(rel) = entry.path().strip_prefix(&root_path)
                    {
                        let _ = tx.send(rel.to_path_buf());
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    rx.iter().collect()
}

/// Finds files matching an ordered list of glob patterns.
///
/// Returns absolute (root-joined) paths: patterns in declaration order,
/// matches within one pattern sorted lexicographically, duplicates across
/// patterns kept once (first pattern wins).
///
/// A non-existent root yields an empty selection, not an error; declaring
/// units ahead of their sources is common during project setup.
///
/// # Errors
///
/// Returns an error if any pattern is not a valid glob.
pub fn select_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        warn!(root = %root.display(), "selection root does not exist");
        return Ok(Vec::new());
    }

    let globs: Vec<Glob<'_>> = patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))
        })
        .collect::<Result<_>>()?;

    let all_files = walk_files(root);

    let mut seen = BTreeSet::new();
    let mut selected = Vec::new();
    for glob in &globs {
        let mut matched: Vec<&PathBuf> = all_files
            .iter()
            .filter(|rel| glob.is_match(rel.as_path()))
            .collect();
        matched.sort();

        for rel in matched {
            if seen.insert(rel.clone()) {
                selected.push(root.join(rel));
            }
        }
    }

    Ok(selected)
}

/// Returns whether a root-relative path matches any of the given patterns.
///
/// Patterns that fail to parse never match (they were warned about when the
/// unit was first selected).
#[must_use]
pub fn matches_any(rel: &Path, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        Glob::new(pattern).is_ok_and(|glob| glob.is_match(rel))
    })
}

/// Splits a glob pattern into its invariant directory prefix.
///
/// `"js/app/**/*.js"` yields `"js/app"`; a fully literal pattern yields its
/// parent directory. The watch coordinator registers these prefixes with
/// the filesystem watcher instead of the raw patterns.
#[must_use]
pub fn invariant_prefix(pattern: &str) -> PathBuf {
    match Glob::new(pattern) {
        Ok(glob) => {
            let (prefix, _) = glob.partition();
            if prefix.as_os_str().is_empty() {
                PathBuf::from(".")
            } else if Path::new(pattern) == prefix {
                // Fully literal pattern: the prefix IS the file; watch its parent.
                prefix
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
            } else {
                prefix
            }
        }
        Err(_) => PathBuf::from("."),
    }
}
