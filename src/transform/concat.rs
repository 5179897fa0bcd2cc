// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script concatenation.
//!
//! Sources join with an explicit `;\n` separator so that a file ending in an
//! unterminated statement cannot swallow the first statement of the next
//! file.

use std::path::PathBuf;

/// One source's position inside a concatenated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Source file path (as selected).
    pub path: PathBuf,
    /// Zero-based line in the artifact where this source begins.
    pub start_line: u32,
    /// Number of lines this source contributes.
    pub lines: u32,
    /// The source's own content, for source-map embedding.
    pub content: String,
}

/// A concatenated artifact with per-source line spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concatenated {
    /// The joined code.
    pub code: String,
    /// Per-source spans, in concatenation order.
    pub spans: Vec<SourceSpan>,
}

/// Joins the given `(path, content)` pairs with `;\n`.
#[must_use]
pub fn concat_sources(sources: Vec<(PathBuf, String)>) -> Concatenated {
    let mut code = String::new();
    let mut spans = Vec::with_capacity(sources.len());

    for (i, (path, content)) in sources.into_iter().enumerate() {
        if i > 0 {
            code.push_str(";\n");
        }

        // The separator ends with a newline, so each source starts at the
        // line following everything already emitted.
        let start_line = u32::try_from(code.matches('\n').count()).unwrap_or(u32::MAX);
        let lines = u32::try_from(content.lines().count()).unwrap_or(u32::MAX);

        code.push_str(&content);
        spans.push(SourceSpan {
            path,
            start_line,
            lines,
            content,
        });
    }

    Concatenated { code, spans }
}
