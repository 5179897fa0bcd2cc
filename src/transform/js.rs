// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script minification via `minify-js`.

use minify_js::{Session, TopLevelMode, minify};

use crate::error::PipelineError;

/// Minifies a concatenated script artifact.
///
/// Sources are treated as classic global-scope scripts, matching the
/// concatenation model (bundles are plain `<script>` payloads, not
/// modules).
///
/// # Errors
///
/// Returns a [`PipelineError::Minify`] carrying the parser/minifier
/// message.
pub fn minify_script(artifact: &str, code: &str) -> Result<String, PipelineError> {
    let session = Session::new();
    let mut output = Vec::new();

    minify(&session, TopLevelMode::Global, code.as_bytes(), &mut output).map_err(|e| {
        PipelineError::Minify {
            artifact: artifact.to_string(),
            message: e.to_string(),
        }
    })?;

    String::from_utf8(output).map_err(|e| PipelineError::Minify {
        artifact: artifact.to_string(),
        message: format!("minifier produced non-UTF-8 output: {e}"),
    })
}
