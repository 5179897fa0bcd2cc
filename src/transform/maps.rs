// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source-map construction for development builds.
//!
//! ```text
//! scripts: line-accurate map over the concat spans
//! styles:  best-effort map pointing at the preprocessed source
//! both:    sourceMappingURL footer appended to the artifact
//! ```

use sourcemap::SourceMapBuilder;

use crate::error::PipelineError;
use crate::transform::concat::SourceSpan;

fn encode(builder: SourceMapBuilder, artifact: &str) -> Result<String, PipelineError> {
    let mut encoded = Vec::new();
    builder
        .into_sourcemap()
        .to_writer(&mut encoded)
        .map_err(|e| PipelineError::SourceMap {
            artifact: artifact.to_string(),
            message: e.to_string(),
        })?;

    String::from_utf8(encoded).map_err(|e| PipelineError::SourceMap {
        artifact: artifact.to_string(),
        message: format!("source map is not UTF-8: {e}"),
    })
}

/// Builds a line-accurate source map for a concatenated script artifact.
///
/// Every artifact line maps back to the contributing source's own line;
/// original contents are embedded so browsers need no extra fetches.
///
/// # Errors
///
/// Returns a [`PipelineError::SourceMap`] if encoding fails.
pub fn concat_source_map(artifact: &str, spans: &[SourceSpan]) -> Result<String, PipelineError> {
    let mut builder = SourceMapBuilder::new(Some(artifact));

    for span in spans {
        let source = span.path.display().to_string();
        let src_id = builder.add_source(&source);
        builder.set_source_contents(src_id, Some(&span.content));

        for line in 0..span.lines {
            builder.add(span.start_line + line, 0, line, 0, Some(&source), None, false);
        }
    }

    encode(builder, artifact)
}

/// Builds a whole-file source map for a compiled stylesheet.
///
/// The preprocessor does not report fine-grained positions, so the map
/// points the artifact at its source file and embeds the original content;
/// enough for devtools to show where a rule came from.
///
/// # Errors
///
/// Returns a [`PipelineError::SourceMap`] if encoding fails.
pub fn style_source_map(
    artifact: &str,
    source: &str,
    source_content: &str,
) -> Result<String, PipelineError> {
    let mut builder = SourceMapBuilder::new(Some(artifact));
    let src_id = builder.add_source(source);
    builder.set_source_contents(src_id, Some(source_content));
    builder.add(0, 0, 0, 0, Some(source), None, false);

    encode(builder, artifact)
}

/// The `sourceMappingURL` footer for a script artifact.
#[must_use]
pub fn script_map_footer(map_name: &str) -> String {
    format!("\n//# sourceMappingURL={map_name}\n")
}

/// The `sourceMappingURL` footer for a stylesheet artifact.
#[must_use]
pub fn style_map_footer(map_name: &str) -> String {
    format!("\n/*# sourceMappingURL={map_name} */\n")
}
