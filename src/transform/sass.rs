// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stylesheet preprocessing via `grass`.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::pipeline::OutputDensity;

/// Compiles one Sass/SCSS file to CSS.
///
/// `include_paths` are searched, in order, for `@use` / `@import` targets
/// that are not found relative to the file itself.
///
/// # Errors
///
/// Returns a [`PipelineError::Preprocess`] describing the failing file and
/// the compiler message.
pub fn compile_file(
    file: &Path,
    density: OutputDensity,
    include_paths: &[PathBuf],
) -> Result<String, PipelineError> {
    let style = match density {
        OutputDensity::Compressed => grass::OutputStyle::Compressed,
        OutputDensity::Expanded => grass::OutputStyle::Expanded,
    };

    let mut options = grass::Options::default().style(style);
    for path in include_paths {
        options = options.load_path(path);
    }

    grass::from_path(file, &options).map_err(|e| PipelineError::Preprocess {
        file: file.to_path_buf(),
        message: e.to_string(),
    })
}
