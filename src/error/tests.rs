// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{AssetError, ConfigError, PipeError, PipeResult, PipelineError, TaskError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "project_root".to_string(),
    };
    insta::assert_snapshot!(err.to_string());
}

#[test]
fn test_pipeline_error_display() {
    let err = PipelineError::Preprocess {
        file: PathBuf::from("scss/site.scss"),
        message: "undefined variable".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "failed to preprocess scss/site.scss: undefined variable"
    );
}

#[test]
fn test_asset_error_display() {
    let err = AssetError::BadSpec {
        pattern: "[".to_string(),
        message: "unterminated class".to_string(),
    };
    assert!(err.to_string().contains("invalid asset source pattern"));
}

#[test]
fn test_task_error_display() {
    let err = TaskError::UnknownTask("deplo".to_string());
    assert_eq!(err.to_string(), "unknown task 'deplo'");
}

#[test]
fn test_pipe_error_size() {
    // PipeError should be reasonably small
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<PipeError>();
    assert!(size <= 24, "PipeError is {size} bytes, expected <= 24");
}

#[test]
fn test_pipe_result_size() {
    // Result<(), PipeError> should be reasonably small
    let size = std::mem::size_of::<PipeResult<()>>();
    assert!(size <= 24, "PipeResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_boxing_from_impls() {
    let cfg: PipeError = ConfigError::NotFound("assetpipe.toml".to_string()).into();
    assert!(matches!(cfg, PipeError::Config(_)));

    let task: PipeError = TaskError::UnknownTask("x".to_string()).into();
    assert!(matches!(task, PipeError::Task(_)));
}
