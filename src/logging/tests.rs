// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(5).is_ok());
    assert!(LogLevel::new(6).is_err());
}

#[test]
fn test_log_level_filter_strings() {
    let filters = [
        LogLevel::SILENT.to_filter_string(),
        LogLevel::ERROR.to_filter_string(),
        LogLevel::WARN.to_filter_string(),
        LogLevel::INFO.to_filter_string(),
        LogLevel::DEBUG.to_filter_string(),
        LogLevel::TRACE.to_filter_string(),
    ];
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_round_trip() {
    for raw in 0..=5u8 {
        let level = LogLevel::from_u8(raw).unwrap();
        assert_eq!(u8::from(level), raw);
    }
    assert!(LogLevel::from_u8(42).is_none());
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");

    let invalid: Result<LogLevel, _> = serde_json::from_str("9");
    assert!(invalid.is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_file_level(LogLevel::DEBUG)
        .with_log_file("pipe.log".to_string())
        .build();

    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("pipe.log"));
}
