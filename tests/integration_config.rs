// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading and normalization.

use std::io::Write;
use std::path::PathBuf;

use assetpipe::config::types::WatchSetting;
use assetpipe::config::{Config, loader::ConfigLoader};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{contents}").expect("failed to write temp file");
    file
}

#[test]
fn test_load_and_partition_from_file() {
    let file = write_config(
        r#"
include_paths = ["node_modules/foundation/scss"]

assets = ["vendor/img/**/*.png"]

[paths]
project_root = "/srv/site"
document_root = "/srv/site/html"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/**/*.js"]

[bundles.site]
type = "style"
files = ["scss/site.scss"]
watch = true
"#,
    );

    let config = Config::from_file(file.path()).expect("config should load");

    assert_eq!(config.paths.document_root(), PathBuf::from("/srv/site/html"));
    assert_eq!(
        config.scripts()["main"].output_path,
        PathBuf::from("/srv/site/html/js")
    );
    assert_eq!(
        config.styles()["site"].watch,
        WatchSetting::Enabled(Vec::new())
    );
    assert_eq!(
        config.asset_specs()[0].dest,
        PathBuf::from("/srv/site/html/assets")
    );
}

#[test]
fn test_layering_later_file_wins() {
    let base = write_config(
        r#"
[paths]
project_root = "/base"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/*.js"]
"#,
    );
    let local = write_config(
        r#"
[paths]
project_root = "/local"
"#,
    );

    let config = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_file(local.path())
        .build()
        .expect("layered config should build");

    assert_eq!(config.paths.project_root, PathBuf::from("/local"));
    // The bundle from the base layer survives the merge.
    assert!(config.scripts().contains_key("main"));
}

#[test]
fn test_env_prefix_overrides_file() {
    // SAFETY: unique prefix, no other test reads it
    unsafe {
        std::env::set_var("APITEST_PATHS__PROJECT_ROOT", "/from/env");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[paths]\nproject_root = \"/from/file\"")
        .with_env_prefix("APITEST")
        .build()
        .expect("config should build");

    assert_eq!(config.paths.project_root, PathBuf::from("/from/env"));

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("APITEST_PATHS__PROJECT_ROOT");
    }
}

#[test]
fn test_invalid_units_are_dropped_not_fatal() {
    let config = Config::parse(
        r#"
[bundles.broken]
type = "script"
files = ["js/*.js"]

[bundles.ok]
type = "style"
files = ["scss/site.scss"]
"#,
    )
    .expect("invalid units must not fail the load");

    assert!(config.scripts().is_empty());
    assert_eq!(config.styles().len(), 1);
}

#[test]
fn test_format_options_lists_effective_values() {
    let config = Config::parse(
        r#"
[paths]
project_root = "/srv/site"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/*.js"]
"#,
    )
    .unwrap();

    let joined = config.format_options().join("\n");
    assert!(joined.contains("paths.scripts_dir"));
    assert!(joined.contains("/srv/site/public/js"));
    assert!(joined.contains("scripts.main.minify"));
    assert!(joined.contains("true"));
}
