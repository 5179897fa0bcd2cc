// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::types::{AssetDecl, WatchSetting, normalize_key};
use super::{Config, ConfigLoader, PathsConfig};
use crate::logging::LogLevel;

const SAMPLE: &str = r#"
include_paths = ["node_modules/foundation/scss"]

assets = [
    "vendor/img/**/*.png",
    ["vendor/fonts/*.woff2", "public/fonts"],
    { source = "vendor/icons/*.svg" },
]

[paths]
project_root = "/srv/site"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/lib/*.js", "js/app/*.js"]

[bundles.admin]
type = "script"
name = "admin.js"
files = ["js/admin/*.js"]
output_path = "/srv/site/public/admin"
minify = false
watch = false

[bundles.site]
type = "style"
files = ["scss/site.scss"]
watch = true

[bundles.print]
type = "style"
files = ["scss/print.scss"]
watch = ["scss/shared/**/*.scss"]
"#;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.scripts().is_empty());
    assert!(config.styles().is_empty());
    assert!(config.asset_specs().is_empty());
}

#[test]
fn test_partition_splits_by_kind() {
    let config = Config::parse(SAMPLE).unwrap();

    let script_keys: Vec<_> = config.scripts().keys().cloned().collect();
    let style_keys: Vec<_> = config.styles().keys().cloned().collect();
    assert_eq!(script_keys, ["admin", "main"]);
    assert_eq!(style_keys, ["print", "site"]);
}

#[test]
fn test_script_defaults_resolved() {
    let config = Config::parse(SAMPLE).unwrap();

    let main = &config.scripts()["main"];
    assert_eq!(main.name, "app.js");
    assert_eq!(main.output_path, PathBuf::from("/srv/site/public/js"));
    assert!(main.minify);
    assert!(main.watch);

    let admin = &config.scripts()["admin"];
    assert_eq!(admin.output_path, PathBuf::from("/srv/site/public/admin"));
    assert!(!admin.minify);
    assert!(!admin.watch);
}

#[test]
fn test_style_defaults_resolved() {
    let config = Config::parse(SAMPLE).unwrap();

    let site = &config.styles()["site"];
    assert_eq!(site.output_path, PathBuf::from("/srv/site/public/css"));
    assert!(site.minify);
    assert_eq!(site.watch, WatchSetting::Enabled(Vec::new()));

    let print = &config.styles()["print"];
    assert_eq!(
        print.watch,
        WatchSetting::Enabled(vec!["scss/shared/**/*.scss".to_string()])
    );
}

#[test]
fn test_style_watch_disabled_by_default() {
    let toml = r#"
[bundles.plain]
type = "style"
files = ["scss/plain.scss"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.styles()["plain"].watch, WatchSetting::Disabled);
}

#[test]
fn test_invalid_script_units_dropped() {
    let toml = r#"
[bundles.unnamed]
type = "script"
files = ["js/*.js"]

[bundles.blank_name]
type = "script"
name = "   "
files = ["js/*.js"]

[bundles.no_files]
type = "script"
name = "app.js"

[bundles.good]
type = "script"
name = "app.js"
files = ["js/*.js"]
"#;
    let config = Config::parse(toml).unwrap();
    let keys: Vec<_> = config.scripts().keys().cloned().collect();
    assert_eq!(keys, ["good"]);
}

#[test]
fn test_invalid_style_units_dropped() {
    let toml = r#"
[bundles.empty]
type = "style"
files = []

[bundles.good]
type = "style"
files = ["scss/site.scss"]
"#;
    let config = Config::parse(toml).unwrap();
    let keys: Vec<_> = config.styles().keys().cloned().collect();
    assert_eq!(keys, ["good"]);
}

#[test]
fn test_bundle_without_type_dropped() {
    let toml = r#"
[bundles.untyped]
name = "app.js"
files = ["js/*.js"]

[bundles.good]
type = "script"
name = "app.js"
files = ["js/*.js"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.scripts().len(), 1);
    assert!(config.styles().is_empty());
}

#[test]
fn test_asset_shorthands_normalized() {
    let config = Config::parse(SAMPLE).unwrap();
    let specs = config.asset_specs();

    assert_eq!(specs.len(), 3);
    assert_eq!(specs[0].source, "vendor/img/**/*.png");
    assert_eq!(specs[0].dest, PathBuf::from("/srv/site/public/assets"));
    assert_eq!(specs[1].source, "vendor/fonts/*.woff2");
    assert_eq!(specs[1].dest, PathBuf::from("public/fonts"));
    assert_eq!(specs[2].source, "vendor/icons/*.svg");
    assert_eq!(specs[2].dest, PathBuf::from("/srv/site/public/assets"));
}

#[test]
fn test_asset_without_source_skipped() {
    let default_dest = PathBuf::from("/assets");

    assert!(AssetDecl::Source(String::new()).normalize(&default_dest).is_none());
    assert!(AssetDecl::Pair(Vec::new()).normalize(&default_dest).is_none());

    let one = AssetDecl::Pair(vec!["img/*.png".to_string()]);
    let spec = one.normalize(&default_dest).unwrap();
    assert_eq!(spec.dest, default_dest);
}

#[test]
fn test_partition_leaves_declarations_untouched() {
    let config = Config::parse(SAMPLE).unwrap();

    // Raw declarations keep their unresolved form after partitioning.
    let decl = &config.bundles["main"];
    assert!(decl.output_path.is_none());
    assert!(decl.minify.is_none());
    assert_eq!(config.bundles.len(), 4);
}

#[test]
fn test_paths_resolve_defaults() {
    let mut paths = PathsConfig {
        project_root: PathBuf::from("/srv/site"),
        ..Default::default()
    };
    paths.resolve();

    assert_eq!(paths.document_root(), PathBuf::from("/srv/site/public"));
    assert_eq!(paths.asset_dir(), PathBuf::from("/srv/site/public/assets"));
    assert_eq!(paths.node_modules(), PathBuf::from("/srv/site/node_modules"));
    assert_eq!(paths.css_dir(), PathBuf::from("/srv/site/public/css"));
    assert_eq!(paths.scripts_dir(), PathBuf::from("/srv/site/public/js"));
}

#[test]
fn test_paths_relative_overrides_anchored() {
    let mut paths = PathsConfig {
        project_root: PathBuf::from("/srv/site"),
        document_root: Some(PathBuf::from("html")),
        css_dir: Some(PathBuf::from("styles")),
        ..Default::default()
    };
    paths.resolve();

    assert_eq!(paths.document_root(), PathBuf::from("/srv/site/html"));
    // css_dir resolves against the document root, not the project root.
    assert_eq!(paths.css_dir(), PathBuf::from("/srv/site/html/styles"));
}

#[test]
fn test_include_paths_anchored_at_project_root() {
    let config = Config::parse(SAMPLE).unwrap();
    assert_eq!(
        config.include_paths(),
        vec![PathBuf::from("/srv/site/node_modules/foundation/scss")]
    );
}

#[test]
fn test_normalize_key() {
    assert_eq!(normalize_key(" Main "), "main");
    assert_eq!(normalize_key("MAIN"), "main");
    assert_eq!(normalize_key("main"), "main");
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let toml = r#"
[unknown_section]
foo = "bar"
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_deny_unknown_fields_bundle() {
    let toml = r#"
[bundles.main]
type = "script"
name = "app.js"
files = ["js/*.js"]
typo_field = true
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse(SAMPLE).unwrap();

    let result1 = config.format_options();
    let result2 = config.format_options();
    assert_eq!(result1, result2);

    let joined = result1.join("\n");
    assert!(joined.contains("scripts.main.name"));
    assert!(joined.contains("styles.site.minify"));
    assert!(joined.contains("paths.scripts_dir"));
}

// --- ConfigLoader Tests ---

#[test]
fn test_config_loader_layered_sources() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
output_log_level = 2

[paths]
project_root = "/from/file"
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str(
            r#"
[paths]
project_root = "/from/string"
"#,
        )
        .build()
        .expect("build should succeed");

    assert_eq!(config.paths.project_root, PathBuf::from("/from/string"));
    assert_eq!(config.global.output_log_level, LogLevel::WARN);
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/config.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/path.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_invalid_toml() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    assert!(ConfigLoader::new().add_toml_file(file.path()).build().is_err());
}

#[test]
fn test_config_loader_deserialization_error() {
    let result = ConfigLoader::new()
        .add_toml_str("[global]\n output_log_level = \"loud\"")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[paths]\n project_root = \"/a\"")
        .set("paths.project_root", "/b")
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.paths.project_root, PathBuf::from("/b"));
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: This test runs in isolation (each test binary process sets a
    // unique prefix, so no other test observes this variable).
    unsafe {
        std::env::set_var("APTEST_PATHS__PROJECT_ROOT", "/from/env");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[paths]\n project_root = \"/from/toml\"")
        .with_env_prefix("APTEST")
        .build()
        .expect("build should succeed");

    assert_eq!(config.paths.project_root, PathBuf::from("/from/env"));

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("APTEST_PATHS__PROJECT_ROOT");
    }
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[paths]\n project_root = \"/a\"")
        .add_toml_str("[paths]\n project_root = \"/b\"");

    let formatted = loader.format_loaded_files();
    assert_eq!(formatted.len(), 2);
    assert!(formatted[0].starts_with("1. [string]"));
}
