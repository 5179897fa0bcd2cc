// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{WatchCoordinator, watch_targets};
use crate::config::Config;
use crate::config::types::UnitKind;
use crate::pipeline::batch::BatchRunner;

const SAMPLE: &str = r#"
[paths]
project_root = "/srv/site"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/app/**/*.js"]

[bundles.vendor]
type = "script"
name = "vendor.js"
files = ["js/vendor/*.js"]
watch = false

[bundles.site]
type = "style"
files = ["scss/site.scss"]
watch = ["scss/shared/**/*.scss"]

[bundles.print]
type = "style"
files = ["scss/print.scss"]
"#;

#[test]
fn test_watch_targets_respect_unit_settings() {
    let config = Config::parse(SAMPLE).unwrap();
    let targets = watch_targets(&config);

    let keys: Vec<_> = targets.iter().map(|t| t.key.as_str()).collect();
    // Styles without watch and scripts with watch = false are absent.
    assert_eq!(keys, ["site", "main"]);
}

#[test]
fn test_style_target_appends_extra_patterns() {
    let config = Config::parse(SAMPLE).unwrap();
    let targets = watch_targets(&config);

    let site = targets.iter().find(|t| t.key == "site").unwrap();
    assert_eq!(site.kind, UnitKind::Style);
    assert_eq!(
        site.patterns,
        ["scss/site.scss", "scss/shared/**/*.scss"]
    );
}

#[test]
fn test_watch_roots_are_invariant_prefixes() {
    let config = Config::parse(SAMPLE).unwrap();
    let targets = watch_targets(&config);

    let site = targets.iter().find(|t| t.key == "site").unwrap();
    assert_eq!(
        site.watch_roots(&config),
        [
            PathBuf::from("/srv/site/scss"),
            PathBuf::from("/srv/site/scss/shared"),
        ]
    );

    let main = targets.iter().find(|t| t.key == "main").unwrap();
    assert_eq!(main.watch_roots(&config), [PathBuf::from("/srv/site/js/app")]);
}

#[test]
fn test_one_file_can_trigger_multiple_units() {
    let toml = r#"
[paths]
project_root = "/srv/site"

[bundles.a]
type = "script"
name = "a.js"
files = ["js/**/*.js"]

[bundles.b]
type = "script"
name = "b.js"
files = ["js/shared/*.js"]
"#;
    let config = Config::parse(toml).unwrap();
    let targets = watch_targets(&config);

    let rel = std::path::Path::new("js/shared/util.js");
    let matching: Vec<_> = targets
        .iter()
        .filter(|t| crate::utility::fs::select::matches_any(rel, &t.patterns))
        .map(|t| t.key.as_str())
        .collect();
    assert_eq!(matching, ["a", "b"]);
}

#[tokio::test]
async fn test_run_without_watchable_units_returns_immediately() {
    let toml = r#"
[bundles.site]
type = "style"
files = ["scss/site.scss"]
"#;
    let config = Arc::new(Config::parse(toml).unwrap());
    let runner = Arc::new(BatchRunner::with_concurrency(config, 1));
    let coordinator = WatchCoordinator::new(runner);

    // No watch-enabled units: completes without waiting for cancellation.
    coordinator.run(CancellationToken::new()).await.unwrap();
}

#[tokio::test]
async fn test_run_stops_on_cancellation() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("js")).unwrap();
    std::fs::write(temp.path().join("js/a.js"), "var a = 1;").unwrap();

    let toml = format!(
        r#"
[paths]
project_root = "{}"

[bundles.main]
type = "script"
name = "app.js"
files = ["js/*.js"]
"#,
        temp.path().display()
    );
    let config = Arc::new(Config::parse(&toml).unwrap());
    let runner = Arc::new(BatchRunner::with_concurrency(config, 1));
    let coordinator = WatchCoordinator::new(runner);

    let token = CancellationToken::new();
    let cancel = token.clone();
    let handle = tokio::spawn(async move { coordinator.run(cancel).await });

    token.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(10), handle)
        .await
        .expect("watch loop should stop after cancellation")
        .unwrap()
        .unwrap();
}
