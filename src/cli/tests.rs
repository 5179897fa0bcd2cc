// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Parser as _;

use super::{Command, parse_from};

#[test]
fn test_parse_run_with_tasks() {
    let cli = parse_from(["assetpipe", "run", "convert", "init"]);
    match cli.command {
        Some(Command::Run(args)) => assert_eq!(args.tasks, ["convert", "init"]),
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn test_parse_run_without_tasks() {
    let cli = parse_from(["assetpipe", "run"]);
    match cli.command {
        Some(Command::Run(args)) => assert!(args.tasks.is_empty()),
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn test_parse_global_options() {
    let cli = parse_from([
        "assetpipe",
        "-c",
        "ci.toml",
        "-l",
        "4",
        "--set",
        "paths.project_root=/srv/site",
        "run",
        "deploy",
    ]);

    assert_eq!(cli.global.configs.len(), 1);
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.options, ["paths.project_root=/srv/site"]);
}

#[test]
fn test_parse_rejects_out_of_range_log_level() {
    let result = super::Cli::try_parse_from(["assetpipe", "-l", "9", "run"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_list_flags() {
    let cli = parse_from(["assetpipe", "list", "--aliases"]);
    match cli.command {
        Some(Command::List(args)) => {
            assert!(args.aliases);
            assert!(!args.units);
        }
        other => panic!("expected List, got {other:?}"),
    }
}

#[test]
fn test_parse_no_command() {
    let cli = parse_from(["assetpipe"]);
    assert!(cli.command.is_none());
}
