// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run and list command arguments.

use clap::Args;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Tasks to run, in order. Aliases and globs like 'convert-*' are
    /// supported; with no tasks given, the 'default' task runs.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Shows only aliases.
    #[arg(short = 'i', long)]
    pub aliases: bool,

    /// Shows declared units alongside the task names.
    #[arg(short = 'u', long)]
    pub units: bool,
}
