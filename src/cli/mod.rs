// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for assetpipe using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! assetpipe [global options] <command>
//! run [tasks...]     (default task: "default" -> deploy)
//! list
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::{ListArgs, RunArgs};
use clap::{Parser, Subcommand};

/// Configuration-driven asset build orchestrator.
///
/// Compiles script bundles, stylesheet bundles and static assets declared
/// in `assetpipe.toml`.
#[derive(Debug, Parser)]
#[command(
    name = "assetpipe",
    author,
    version,
    about = "Configuration-driven asset build orchestrator",
    long_about = "assetpipe compiles the script bundles, stylesheet bundles and\n\
                  static assets declared in assetpipe.toml, in two modes:\n\
                  development (source-mapped) and deployment (minified,\n\
                  vendor-prefixed).\n\n\
                  Invoking `assetpipe run` runs the default task (deploy).\n\
                  Do `assetpipe run <task>...` for specific tasks; see\n\
                  `assetpipe list` for what is available.",
    after_help = "CONFIG FILES:\n\n\
                  By default, assetpipe loads `assetpipe.toml` from the current\n\
                  directory if present. Additional files can be specified with\n\
                  --config; later files override earlier ones. Use\n\
                  --no-default-config to disable auto detection and only use\n\
                  --config. Environment variables prefixed with ASSETPIPE_\n\
                  override file values, and --set overrides everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by assetpipe.
    Inis,

    /// Runs build tasks.
    Run(RunArgs),

    /// Lists available tasks, aliases and units.
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
