// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Run | List | Options | Inis | Version
//! ```

use std::process::ExitCode;

use assetpipe::cli::global::GlobalOptions;
use assetpipe::cli::{self, Command};
use assetpipe::cmd::config::{run_inis_command, run_options_command};
use assetpipe::cmd::list::run_list_command;
use assetpipe::cmd::run::run_task_command;
use assetpipe::config::Config;
use assetpipe::config::loader::ConfigLoader;
use assetpipe::logging::init_logging;
use assetpipe::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Run(args)) => match load_config(&cli.global) {
            Ok(config) => run_task_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::List(args)) => {
            load_config(&cli.global).and_then(|config| run_list_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    if global.no_default_config {
        loader
    } else {
        loader.add_toml_file_optional("assetpipe.toml")
    }
}

fn load_config(global: &GlobalOptions) -> assetpipe::error::Result<Config> {
    let mut loader = build_config_loader(global).with_env_prefix("ASSETPIPE");
    for option in &global.options {
        if let Some((key, value)) = option.split_once('=') {
            loader = loader.set(key, value.to_string()).map_err(|e| {
                eprintln!("Invalid --set option '{option}': {e}");
                e
            })?;
        } else {
            let e = anyhow::anyhow!("--set expects KEY=VALUE, got '{option}'");
            eprintln!("{e}");
            return Err(e);
        }
    }
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
