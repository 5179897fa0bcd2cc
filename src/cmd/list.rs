// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for assetpipe.

use crate::cli::run::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::task::registry::TaskRegistry;

/// Main handler for the list command.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the handler signature uniform.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let registry = TaskRegistry::with_builtin(config.aliases.clone());

    if args.aliases {
        for (name, targets) in registry.aliases() {
            println!("{} = {}", name, targets.join(", "));
        }
        return Ok(());
    }

    for task in registry.all_tasks() {
        println!("{task}");
    }

    if args.units {
        println!();
        for (key, unit) in config.scripts() {
            println!(
                "script {key}: {} -> {}",
                unit.files.join(", "),
                unit.output_path.join(&unit.name).display()
            );
        }
        for (key, unit) in config.styles() {
            println!(
                "style  {key}: {} -> {}",
                unit.files.join(", "),
                unit.output_path.display()
            );
        }
    }

    Ok(())
}
