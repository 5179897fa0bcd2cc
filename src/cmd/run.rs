// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation for assetpipe.

use std::sync::Arc;

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::batch::BatchRunner;
use crate::task::registry::TaskRegistry;
use crate::task::{Operation, TaskContext};

/// Main handler for the run command.
///
/// Resolves the requested task names (aliases, globs, case-insensitive)
/// and runs the operations sequentially, in the order given.
///
/// # Errors
///
/// Returns an error if task resolution fails or an operation reports an
/// infrastructure failure. Per-unit build failures are logged, not
/// returned (see the task module docs).
pub async fn run_task_command(args: &RunArgs, config: &Config) -> Result<()> {
    let registry = TaskRegistry::with_builtin(config.aliases.clone());

    let specs = if args.tasks.is_empty() {
        vec!["default".to_string()]
    } else {
        args.tasks.clone()
    };

    let resolved = match registry.resolve(&specs) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Failed to resolve tasks: {e}");
            return Err(e);
        }
    };
    tracing::info!(tasks = ?resolved, "Resolved tasks to run");

    let runner = Arc::new(BatchRunner::new(Arc::new(config.clone())));
    let ctx = TaskContext::new(runner, tokio_util::sync::CancellationToken::new());

    let cancel_token = ctx.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping...");
            cancel_token.cancel();
        }
    });

    for name in &resolved {
        let Some(operation) = Operation::from_name(name) else {
            // Registry only hands out registered names; this is a bug guard.
            anyhow::bail!("resolved task '{name}' has no operation");
        };
        operation.run(&ctx).await?;
    }

    tracing::info!("All tasks completed");
    Ok(())
}
