// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named build operations.
//!
//! # Architecture
//!
//! ```text
//! TaskRegistry  name/alias/glob --> operation names
//!      |
//!      v
//! Operation ----> TaskContext (batch runner, cancel token)
//!      |
//!      +-- init             asset copy, once
//!      +-- convert-scripts  dev batch (scripts)
//!      +-- convert-styles   dev batch (styles)
//!      +-- convert          both convert-*, concurrent
//!      +-- deploy-scripts   init, convert batch THEN deploy batch
//!      +-- deploy-styles    init, convert batch THEN deploy batch
//!      +-- deploy           init once, then both pass pairs concurrent
//!      +-- watch            deploy once, then watch coordinator
//! ```
//!
//! Ordering contract: `init` always precedes deploy work, and the
//! convert/deploy passes inside one `deploy-*` run sequentially — both
//! write into potentially overlapping output directories and must not
//! race. Per-unit build failures are swallowed here (logged, reported,
//! never turned into an operation error), matching the batch contract.

pub mod registry;


use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::assets::copy_assets;
use crate::pipeline::batch::{BatchReport, BatchRunner};
use crate::pipeline::Mode;
use crate::watch::WatchCoordinator;

/// A named build operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Copy declared static assets.
    Init,
    /// Development-mode batch over all script units.
    ConvertScripts,
    /// Development-mode batch over all style units.
    ConvertStyles,
    /// Both convert operations, concurrently.
    Convert,
    /// `init`, then development pass, then deployment pass (scripts).
    DeployScripts,
    /// `init`, then development pass, then deployment pass (styles).
    DeployStyles,
    /// `init` once, then both kinds' pass pairs concurrently.
    Deploy,
    /// `deploy` once, then rebuild-on-change until cancelled.
    Watch,
}

impl Operation {
    /// Every operation, in registry order.
    pub const ALL: &'static [Self] = &[
        Self::Init,
        Self::ConvertScripts,
        Self::ConvertStyles,
        Self::Convert,
        Self::DeployScripts,
        Self::DeployStyles,
        Self::Deploy,
        Self::Watch,
    ];

    /// The registered task name for this operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ConvertScripts => "convert-scripts",
            Self::ConvertStyles => "convert-styles",
            Self::Convert => "convert",
            Self::DeployScripts => "deploy-scripts",
            Self::DeployStyles => "deploy-styles",
            Self::Deploy => "deploy",
            Self::Watch => "watch",
        }
    }

    /// Looks an operation up by its registered name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Runs this operation to completion.
    ///
    /// Boxed for recursive composition (`deploy` runs `init` and both
    /// `deploy-*` operations; `watch` runs `deploy`).
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure failures (watcher setup);
    /// per-unit build failures are logged and swallowed.
    pub fn run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            info!(task = self.name(), "Running task");

            match self {
                Self::Init => {
                    let report = copy_assets(ctx.config()).await;
                    if let Some(reason) = &report.aborted {
                        warn!(
                            reason = %reason,
                            specs_completed = report.specs_completed,
                            "Asset copy aborted; init reports done regardless"
                        );
                    }
                    Ok(())
                }
                Self::ConvertScripts => {
                    log_report(&ctx.runner().run_scripts(Mode::Convert, None).await);
                    Ok(())
                }
                Self::ConvertStyles => {
                    log_report(&ctx.runner().run_styles(Mode::Convert, None).await);
                    Ok(())
                }
                Self::Convert => {
                    let (scripts, styles) = tokio::join!(
                        Self::ConvertScripts.run(ctx),
                        Self::ConvertStyles.run(ctx),
                    );
                    scripts?;
                    styles?;
                    Ok(())
                }
                Self::DeployScripts => {
                    Self::Init.run(ctx).await?;
                    deploy_script_passes(ctx).await;
                    Ok(())
                }
                Self::DeployStyles => {
                    Self::Init.run(ctx).await?;
                    deploy_style_passes(ctx).await;
                    Ok(())
                }
                Self::Deploy => {
                    // init runs exactly once, ahead of every deploy pass.
                    Self::Init.run(ctx).await?;
                    tokio::join!(deploy_script_passes(ctx), deploy_style_passes(ctx));
                    Ok(())
                }
                Self::Watch => {
                    Self::Deploy.run(ctx).await?;
                    WatchCoordinator::new(Arc::clone(ctx.runner()))
                        .run(ctx.cancel_token().clone())
                        .await
                }
            }
        })
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Context shared by every operation in one invocation.
#[derive(Clone)]
pub struct TaskContext {
    /// Batch runner; owns the shared configuration and concurrency limit.
    runner: Arc<BatchRunner>,

    /// Cancellation token for the watch loop.
    cancel_token: CancellationToken,
}

impl TaskContext {
    /// Creates a new `TaskContext`.
    #[must_use]
    pub const fn new(runner: Arc<BatchRunner>, cancel_token: CancellationToken) -> Self {
        Self {
            runner,
            cancel_token,
        }
    }

    /// The shared batch runner.
    #[must_use]
    pub const fn runner(&self) -> &Arc<BatchRunner> {
        &self.runner
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        self.runner.config()
    }

    /// The cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }
}

/// The convert-then-deploy pass pair for script units.
///
/// Both passes write into potentially overlapping output directories and
/// must not race; the deploy pass starts only after the convert pass
/// settles.
async fn deploy_script_passes(ctx: &TaskContext) {
    log_report(&ctx.runner().run_scripts(Mode::Convert, None).await);
    log_report(&ctx.runner().run_scripts(Mode::Deploy, None).await);
}

/// The convert-then-deploy pass pair for style units.
async fn deploy_style_passes(ctx: &TaskContext) {
    log_report(&ctx.runner().run_styles(Mode::Convert, None).await);
    log_report(&ctx.runner().run_styles(Mode::Deploy, None).await);
}

/// Logs a batch report at the appropriate levels.
///
/// Failures surface here and nowhere else; the exit status of the
/// surrounding operation stays clean.
fn log_report(report: &BatchReport) {
    if report.is_empty() {
        info!(mode = %report.mode(), "Batch had no applicable units");
        return;
    }

    info!(
        mode = %report.mode(),
        units = report.len(),
        failed = report.failures().len(),
        "Batch complete"
    );

    for failure in report.failures() {
        warn!(
            unit = failure.unit(),
            reason = failure.failure_reason().unwrap_or("unknown"),
            "Unit failed in this batch"
        );
    }
}
