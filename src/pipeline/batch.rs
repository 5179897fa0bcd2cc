// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch runner.
//!
//! ```text
//! BatchRunner::new(config)
//!   .run_scripts(mode, key?)   key: trimmed, case-insensitive
//!   .run_styles(mode, key?)
//!       units spawn on a JoinSet, bounded by a shared semaphore
//!       batch resolves after every member settles
//!       member failure -> report entry, never a batch failure
//! ```

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::config::Config;
use crate::config::types::normalize_key;

use super::{Mode, PipelineOutcome, script, style};

/// Runs unit pipelines concurrently and aggregates their outcomes.
pub struct BatchRunner {
    /// Shared configuration.
    config: Arc<Config>,

    /// Semaphore bounding concurrently running pipelines.
    /// Shared across every batch this runner starts.
    semaphore: Arc<Semaphore>,
}

impl BatchRunner {
    /// Creates a runner bounded by the number of CPU cores.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let max_concurrent = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4); // Fallback to 4 if unavailable
        Self::with_concurrency(config, max_concurrent)
    }

    /// Creates a runner with a specific concurrency limit.
    #[must_use]
    pub fn with_concurrency(config: Arc<Config>, max_concurrent: usize) -> Self {
        Self {
            config,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Shared configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Builds script units, all or one selected by key.
    pub async fn run_scripts(&self, mode: Mode, only: Option<&str>) -> BatchReport {
        let selection = Selection::new(only);
        let mut set: JoinSet<PipelineOutcome> = JoinSet::new();

        for (key, unit) in self.config.scripts() {
            if !selection.selects(key) {
                continue;
            }

            let config = Arc::clone(&self.config);
            let semaphore = Arc::clone(&self.semaphore);
            let key = key.clone();
            let unit = unit.clone();
            set.spawn(async move {
                // Closed semaphores don't occur here; treat failure as a permit.
                let _permit = semaphore.acquire_owned().await;
                script::build_script(&config, &key, &unit, mode).await
            });
        }

        Self::drain(set, mode).await
    }

    /// Builds style units, all or one selected by key.
    pub async fn run_styles(&self, mode: Mode, only: Option<&str>) -> BatchReport {
        let selection = Selection::new(only);
        let mut set: JoinSet<PipelineOutcome> = JoinSet::new();

        for (key, unit) in self.config.styles() {
            if !selection.selects(key) {
                continue;
            }

            let config = Arc::clone(&self.config);
            let semaphore = Arc::clone(&self.semaphore);
            let key = key.clone();
            let unit = unit.clone();
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                style::build_style(&config, &key, &unit, mode).await
            });
        }

        Self::drain(set, mode).await
    }

    /// Waits for every spawned pipeline and collects the outcomes.
    async fn drain(mut set: JoinSet<PipelineOutcome>, mode: Mode) -> BatchReport {
        let mut outcomes = Vec::new();

        while let Some(result) = set.join_next().await {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "Pipeline task panicked");
                    outcomes.push(PipelineOutcome::Failed {
                        unit: "<unknown>".to_string(),
                        reason: format!("pipeline task panicked: {e}"),
                    });
                }
            }
        }

        debug!(%mode, units = outcomes.len(), "Batch settled");
        BatchReport { mode, outcomes }
    }
}

/// Unit selection for one batch: everything, or a single normalized key.
struct Selection {
    only: Option<String>,
}

impl Selection {
    fn new(only: Option<&str>) -> Self {
        Self {
            only: only
                .map(normalize_key)
                .filter(|normalized| !normalized.is_empty()),
        }
    }

    fn selects(&self, key: &str) -> bool {
        self.only
            .as_ref()
            .is_none_or(|only| normalize_key(key) == *only)
    }
}

/// Aggregated result of one batch.
///
/// The batch itself always completes; failures are entries, not errors.
#[derive(Debug)]
pub struct BatchReport {
    mode: Mode,
    outcomes: Vec<PipelineOutcome>,
}

impl BatchReport {
    /// The mode this batch ran in.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// All per-unit outcomes, in settlement order.
    #[must_use]
    pub fn outcomes(&self) -> &[PipelineOutcome] {
        &self.outcomes
    }

    /// The failed outcomes only.
    #[must_use]
    pub fn failures(&self) -> Vec<&PipelineOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success()).collect()
    }

    /// Returns whether every unit in the batch succeeded.
    #[must_use]
    pub fn is_all_success(&self) -> bool {
        self.outcomes.iter().all(PipelineOutcome::is_success)
    }

    /// Number of units the batch ran.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns whether the batch ran zero units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
