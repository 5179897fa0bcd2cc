// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Watch coordinator: rebuild units when their sources change.
//!
//! ```text
//! WatchCoordinator::run(cancel_token)
//!   per watch-enabled unit:
//!     patterns = unit.files + extra watch patterns (styles)
//!     watch invariant prefix dirs (PollWatcher + debouncer)
//!     debounced event path matches a pattern
//!         --> development-mode single-key batch for that unit
//!   loop until the cancel token fires
//! ```
//!
//! Each unit holds its own watcher registration; a file matching several
//! units' patterns triggers each unit's rebuild independently. The polling
//! backend re-stats watched trees on every tick, which tolerates editors
//! that replace files by rename instead of writing in place.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::{PollWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer_opt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::config::types::UnitKind;
use crate::error::{Result, WatchError};
use crate::pipeline::Mode;
use crate::pipeline::batch::BatchRunner;
use crate::utility::fs::select::{invariant_prefix, matches_any};

#[cfg(test)]
mod tests;

/// Poll interval for the filesystem backend.
const POLL_INTERVAL: Duration = Duration::from_millis(750);

/// Debounce window collapsing editor write bursts into one rebuild.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// One watch-enabled unit and everything it watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    /// Unit key, used for the single-key rebuild batch.
    pub key: String,
    /// Script or style unit.
    pub kind: UnitKind,
    /// Source patterns plus extra watch patterns, in that order.
    pub patterns: Vec<String>,
}

impl WatchTarget {
    /// Directories the watcher registers for this target: the invariant
    /// prefixes of every pattern, deduplicated, anchored at the project
    /// root.
    #[must_use]
    pub fn watch_roots(&self, config: &Config) -> Vec<PathBuf> {
        let mut seen = BTreeSet::new();
        let mut roots = Vec::new();
        for pattern in &self.patterns {
            let prefix = invariant_prefix(pattern);
            let root = if prefix == std::path::Path::new(".") {
                config.paths.project_root.clone()
            } else {
                config.paths.project_root.join(prefix)
            };
            if seen.insert(root.clone()) {
                roots.push(root);
            }
        }
        roots
    }
}

/// Computes the watch targets for a configuration.
///
/// Script units watch by default; style units only when their `watch`
/// setting enables it (extra patterns are appended after the unit's own
/// sources).
#[must_use]
pub fn watch_targets(config: &Config) -> Vec<WatchTarget> {
    let mut targets = Vec::new();

    for (key, unit) in config.styles() {
        if let Some(extra) = unit.watch.extra_patterns() {
            let mut patterns = unit.files.clone();
            patterns.extend(extra.iter().cloned());
            targets.push(WatchTarget {
                key: key.clone(),
                kind: UnitKind::Style,
                patterns,
            });
        }
    }

    for (key, unit) in config.scripts() {
        if unit.watch {
            targets.push(WatchTarget {
                key: key.clone(),
                kind: UnitKind::Script,
                patterns: unit.files.clone(),
            });
        }
    }

    targets
}

/// Registers watchers and re-runs single-unit development batches on
/// change.
pub struct WatchCoordinator {
    runner: Arc<BatchRunner>,
}

impl WatchCoordinator {
    /// Creates a coordinator over the given batch runner.
    #[must_use]
    pub const fn new(runner: Arc<BatchRunner>) -> Self {
        Self { runner }
    }

    /// Watches until the cancel token fires.
    ///
    /// # Errors
    ///
    /// Returns an error if a watcher backend cannot be initialized. A
    /// target whose watch roots are all missing is skipped with a warning
    /// instead.
    pub async fn run(&self, cancel_token: CancellationToken) -> Result<()> {
        let config = self.runner.config();
        let targets = watch_targets(config);

        if targets.is_empty() {
            info!("No watch-enabled units; nothing to do");
            return Ok(());
        }

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<usize>();

        // Keep every debouncer alive for the whole watch session.
        let mut debouncers: Vec<Debouncer<PollWatcher>> = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            match self.register_target(config, index, target, tx.clone()) {
                Ok(Some(debouncer)) => debouncers.push(debouncer),
                Ok(None) => {}
                Err(e) => return Err(e),
            }
        }
        drop(tx);

        if debouncers.is_empty() {
            warn!("No watchable roots exist yet; watch has nothing to do");
            return Ok(());
        }

        info!(units = debouncers.len(), "Watching for changes (Ctrl-C to stop)");

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    info!("Watch loop cancelled");
                    return Ok(());
                }
                event = rx.recv() => {
                    let Some(index) = event else {
                        return Err(WatchError::ChannelClosed.into());
                    };
                    let Some(target) = targets.get(index) else {
                        continue;
                    };

                    info!(unit = %target.key, kind = %target.kind, "Change detected; rebuilding");
                    let report = match target.kind {
                        UnitKind::Script => {
                            self.runner.run_scripts(Mode::Convert, Some(&target.key)).await
                        }
                        UnitKind::Style => {
                            self.runner.run_styles(Mode::Convert, Some(&target.key)).await
                        }
                    };
                    for failure in report.failures() {
                        warn!(
                            unit = failure.unit(),
                            reason = failure.failure_reason().unwrap_or("unknown"),
                            "Rebuild failed; still watching"
                        );
                    }
                }
            }
        }
    }

    /// Registers one target's watcher; `None` when no watch root exists
    /// yet.
    fn register_target(
        &self,
        config: &Config,
        index: usize,
        target: &WatchTarget,
        tx: tokio::sync::mpsc::UnboundedSender<usize>,
    ) -> Result<Option<Debouncer<PollWatcher>>> {
        let project_root = config.paths.project_root.clone();
        let patterns = target.patterns.clone();
        let key = target.key.clone();

        let handler = move |result: notify_debouncer_mini::DebounceEventResult| match result {
            Ok(events) => {
                let relevant = events.iter().any(|event| {
                    matches!(event.kind, DebouncedEventKind::Any)
                        && event
                            .path
                            .strip_prefix(&project_root)
                            .is_ok_and(|rel| matches_any(rel, &patterns))
                });
                if relevant {
                    // Receiver gone means the loop is shutting down.
                    let _ = tx.send(index);
                }
            }
            Err(e) => {
                warn!(unit = %key, error = %e, "Watch error; continuing to watch");
            }
        };

        let notify_config = notify::Config::default()
            .with_poll_interval(POLL_INTERVAL)
            .with_compare_contents(true);
        let debouncer_config = notify_debouncer_mini::Config::default()
            .with_timeout(DEBOUNCE_WINDOW)
            .with_notify_config(notify_config);

        let mut debouncer = new_debouncer_opt::<_, PollWatcher>(debouncer_config, handler)
            .map_err(|e| WatchError::InitFailed(e.to_string()))?;

        let mut registered = 0usize;
        for root in target.watch_roots(config) {
            if !root.exists() {
                debug!(unit = %target.key, root = %root.display(), "Watch root missing; skipping");
                continue;
            }
            debouncer
                .watcher()
                .watch(&root, RecursiveMode::Recursive)
                .map_err(|e| WatchError::WatchPath {
                    path: root.clone(),
                    message: e.to_string(),
                })?;
            registered += 1;
        }

        if registered == 0 {
            warn!(unit = %target.key, "No existing watch roots; unit will not be watched");
            return Ok(None);
        }

        debug!(unit = %target.key, roots = registered, "Watcher registered");
        Ok(Some(debouncer))
    }
}
