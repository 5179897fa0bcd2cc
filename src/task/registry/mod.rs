// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task registry for resolving task names and aliases.
//!
//! ```text
//! input ["default", "convert-*"]
//!   normalize:       trim + lowercase
//!   resolve_aliases: "default" --> [deploy]   (built-in, overridable)
//!   match_pattern:   "convert-*" --> [convert, convert-scripts, ...]
//!   dedupe + preserve order
//! ```

use std::collections::BTreeSet;

use wax::{Glob, Program};

use crate::config::types::{Aliases, normalize_key};
use crate::error::{Result, TaskError};

use super::Operation;

/// Registry for looking up operations by name, alias or pattern.
pub struct TaskRegistry {
    /// Registered task names.
    task_names: BTreeSet<String>,

    /// Aliases mapping names to task lists.
    aliases: Aliases,
}

impl TaskRegistry {
    /// Creates a registry with the built-in operations registered and the
    /// built-in `default` alias in place (user aliases take precedence).
    #[must_use]
    pub fn with_builtin(mut aliases: Aliases) -> Self {
        aliases
            .entry("default".to_string())
            .or_insert_with(|| vec![Operation::Deploy.name().to_string()]);

        let mut registry = Self {
            task_names: BTreeSet::new(),
            aliases,
        };
        registry.register_all(Operation::ALL.iter().map(|op| op.name().to_string()));
        registry
    }

    /// Registers a task name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.task_names.insert(name.into());
    }

    /// Registers multiple task names.
    pub fn register_all(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        for name in names {
            self.task_names.insert(name.into());
        }
    }

    /// Returns all registered task names.
    #[must_use]
    pub const fn all_tasks(&self) -> &BTreeSet<String> {
        &self.task_names
    }

    /// Returns the alias table.
    #[must_use]
    pub const fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Resolves aliases in a list of task patterns.
    ///
    /// Alias targets are themselves resolved, so aliases may reference
    /// other aliases. Non-alias patterns pass through unchanged.
    #[must_use]
    pub fn resolve_aliases(&self, patterns: &[String]) -> Vec<String> {
        let mut result = Vec::new();

        for pattern in patterns {
            if let Some(targets) = self.aliases.get(pattern) {
                result.extend(self.resolve_aliases(targets));
            } else {
                result.push(pattern.clone());
            }
        }

        result
    }

    /// Matches a glob pattern against registered task names.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        // Exact name match short-circuits glob parsing.
        if self.task_names.contains(pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob = Glob::new(pattern).map_err(|e| TaskError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let matched: Vec<String> = self
            .task_names
            .iter()
            .filter(|name| glob.is_match(name.as_str()))
            .cloned()
            .collect();

        Ok(matched)
    }

    /// Resolves a list of task specifications to concrete operation names.
    ///
    /// This method:
    /// 1. Normalizes input (trim, lowercase)
    /// 2. Expands aliases
    /// 3. Matches glob patterns
    /// 4. Deduplicates while preserving order
    ///
    /// # Errors
    ///
    /// Returns an error for invalid glob patterns, or for a pattern that
    /// matches no registered task (a typo should not silently no-op).
    pub fn resolve(&self, specs: &[String]) -> Result<Vec<String>> {
        let normalized: Vec<String> = specs.iter().map(|s| normalize_key(s)).collect();
        let expanded = self.resolve_aliases(&normalized);

        let mut result = Vec::new();
        let mut seen = BTreeSet::new();

        for pattern in &expanded {
            let matches = self.match_pattern(pattern)?;

            if matches.is_empty() {
                return Err(TaskError::UnknownTask(pattern.clone()).into());
            }

            for name in matches {
                if seen.insert(name.clone()) {
                    result.push(name);
                }
            }
        }

        Ok(result)
    }
}
