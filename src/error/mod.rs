// assetpipe: Configuration-Driven Asset Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 assetpipe developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              PipeError (boxed variants)
//!                     |
//!      +--------+-----+-----+--------+
//!      |        |     |     |        |
//!      v        v     v     v        v
//!    Bail     Cfg   Pipe  Asset   Watch
//!             Box   Box    Box     Box   + Task, Io, Other
//!
//! Sub-errors (unboxed internally):
//!   Config    ReadError, ParseError, MissingKey, InvalidValue
//!   Pipeline  Select, Preprocess, Prefix, Minify, SourceMap, Write
//!   Asset     CopyFailed, BadSpec
//!   Watch     InitFailed, WatchPath, ChannelClosed
//!   Task      UnknownTask, InvalidPattern
//!
//! All variants boxed => PipeError stays small on the stack.
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PipeError`].
pub type PipeResult<T> = std::result::Result<T, PipeError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum PipeError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Build pipeline error.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] Box<PipelineError>),

    /// Asset copy error.
    #[error("asset error: {0}")]
    Asset(#[from] Box<AssetError>),

    /// File watcher error.
    #[error("watch error: {0}")]
    Watch(#[from] Box<WatchError>),

    /// Task resolution error.
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`PipeError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PipeError {
    PipeError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PipeError {
                fn from(err: $error) -> Self {
                    PipeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    PipelineError => Pipeline,
    AssetError => Asset,
    WatchError => Watch,
    TaskError => Task,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Pipeline Errors ---

/// Per-stage build pipeline errors.
///
/// These are logged and folded into a `PipelineOutcome::Failed`; a single
/// unit's failure never aborts its sibling units.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source selection failed (bad glob, unreadable root).
    #[error("source selection failed for unit '{unit}': {message}")]
    Select { unit: String, message: String },

    /// Stylesheet preprocessing failed.
    #[error("failed to preprocess {}: {message}", file.display())]
    Preprocess { file: PathBuf, message: String },

    /// Vendor-prefixing / CSS printing failed.
    #[error("failed to post-process {}: {message}", file.display())]
    Prefix { file: PathBuf, message: String },

    /// Minification failed.
    #[error("failed to minify '{artifact}': {message}")]
    Minify { artifact: String, message: String },

    /// Source map construction or encoding failed.
    #[error("failed to build source map for '{artifact}': {message}")]
    SourceMap { artifact: String, message: String },

    /// Reading a source file failed.
    #[error("failed to read source {}", file.display())]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output artifact failed.
    #[error("failed to write artifact {}", file.display())]
    Write {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Asset Errors ---

/// Static asset copy errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Copying a single file failed; aborts the sequential copy chain.
    #[error("failed to copy {} to {}", src.display(), dest.display())]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Asset source pattern did not parse as a glob.
    #[error("invalid asset source pattern '{pattern}': {message}")]
    BadSpec { pattern: String, message: String },
}

// --- Watch Errors ---

/// File watcher errors.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize the underlying watcher backend.
    #[error("failed to initialize file watcher: {0}")]
    InitFailed(String),

    /// Failed to register a path with the watcher.
    #[error("failed to watch {}: {message}", path.display())]
    WatchPath { path: PathBuf, message: String },

    /// The event channel closed unexpectedly.
    #[error("watch event channel closed")]
    ChannelClosed,
}

// --- Task Errors ---

/// Task-name resolution errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No operation registered under the given name.
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// A task pattern failed to parse as a glob.
    #[error("invalid task pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[cfg(test)]
mod tests;
