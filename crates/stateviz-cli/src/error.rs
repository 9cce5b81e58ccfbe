//! Error types for the command-line viewer.
//!
//! [`CliError`] wraps every failure mode between reading the input file and
//! printing a projection, so command handlers can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the `stateviz` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: stateviz_core::config::ConfigError,
    },

    /// The log file could not be read.
    #[error("failed to read log file {}: {source}", path.display())]
    ReadLog {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The log contained a malformed mutation.
    #[error("log error: {source}")]
    Log {
        /// The underlying log construction error.
        #[from]
        source: stateviz_log::LogError,
    },

    /// Replay failed.
    #[error("projection error: {source}")]
    Projection {
        /// The underlying projection error.
        #[from]
        source: stateviz_core::ProjectionError,
    },

    /// `--at` matched neither an entry index nor a location label.
    #[error("no entry at {at:?}: expected an index below {len} or a location label")]
    UnknownLocation {
        /// The requested position.
        at: String,
        /// Number of entries in the log.
        len: usize,
    },

    /// Output serialization failed.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
