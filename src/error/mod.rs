//! Error handling for frailty risk assessment.
//!
//! Scoring itself never fails. These errors come from the external predictor,
//! configuration loading and the patient store, and the assessor turns every
//! predictor error into a rule-based fallback before it reaches a caller.

pub mod util;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Specialized error type for frailty risk assessment
#[derive(Debug, thiserror::Error)]
pub enum FrailtyError {
    /// One or more model artifacts are missing from the model directory
    #[error("Model artifacts not found in {}: {}", dir.display(), missing.join(", "))]
    ArtifactsMissing {
        /// Directory that was checked
        dir: PathBuf,
        /// Artifact file names that were not present
        missing: Vec<String>,
    },

    /// The predictor process could not be started
    #[error("Failed to start predictor process '{program}': {source}")]
    Spawn {
        /// Program that was spawned
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error writing to or reading from the predictor process
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The predictor process exited unsuccessfully
    #[error("Predictor exited with code {}: {stderr}", code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    NonZeroExit {
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error output
        stderr: String,
    },

    /// The predictor did not finish in time and was killed
    #[error("Predictor timed out after {0:?}")]
    Timeout(Duration),

    /// Predictor output did not match the response contract
    #[error("Malformed predictor output: {0}")]
    MalformedOutput(String),

    /// Predictor reported `success: false`
    #[error("Predictor reported failure: {0}")]
    PredictorFailed(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Patient store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FrailtyError {
    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a malformed output error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }

    /// Whether the predictor was simply not installed, as opposed to failing while running
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::ArtifactsMissing { .. })
    }

    /// Whether the predictor was killed for running past its timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type for frailty risk operations
pub type Result<T> = std::result::Result<T, FrailtyError>;
