//! Error types for analyzer construction.
//!
//! Per-frame conditions (missing landmarks, degenerate geometry, warm-up)
//! are not errors; they surface as `None` from the analyzer.

use thiserror::Error;

/// Errors that stop an analyzer from being built.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Exercise name not recognized.
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Creates an unknown exercise error.
    #[must_use]
    pub fn unknown_exercise(name: impl Into<String>) -> Self {
        Self::UnknownExercise(name.into())
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// Result type for analyzer construction.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
