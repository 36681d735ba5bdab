//! Error types for nn-forecast.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    /// The sequence is too short to build a single training window.
    #[error("insufficient data: need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("steps must be at least 1")]
    InvalidSteps,

    #[error("sequence value at index {index} is not finite ({value})")]
    NonFiniteInput { index: usize, value: f64 },

    #[error("unknown model kind: {0:?}")]
    UnknownMode(String),

    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// Windowing produced no training rows.
    #[error("training set is empty")]
    EmptyDataset,

    #[error("could not parse {0:?} as a number")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
