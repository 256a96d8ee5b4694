//! Error types for the qgrid crate

use thiserror::Error;

/// Main error type for the qgrid crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("discretizer has no dimensions")]
    NoDimensions,

    #[error("dimension {dimension} has no bin edges")]
    EmptyBinEdges { dimension: usize },

    #[error("bin edges for dimension {dimension} are not strictly increasing at index {index}")]
    NonIncreasingBinEdges { dimension: usize, index: usize },

    #[error("bin count {bins} is too small (need at least 2 edges per dimension)")]
    InvalidBinCount { bins: usize },

    #[error(
        "invalid bin range [{low}, {high}] for dimension {dimension} (low must be finite and below high)"
    )]
    InvalidBinRange {
        dimension: usize,
        low: f64,
        high: f64,
    },

    #[error("observation has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("action space is empty")]
    NoActions,

    #[error("environment reports {got} actions, agent was sized for {expected}")]
    ActionCountMismatch { expected: usize, got: usize },

    #[error("learning rate {value} is outside (0, 1]")]
    InvalidLearningRate { value: f64 },

    #[error("discount factor {value} is outside [0, 1)")]
    InvalidDiscountFactor { value: f64 },

    #[error("exploration rate {value} is outside [0, 1]")]
    InvalidEpsilon { value: f64 },

    #[error("epsilon decay {value} is outside (0, 1]")]
    InvalidEpsilonDecay { value: f64 },

    #[error("minimum exploration rate {value} is outside [0, 1]")]
    InvalidMinEpsilon { value: f64 },

    #[error("minimum exploration rate {min_epsilon} exceeds initial rate {epsilon}")]
    MinEpsilonAboveInitial { min_epsilon: f64, epsilon: f64 },

    #[error("environment failure: {message}")]
    Environment { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
