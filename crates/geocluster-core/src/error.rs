//! Error types for the clustering core

use thiserror::Error;

/// Result type alias for clustering operations
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Clustering errors
///
/// Every variant is raised before any computation starts, so a failed call
/// never leaves partial output behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// A tuning parameter is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Input data that cannot be clustered (e.g. non-finite coordinates)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Matrix shapes do not line up
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Fewer samples than the algorithm needs
    #[error("n_samples={samples} should be >= {required}")]
    NotEnoughSamples { samples: usize, required: usize },

    /// Algorithm that cannot run on an empty dataset
    #[error("Input must contain at least one sample")]
    EmptyInput,
}

impl ClusterError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
