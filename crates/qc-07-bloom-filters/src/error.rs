//! Error types for the Bloom filter crate

use thiserror::Error;

/// Errors that can occur when building, sizing or decoding a filter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Filter size exceeds maximum: {size} > {max}")]
    FilterTooLarge { size: usize, max: usize },

    #[error("Invalid false positive rate: {fpr} (must be between 0 and 1)")]
    InvalidFPR { fpr: f64 },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
