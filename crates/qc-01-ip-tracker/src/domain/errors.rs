//! Domain Errors for the IP Tracker
//!
//! Address claims that do not apply (non-validators, stale timestamps) are
//! not errors; they surface as `false` returns. Only a failed bloom reset
//! or a bad configuration is reported here.

use qc_07_bloom_filters::FilterError;
use thiserror::Error;

/// Errors surfaced by the IP tracker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IpTrackerError {
    /// The random source could not produce a bloom salt.
    /// The previous filter generation stays in effect.
    #[error("failed to generate bloom salt: {0}")]
    SaltGeneration(String),

    /// The bloom filter could not be sized or built.
    /// The previous filter generation stays in effect.
    #[error("invalid bloom filter: {0}")]
    Filter(#[from] FilterError),

    /// The tracker configuration is inconsistent.
    #[error("invalid ip tracker config: {0}")]
    Config(String),
}
