//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application provides to the tracker.

use thiserror::Error;

use crate::domain::{IpTrackerConfig, IpTrackerError};

/// Source of cryptographically secure salt bytes.
///
/// Shared by every reset, so implementations must be safe for concurrent
/// use.
pub trait SaltSource: Send + Sync {
    /// Produce `len` random bytes.
    ///
    /// # Errors
    ///
    /// The underlying entropy source failed.
    fn generate_salt(&self, len: usize) -> Result<Vec<u8>, RandomnessError>;
}

/// The entropy source could not produce bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("randomness unavailable: {0}")]
pub struct RandomnessError(pub String);

impl From<RandomnessError> for IpTrackerError {
    fn from(err: RandomnessError) -> Self {
        IpTrackerError::SaltGeneration(err.0)
    }
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Tracker configuration
    fn get_ip_tracker_config(&self) -> IpTrackerConfig;
}
