//! Salt Source Adapters

use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::{RandomnessError, SaltSource};

/// Production salt source backed by the operating system CSPRNG.
///
/// Stateless, so one instance can be shared freely between trackers.
///
/// # Example
///
/// ```rust
/// use qc_01_ip_tracker::adapters::OsSaltSource;
/// use qc_01_ip_tracker::SaltSource;
///
/// let salt = OsSaltSource.generate_salt(32).unwrap();
/// assert_eq!(salt.len(), 32);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn generate_salt(&self, len: usize) -> Result<Vec<u8>, RandomnessError> {
        let mut salt = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| RandomnessError(e.to_string()))?;
        Ok(salt)
    }
}
