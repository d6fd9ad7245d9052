//! IP tracker configuration.

use serde::{Deserialize, Serialize};

use super::errors::IpTrackerError;

/// Configuration for the validator IP tracker
///
/// # Bloom sizing
///
/// Each reset sizes the filter for
/// `max(max_ip_entries_per_validator * validators, min_count_estimate)`
/// entries at `target_false_positive_probability`. The filter is then
/// allowed to fill until its false positive rate would pass
/// `max_false_positive_probability`, at which point the next insertion
/// forces a reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpTrackerConfig {
    /// Bytes of random salt per bloom generation (default: 32)
    pub salt_size: usize,
    /// Floor on the bloom sizing estimate (default: 128)
    pub min_count_estimate: usize,
    /// False positive rate the filter is sized for (default: 0.001)
    pub target_false_positive_probability: f64,
    /// False positive rate that forces a reset (default: 0.01)
    pub max_false_positive_probability: f64,
    /// Bloom insertions allowed per validator between resets (default: 2).
    /// Values above 1 let a validator change its IP at least once per reset.
    pub max_ip_entries_per_validator: usize,
    /// Interval for the periodic reset driver (default: 60 seconds).
    /// The tracker itself never resets on a timer.
    pub bloom_reset_interval_secs: u64,
}

impl Default for IpTrackerConfig {
    fn default() -> Self {
        Self {
            salt_size: 32,
            min_count_estimate: 128,
            target_false_positive_probability: 0.001,
            max_false_positive_probability: 0.01,
            max_ip_entries_per_validator: 2,
            bloom_reset_interval_secs: 60,
        }
    }
}

impl IpTrackerConfig {
    /// Testing config with a tiny filter that fills quickly
    pub fn for_testing() -> Self {
        Self {
            salt_size: 8,
            min_count_estimate: 4,
            bloom_reset_interval_secs: 1,
            ..Self::default()
        }
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), IpTrackerError> {
        if self.salt_size == 0 {
            return Err(IpTrackerError::Config("salt_size cannot be 0".to_string()));
        }
        if self.min_count_estimate == 0 {
            return Err(IpTrackerError::Config(
                "min_count_estimate cannot be 0".to_string(),
            ));
        }
        if self.max_ip_entries_per_validator == 0 {
            return Err(IpTrackerError::Config(
                "max_ip_entries_per_validator cannot be 0".to_string(),
            ));
        }

        let in_range = |p: f64| p > 0.0 && p < 1.0;
        if !in_range(self.target_false_positive_probability) {
            return Err(IpTrackerError::Config(format!(
                "target_false_positive_probability {} must be in (0, 1)",
                self.target_false_positive_probability
            )));
        }
        if !in_range(self.max_false_positive_probability) {
            return Err(IpTrackerError::Config(format!(
                "max_false_positive_probability {} must be in (0, 1)",
                self.max_false_positive_probability
            )));
        }
        if self.target_false_positive_probability > self.max_false_positive_probability {
            return Err(IpTrackerError::Config(format!(
                "target_false_positive_probability {} exceeds max {}",
                self.target_false_positive_probability, self.max_false_positive_probability
            )));
        }

        if self.bloom_reset_interval_secs == 0 {
            return Err(IpTrackerError::Config(
                "bloom_reset_interval_secs cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set the per-validator bloom cap
    pub fn with_max_ip_entries_per_validator(mut self, max: usize) -> Self {
        self.max_ip_entries_per_validator = max;
        self
    }

    /// Builder-style method to set the sizing floor
    pub fn with_min_count_estimate(mut self, min: usize) -> Self {
        self.min_count_estimate = min;
        self
    }
}
