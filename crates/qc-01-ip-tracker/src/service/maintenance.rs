use tracing::{error, info};

use crate::domain::IpTrackerError;
use crate::service::IpTracker;

/// Point-in-time counts for operator tooling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpTrackerStats {
    /// Validators tracked, manually tracked nodes included
    pub validators: usize,
    /// Nodes pinned via manual tracking
    pub manually_tracked: usize,
    /// Live connections, validators or not
    pub connected: usize,
    /// Validators with a most recent known IP
    pub tracked_ips: usize,
    /// Claims eligible for gossip
    pub gossipable: usize,
    /// Insertions in the current bloom generation
    pub bloom_count: usize,
    /// Insertions allowed before a reset is forced
    pub bloom_max_count: usize,
}

impl IpTracker {
    /// Replace the bloom generation.
    ///
    /// The salt is drawn before the write lock is taken, so a slow entropy
    /// source never stalls readers.
    pub(crate) fn reset_bloom_inner(&self) -> Result<(), IpTrackerError> {
        let salt = match self.salt_source.generate_salt(self.config.salt_size) {
            Ok(salt) => salt,
            Err(e) => {
                self.metrics.record_reset_failure();
                error!("[qc-01] failed to generate bloom salt: {}", e);
                return Err(e.into());
            }
        };

        let mut state = self.state.write();
        let previous_count = state.bloom.count();
        if let Err(e) = self.install_bloom(&mut state, salt) {
            error!(
                "[qc-01] failed to reset validator tracker bloom filter (validators={}): {}",
                state.validators.len(),
                e
            );
            return Err(e);
        }
        info!(
            "[qc-01] reset validator tracker bloom filter (previous_count={}, current_count={}, max_count={})",
            previous_count,
            state.bloom.count(),
            state.bloom.max_count()
        );
        Ok(())
    }

    /// Serialized filter and salt of the current generation.
    pub(crate) fn bloom_snapshot(&self) -> Result<(Vec<u8>, Vec<u8>), IpTrackerError> {
        let state = self.state.read();
        let filter = state.bloom.filter().to_bytes()?;
        Ok((filter, state.bloom.salt().to_vec()))
    }

    /// Current state counts
    pub fn stats(&self) -> IpTrackerStats {
        let state = self.state.read();
        IpTrackerStats {
            validators: state.validators.len(),
            manually_tracked: state.manually_tracked.len(),
            connected: state.connected.len(),
            tracked_ips: state.most_recent_validator_ips.len(),
            gossipable: state.gossipable.len(),
            bloom_count: state.bloom.count(),
            bloom_max_count: state.bloom.max_count(),
        }
    }
}
