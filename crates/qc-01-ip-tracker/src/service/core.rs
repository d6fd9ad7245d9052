use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::domain::{
    BloomAddition, ClaimedIpPort, GossipableSet, IpTrackerConfig, IpTrackerError, NodeId,
    ValidatorBloom,
};
use crate::metrics::IpTrackerMetrics;
use crate::ports::{ConfigProvider, SaltSource};

/// Validator IP tracker implementing the driving ports.
///
/// Every piece of mutable state lives in one [`TrackerState`] behind one
/// lock. Queries take the read side, every notification takes the write
/// side, and the gossipable invariant is restored before the lock is
/// released.
///
/// # Example
///
/// ```rust,ignore
/// use qc_01_ip_tracker::{IpTracker, IpTrackerConfig, OsSaltSource};
/// use qc_01_ip_tracker::ports::{IpTrackerApi, ValidatorSetListener};
///
/// let tracker = IpTracker::new(IpTrackerConfig::default(), Arc::new(OsSaltSource))?;
/// tracker.on_validator_added(node_id, None, [0; 32], 100);
/// tracker.connected(claim);
/// let (filter, salt) = tracker.bloom()?;
/// ```
pub struct IpTracker {
    pub(crate) config: IpTrackerConfig,
    pub(crate) salt_source: Arc<dyn SaltSource>,
    pub(crate) state: RwLock<TrackerState>,
    pub(crate) metrics: IpTrackerMetrics,
}

/// State guarded by the tracker lock
pub(crate) struct TrackerState {
    /// Always treated as validators
    pub(crate) manually_tracked: HashSet<NodeId>,
    /// Claim each connected peer presented, validator or not
    pub(crate) connected: HashMap<NodeId, Arc<ClaimedIpPort>>,
    pub(crate) most_recent_validator_ips: HashMap<NodeId, Arc<ClaimedIpPort>>,
    pub(crate) validators: HashSet<NodeId>,
    /// Connected validators whose connection claim is their latest IP
    pub(crate) gossipable: GossipableSet,
    pub(crate) bloom: ValidatorBloom,
}

impl IpTracker {
    /// Create a tracker with an initial bloom generation.
    ///
    /// # Errors
    ///
    /// `Config` if `config` is invalid; `SaltGeneration` or `Filter` if the
    /// initial bloom filter cannot be built.
    pub fn new(
        config: IpTrackerConfig,
        salt_source: Arc<dyn SaltSource>,
    ) -> Result<Self, IpTrackerError> {
        config.validate()?;

        let salt = salt_source.generate_salt(config.salt_size)?;
        let bloom = ValidatorBloom::build(&config, salt, 0, std::iter::empty())?;

        let metrics = IpTrackerMetrics::new();
        metrics.record_reset(bloom.count(), bloom.max_count());

        Ok(Self {
            config,
            salt_source,
            state: RwLock::new(TrackerState {
                manually_tracked: HashSet::new(),
                connected: HashMap::new(),
                most_recent_validator_ips: HashMap::new(),
                validators: HashSet::new(),
                gossipable: GossipableSet::new(),
                bloom,
            }),
            metrics,
        })
    }

    /// Create a tracker from whatever config the host provides.
    ///
    /// # Errors
    ///
    /// Same as [`IpTracker::new`].
    pub fn from_provider(
        provider: &dyn ConfigProvider,
        salt_source: Arc<dyn SaltSource>,
    ) -> Result<Self, IpTrackerError> {
        Self::new(provider.get_ip_tracker_config(), salt_source)
    }

    /// Create a tracker and replay an initial validator set.
    ///
    /// The bloom filter is resized for the replayed set before returning.
    pub fn with_validators<I>(
        config: IpTrackerConfig,
        salt_source: Arc<dyn SaltSource>,
        validators: I,
    ) -> Result<Self, IpTrackerError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let tracker = Self::new(config, salt_source)?;
        {
            let mut state = tracker.state.write();
            for node_id in validators {
                tracker.on_validator_added_locked(&mut state, node_id);
            }
            tracker.record_state(&state);
        }
        tracker.reset_bloom_inner()?;
        Ok(tracker)
    }

    /// Tracker configuration
    pub fn config(&self) -> &IpTrackerConfig {
        &self.config
    }

    /// Lock-free metrics
    pub fn metrics(&self) -> &IpTrackerMetrics {
        &self.metrics
    }

    /// Validator-added path shared by the listener and manual tracking.
    pub(crate) fn on_validator_added_locked(&self, state: &mut TrackerState, node_id: NodeId) {
        if state.manually_tracked.contains(&node_id) {
            return;
        }
        if !state.validators.insert(node_id) {
            // Already tracked; its most recent IP must not move backwards
            return;
        }

        let Some(ip) = state.connected.get(&node_id).cloned() else {
            return;
        };
        // The connection predates the validator entry, so its IP is the
        // newest one we know.
        self.update_most_recent_validator_ip(state, ip.clone());
        state.gossipable.insert(ip);
        debug!("[qc-01] validator {} connected before joining, now gossipable", node_id);
    }

    /// Set the most recent IP for a validator and offer it to the bloom filter.
    pub(crate) fn update_most_recent_validator_ip(
        &self,
        state: &mut TrackerState,
        ip: Arc<ClaimedIpPort>,
    ) {
        let node_id = ip.node_id();
        state.most_recent_validator_ips.insert(node_id, ip.clone());

        match state.bloom.try_add(&ip) {
            BloomAddition::Added => {
                self.metrics.record_bloom_count(state.bloom.count());
            }
            BloomAddition::NodeCapReached => {}
            BloomAddition::FilterFull => {
                // The new generation is seeded from the most recent IPs,
                // which already include `ip`.
                let count = state.bloom.count();
                match self.rebuild_bloom(state) {
                    Ok(()) => {
                        info!(
                            "[qc-01] reset validator tracker bloom filter (current_count={})",
                            count
                        );
                    }
                    Err(e) => {
                        error!(
                            "[qc-01] failed to reset validator tracker bloom filter (max_count={}, current_count={}): {}",
                            state.bloom.max_count(),
                            count,
                            e
                        );
                    }
                }
            }
        }
    }

    /// Build a new bloom generation and swap it in.
    ///
    /// On failure the current generation is left untouched.
    pub(crate) fn rebuild_bloom(&self, state: &mut TrackerState) -> Result<(), IpTrackerError> {
        let salt = match self.salt_source.generate_salt(self.config.salt_size) {
            Ok(salt) => salt,
            Err(e) => {
                self.metrics.record_reset_failure();
                return Err(e.into());
            }
        };
        self.install_bloom(state, salt)
    }

    /// Build a generation with `salt` from the current state and swap it in.
    pub(crate) fn install_bloom(
        &self,
        state: &mut TrackerState,
        salt: Vec<u8>,
    ) -> Result<(), IpTrackerError> {
        let bloom = ValidatorBloom::build(
            &self.config,
            salt,
            state.validators.len(),
            state.most_recent_validator_ips.values().map(Arc::as_ref),
        );
        match bloom {
            Ok(bloom) => {
                self.metrics.record_reset(bloom.count(), bloom.max_count());
                state.bloom = bloom;
                Ok(())
            }
            Err(e) => {
                self.metrics.record_reset_failure();
                Err(e)
            }
        }
    }

    /// Refresh the state gauges.
    pub(crate) fn record_state(&self, state: &TrackerState) {
        self.metrics.record_state(
            state.most_recent_validator_ips.len(),
            state.gossipable.len(),
            state.validators.len(),
        );
    }
}

impl std::fmt::Debug for IpTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpTracker")
            .field("config", &self.config)
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}
