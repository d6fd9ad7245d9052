//! # Driving Ports (Inbound API)
//!
//! Interfaces the tracker exposes to the rest of the node.

use std::sync::Arc;

use qc_07_bloom_filters::BloomFilter;

use crate::domain::{ClaimedIpPort, IpTrackerError, NodeId};

/// Primary API for the validator IP tracker.
///
/// All methods take `&self`; implementations synchronize internally so a
/// single tracker can be shared across the connection manager, the gossip
/// sender and the reset scheduler.
///
/// # Example
///
/// ```rust,ignore
/// use qc_01_ip_tracker::ports::IpTrackerApi;
///
/// fn on_handshake<T: IpTrackerApi>(tracker: &T, claim: Arc<ClaimedIpPort>) {
///     if tracker.wants_connection(&claim.node_id()) {
///         tracker.connected(claim);
///     }
/// }
/// ```
pub trait IpTrackerApi: Send + Sync {
    /// Pin `node_id` as always wanted, independent of validator-set churn.
    ///
    /// Idempotent.
    fn manually_track(&self, node_id: NodeId);

    /// Whether we want a connection to `node_id`.
    ///
    /// True for current validators and manually tracked nodes.
    fn wants_connection(&self, node_id: &NodeId) -> bool;

    /// Whether `ip` could update tracked state.
    ///
    /// Cheap pre-filter: callers skip signature verification when this
    /// returns false.
    fn should_verify_ip(&self, ip: &ClaimedIpPort) -> bool;

    /// Record an IP learned via gossip.
    ///
    /// # Returns
    ///
    /// - `true` if the claim became the most recent IP for its node
    /// - `false` for non-validators and claims that are not strictly newer
    fn add_ip(&self, ip: Arc<ClaimedIpPort>) -> bool;

    /// Most recent known IP for `node_id`.
    fn get_ip(&self, node_id: &NodeId) -> Option<Arc<ClaimedIpPort>>;

    /// Record a live connection established with `ip`.
    fn connected(&self, ip: Arc<ClaimedIpPort>);

    /// Record that the connection to `node_id` closed.
    fn disconnected(&self, node_id: &NodeId);

    /// Select up to `max` gossipable IPs for a peer.
    ///
    /// Skips `except_node_id` (normally the receiving peer) and any claim
    /// whose gossip id is in the peer's `except_ips` filter under `salt`.
    /// Never blocks on anything but the state lock and never fails.
    fn get_gossipable_ips(
        &self,
        except_node_id: &NodeId,
        except_ips: &BloomFilter,
        salt: &[u8],
        max: usize,
    ) -> Vec<Arc<ClaimedIpPort>>;

    /// Replace the bloom filter generation.
    ///
    /// # Errors
    ///
    /// Salt generation or filter sizing failed; the previous generation
    /// stays in effect.
    fn reset_bloom(&self) -> Result<(), IpTrackerError>;

    /// Serialized bloom filter and its salt, for advertising to peers.
    fn bloom(&self) -> Result<(Vec<u8>, Vec<u8>), IpTrackerError>;
}

/// Observer of validator-set changes.
///
/// Invoked synchronously by the validator-set owner.
pub trait ValidatorSetListener: Send + Sync {
    /// `node_id` joined the validator set
    fn on_validator_added(
        &self,
        node_id: NodeId,
        public_key: Option<&[u8]>,
        tx_id: [u8; 32],
        weight: u64,
    );

    /// `node_id`'s stake weight changed
    fn on_validator_weight_changed(&self, node_id: NodeId, old_weight: u64, new_weight: u64);

    /// `node_id` left the validator set
    fn on_validator_removed(&self, node_id: NodeId, weight: u64);
}
