use std::sync::Arc;

use qc_07_bloom_filters::BloomFilter;
use tracing::{debug, trace};

use crate::domain::{ClaimedIpPort, IpTrackerError, NodeId, UniformSampler};
use crate::ports::IpTrackerApi;
use crate::service::IpTracker;

impl IpTrackerApi for IpTracker {
    fn manually_track(&self, node_id: NodeId) {
        let mut state = self.state.write();
        if !state.validators.contains(&node_id) {
            self.on_validator_added_locked(&mut state, node_id);
        }
        state.manually_tracked.insert(node_id);
        self.record_state(&state);
    }

    fn wants_connection(&self, node_id: &NodeId) -> bool {
        let state = self.state.read();
        state.validators.contains(node_id) || state.manually_tracked.contains(node_id)
    }

    fn should_verify_ip(&self, ip: &ClaimedIpPort) -> bool {
        let node_id = ip.node_id();
        let state = self.state.read();
        if !state.validators.contains(&node_id) {
            return false;
        }
        match state.most_recent_validator_ips.get(&node_id) {
            None => true,
            Some(prev) => prev.timestamp() < ip.timestamp(),
        }
    }

    fn add_ip(&self, ip: Arc<ClaimedIpPort>) -> bool {
        let node_id = ip.node_id();
        let mut state = self.state.write();
        if !state.validators.contains(&node_id) {
            return false;
        }

        let prev_timestamp = state
            .most_recent_validator_ips
            .get(&node_id)
            .map(|prev| prev.timestamp());
        let Some(prev) = prev_timestamp else {
            // First IP for this validator; no connection uses it yet
            self.update_most_recent_validator_ip(&mut state, ip);
            self.record_state(&state);
            return true;
        };
        if prev >= ip.timestamp() {
            return false;
        }

        self.update_most_recent_validator_ip(&mut state, ip);
        if state.gossipable.remove(&node_id).is_some() {
            debug!("[qc-01] {} announced a newer IP, connection no longer gossipable", node_id);
        }
        self.record_state(&state);
        true
    }

    fn get_ip(&self, node_id: &NodeId) -> Option<Arc<ClaimedIpPort>> {
        self.state.read().most_recent_validator_ips.get(node_id).cloned()
    }

    fn connected(&self, ip: Arc<ClaimedIpPort>) {
        let node_id = ip.node_id();
        let mut state = self.state.write();
        state.connected.insert(node_id, ip.clone());
        if !state.validators.contains(&node_id) {
            return;
        }

        let prev_timestamp = state
            .most_recent_validator_ips
            .get(&node_id)
            .map(|prev| prev.timestamp());
        match prev_timestamp {
            None => self.update_most_recent_validator_ip(&mut state, ip.clone()),
            Some(prev) if prev > ip.timestamp() => {
                // A newer IP is known; this connection is stale
                state.gossipable.remove(&node_id);
                trace!("[qc-01] {} connected with a stale IP", node_id);
                self.record_state(&state);
                return;
            }
            Some(prev) if prev < ip.timestamp() => {
                self.update_most_recent_validator_ip(&mut state, ip.clone())
            }
            Some(_) => {}
        }

        state.gossipable.insert(ip);
        debug!("[qc-01] validator {} connected, now gossipable", node_id);
        self.record_state(&state);
    }

    fn disconnected(&self, node_id: &NodeId) {
        let mut state = self.state.write();
        state.connected.remove(node_id);
        if state.gossipable.remove(node_id).is_some() {
            debug!("[qc-01] validator {} disconnected, no longer gossipable", node_id);
        }
        self.record_state(&state);
    }

    fn get_gossipable_ips(
        &self,
        except_node_id: &NodeId,
        except_ips: &BloomFilter,
        salt: &[u8],
        max: usize,
    ) -> Vec<Arc<ClaimedIpPort>> {
        let state = self.state.read();
        let mut sampler = UniformSampler::new(state.gossipable.len());
        let mut ips = Vec::with_capacity(max.min(state.gossipable.len()));

        while ips.len() < max {
            let Some(index) = sampler.next() else {
                break;
            };
            let Some(ip) = state.gossipable.get(index) else {
                continue;
            };
            if ip.node_id() == *except_node_id {
                continue;
            }
            if !except_ips.contains_salted(ip.gossip_id(), salt) {
                ips.push(ip.clone());
            }
        }
        ips
    }

    fn reset_bloom(&self) -> Result<(), IpTrackerError> {
        self.reset_bloom_inner()
    }

    fn bloom(&self) -> Result<(Vec<u8>, Vec<u8>), IpTrackerError> {
        self.bloom_snapshot()
    }
}
