use tracing::debug;

use crate::domain::NodeId;
use crate::ports::ValidatorSetListener;
use crate::service::IpTracker;

impl ValidatorSetListener for IpTracker {
    fn on_validator_added(
        &self,
        node_id: NodeId,
        _public_key: Option<&[u8]>,
        _tx_id: [u8; 32],
        _weight: u64,
    ) {
        let mut state = self.state.write();
        self.on_validator_added_locked(&mut state, node_id);
        self.record_state(&state);
    }

    // Weight does not affect addressing
    fn on_validator_weight_changed(&self, _node_id: NodeId, _old_weight: u64, _new_weight: u64) {}

    fn on_validator_removed(&self, node_id: NodeId, _weight: u64) {
        let mut state = self.state.write();
        if state.manually_tracked.contains(&node_id) {
            return;
        }

        state.most_recent_validator_ips.remove(&node_id);
        state.validators.remove(&node_id);
        state.gossipable.remove(&node_id);
        debug!("[qc-01] validator {} removed", node_id);
        self.record_state(&state);
    }
}
