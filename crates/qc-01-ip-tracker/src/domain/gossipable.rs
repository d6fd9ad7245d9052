//! Gossipable IP set.
//!
//! Dense vector of claims plus a `NodeId -> index` map. Removal moves the
//! last claim into the vacated slot, so every operation is O(1) and the
//! vector never has holes. Order is not preserved; gossip selection samples
//! positions uniformly, so order carries no meaning.

use std::collections::HashMap;
use std::sync::Arc;

use super::entities::{ClaimedIpPort, NodeId};

/// Claims currently eligible to be gossiped
#[derive(Debug, Default, Clone)]
pub struct GossipableSet {
    ips: Vec<Arc<ClaimedIpPort>>,
    indices: HashMap<NodeId, usize>,
}

impl GossipableSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gossipable claims
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// Whether no claim is gossipable
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Whether `node_id` is gossipable
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.indices.contains_key(node_id)
    }

    /// Claim at `index`
    pub fn get(&self, index: usize) -> Option<&Arc<ClaimedIpPort>> {
        self.ips.get(index)
    }

    /// Claim gossiped for `node_id`
    pub fn get_by_node(&self, node_id: &NodeId) -> Option<&Arc<ClaimedIpPort>> {
        self.indices.get(node_id).map(|&i| &self.ips[i])
    }

    /// Position of `node_id` in the dense vector
    pub fn index_of(&self, node_id: &NodeId) -> Option<usize> {
        self.indices.get(node_id).copied()
    }

    /// Mark `ip` gossipable.
    ///
    /// A node holds at most one slot: inserting for a node that is already
    /// present replaces its claim in place.
    pub fn insert(&mut self, ip: Arc<ClaimedIpPort>) {
        let node_id = ip.node_id();
        if let Some(&index) = self.indices.get(&node_id) {
            self.ips[index] = ip;
            return;
        }
        self.indices.insert(node_id, self.ips.len());
        self.ips.push(ip);
    }

    /// Remove `node_id`, returning its claim if it was gossipable
    pub fn remove(&mut self, node_id: &NodeId) -> Option<Arc<ClaimedIpPort>> {
        let index = self.indices.remove(node_id)?;
        let last = self.ips.len() - 1;
        if index != last {
            let replacement = self.ips[last].node_id();
            self.indices.insert(replacement, index);
        }
        Some(self.ips.swap_remove(index))
    }

    /// Check the vector/index bijection.
    ///
    /// Used by tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        self.ips.len() == self.indices.len()
            && self
                .ips
                .iter()
                .enumerate()
                .all(|(i, ip)| self.indices.get(&ip.node_id()) == Some(&i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IpAddr, SocketAddr, Timestamp};

    fn make_ip(id: u8, ts: u64) -> Arc<ClaimedIpPort> {
        Arc::new(ClaimedIpPort::new(
            NodeId::new([id; 32]),
            SocketAddr::new(IpAddr::v4(10, 0, 0, id), 9651),
            Timestamp::new(ts),
            Vec::new(),
        ))
    }

    #[test]
    fn test_insert_appends() {
        let mut set = GossipableSet::new();
        set.insert(make_ip(1, 1));
        set.insert(make_ip(2, 1));

        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(&NodeId::new([1; 32])), Some(0));
        assert_eq!(set.index_of(&NodeId::new([2; 32])), Some(1));
        assert!(set.is_consistent());
    }

    #[test]
    fn test_insert_existing_replaces_in_place() {
        let mut set = GossipableSet::new();
        set.insert(make_ip(1, 1));
        set.insert(make_ip(2, 1));
        set.insert(make_ip(1, 5));

        assert_eq!(set.len(), 2);
        let node = NodeId::new([1; 32]);
        assert_eq!(set.index_of(&node), Some(0));
        assert_eq!(set.get_by_node(&node).unwrap().timestamp(), Timestamp::new(5));
        assert!(set.is_consistent());
    }

    #[test]
    fn test_remove_middle_moves_last() {
        let mut set = GossipableSet::new();
        for id in 1..=3 {
            set.insert(make_ip(id, 1));
        }

        let removed = set.remove(&NodeId::new([1; 32]));
        assert!(removed.is_some());
        assert_eq!(set.len(), 2);
        // Node 3 was last and now fills slot 0
        assert_eq!(set.index_of(&NodeId::new([3; 32])), Some(0));
        assert_eq!(set.index_of(&NodeId::new([2; 32])), Some(1));
        assert!(set.is_consistent());
    }

    #[test]
    fn test_remove_last() {
        let mut set = GossipableSet::new();
        set.insert(make_ip(1, 1));
        set.insert(make_ip(2, 1));

        set.remove(&NodeId::new([2; 32]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.index_of(&NodeId::new([1; 32])), Some(0));
        assert!(set.is_consistent());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = GossipableSet::new();
        set.insert(make_ip(1, 1));

        assert!(set.remove(&NodeId::new([9; 32])).is_none());
        assert_eq!(set.len(), 1);
        assert!(set.is_consistent());
    }

    #[test]
    fn test_remove_only_element() {
        let mut set = GossipableSet::new();
        set.insert(make_ip(1, 1));
        set.remove(&NodeId::new([1; 32]));

        assert!(set.is_empty());
        assert!(set.is_consistent());
    }
}
