//! One generation of the validator IP bloom filter.
//!
//! A generation is the filter, the salt it was built with, the per-node
//! insertion counts and the insertion ceiling. Resets build a complete new
//! generation and swap it in; nothing is carried over from the old one.

use std::collections::HashMap;

use qc_07_bloom_filters::{estimate_count, BloomFilter};

use super::config::IpTrackerConfig;
use super::entities::{ClaimedIpPort, NodeId};
use super::errors::IpTrackerError;

/// Result of offering a claim to the current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomAddition {
    /// The claim's gossip id was inserted
    Added,
    /// The node already used its insertions for this generation
    NodeCapReached,
    /// The filter hit its ceiling; the caller must reset before inserting
    FilterFull,
}

/// Bloom filter generation over the most recent validator IPs
#[derive(Debug, Clone)]
pub struct ValidatorBloom {
    filter: BloomFilter,
    salt: Vec<u8>,
    additions: HashMap<NodeId, usize>,
    max_count: usize,
    max_entries_per_node: usize,
}

impl ValidatorBloom {
    /// Build a generation sized for `validator_count` and seeded with `ips`.
    ///
    /// Every seeded claim counts as one insertion for its node.
    pub fn build<'a, I>(
        config: &IpTrackerConfig,
        salt: Vec<u8>,
        validator_count: usize,
        ips: I,
    ) -> Result<Self, IpTrackerError>
    where
        I: IntoIterator<Item = &'a ClaimedIpPort>,
    {
        let count = config
            .max_ip_entries_per_validator
            .saturating_mul(validator_count)
            .max(config.min_count_estimate);
        let mut filter =
            BloomFilter::new_with_fpr(count, config.target_false_positive_probability)?;
        let max_count = estimate_count(
            filter.hash_count(),
            filter.size_bits(),
            config.max_false_positive_probability,
        );

        let mut additions = HashMap::new();
        for ip in ips {
            filter.insert_salted(ip.gossip_id(), &salt);
            additions.insert(ip.node_id(), 1);
        }

        Ok(Self {
            filter,
            salt,
            additions,
            max_count,
            max_entries_per_node: config.max_ip_entries_per_validator,
        })
    }

    /// Offer `ip` to the filter, respecting the per-node and global caps
    pub fn try_add(&mut self, ip: &ClaimedIpPort) -> BloomAddition {
        let node_id = ip.node_id();
        let old_count = self.additions.get(&node_id).copied().unwrap_or(0);
        if old_count >= self.max_entries_per_node {
            return BloomAddition::NodeCapReached;
        }
        if self.filter.count() >= self.max_count {
            return BloomAddition::FilterFull;
        }

        self.additions.insert(node_id, old_count + 1);
        self.filter.insert_salted(ip.gossip_id(), &self.salt);
        BloomAddition::Added
    }

    /// The filter
    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    /// Salt mixed into every insertion of this generation
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Total insertions in this generation
    pub fn count(&self) -> usize {
        self.filter.count()
    }

    /// Insertions allowed before a reset is forced
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Insertions made for `node_id` in this generation
    pub fn additions(&self, node_id: &NodeId) -> usize {
        self.additions.get(node_id).copied().unwrap_or(0)
    }

    /// Whether `ip`'s gossip id is (probably) in the filter
    pub fn contains(&self, ip: &ClaimedIpPort) -> bool {
        self.filter.contains_salted(ip.gossip_id(), &self.salt)
    }
}
