//! # Validator IP Tracker
//!
//! **Subsystem ID:** 1
//!
//! Concurrent in-memory index of validator network addresses. The tracker
//! records which validator is reachable where and since when, decides
//! which connected validators are worth gossiping to other peers, and keeps
//! a salted bloom filter of the addresses it already knows so peers can
//! skip re-sending them.
//!
//! ## Architecture
//!
//! - **Domain Layer:** claims, gossipable set, sampler, bloom generations
//! - **Ports Layer:** `IpTrackerApi`, `ValidatorSetListener`, `SaltSource`
//! - **Service Layer:** `IpTracker`, all state under one `RwLock`
//! - **Adapters Layer:** OS salt source, config providers, reset scheduler
//!
//! Feature flags:
//!
//! - `config` - TOML config loading (serde, toml)
//! - `scheduler` - periodic bloom reset task (tokio)
//! - `test-utils` - deterministic salt sources
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qc_01_ip_tracker::{
//!     ClaimedIpPort, IpAddr, IpTracker, IpTrackerApi, IpTrackerConfig, NodeId,
//!     OsSaltSource, SocketAddr, Timestamp, ValidatorSetListener,
//! };
//! use qc_07_bloom_filters::BloomFilter;
//!
//! let tracker = IpTracker::new(IpTrackerConfig::default(), Arc::new(OsSaltSource)).unwrap();
//!
//! let validator = NodeId::new([1u8; 32]);
//! tracker.on_validator_added(validator, None, [0u8; 32], 100);
//!
//! let claim = Arc::new(ClaimedIpPort::new(
//!     validator,
//!     SocketAddr::new(IpAddr::v4(192, 168, 1, 100), 9651),
//!     Timestamp::new(1000),
//!     Vec::new(),
//! ));
//! tracker.connected(claim);
//!
//! // A peer that knows nothing yet gets the validator's IP
//! let peer_filter = BloomFilter::new(64, 1).unwrap();
//! let ips = tracker.get_gossipable_ips(&NodeId::new([2u8; 32]), &peer_filter, &[], 10);
//! assert_eq!(ips.len(), 1);
//!
//! // Our own filter, to advertise to peers
//! let (filter, salt) = tracker.bloom().unwrap();
//! assert!(!filter.is_empty());
//! assert_eq!(salt.len(), 32);
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

/// Test utilities (FixedSaltSource, FailingSaltSource)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Domain
pub use domain::{
    BloomAddition, ClaimedIpPort, GossipId, GossipableSet, IpAddr, IpTrackerConfig,
    IpTrackerError, NodeId, SocketAddr, Timestamp, UniformSampler, ValidatorBloom,
};

// Ports
pub use ports::{ConfigProvider, IpTrackerApi, RandomnessError, SaltSource, ValidatorSetListener};

// Service
pub use service::{IpTracker, IpTrackerStats};

// Metrics
pub use metrics::{IpTrackerMetrics, IpTrackerMetricsSnapshot};

// Adapters
pub use adapters::{OsSaltSource, StaticConfigProvider};
#[cfg(feature = "config")]
pub use adapters::{ConfigError, TomlConfigProvider};
#[cfg(feature = "scheduler")]
pub use adapters::BloomResetScheduler;
