//! Domain Layer - Pure tracking logic with no I/O
//!
//! - Claimed IP entities and gossip ids
//! - Gossipable set (dense vector with swap-remove)
//! - Uniform sampler for gossip selection
//! - Validator bloom filter generations

pub mod config;
pub mod entities;
pub mod errors;
pub mod gossipable;
pub mod sampler;
pub mod validator_bloom;

pub use config::IpTrackerConfig;
pub use entities::{ClaimedIpPort, GossipId, IpAddr, NodeId, SocketAddr, Timestamp};
pub use errors::IpTrackerError;
pub use gossipable::GossipableSet;
pub use sampler::UniformSampler;
pub use validator_bloom::{BloomAddition, ValidatorBloom};
