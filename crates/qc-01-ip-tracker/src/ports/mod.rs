//! # Ports Layer
//!
//! - **Driving Ports (Inbound):** the tracker API used by the connection
//!   manager and gossip sender, and the validator-set listener
//! - **Driven Ports (Outbound):** salt randomness and configuration

pub mod inbound;
pub mod outbound;

pub use inbound::{IpTrackerApi, ValidatorSetListener};
pub use outbound::{ConfigProvider, RandomnessError, SaltSource};
