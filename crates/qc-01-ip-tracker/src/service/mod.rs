//! # IP Tracker Service
//!
//! `IpTracker` implements the `IpTrackerApi` and `ValidatorSetListener`
//! ports on top of the domain types, holding all state under a single
//! `parking_lot::RwLock`.

mod api;
mod core;
mod events;
mod maintenance;

pub use self::core::IpTracker;
pub use maintenance::IpTrackerStats;
