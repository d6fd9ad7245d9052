//! # Adapters
//!
//! Concrete implementations of the driven ports plus the periodic reset
//! driver. The TOML loader and the tokio scheduler are feature-gated.

pub mod config;
pub mod random;

/// Periodic bloom reset driver.
/// Requires feature: `scheduler`
#[cfg(feature = "scheduler")]
pub mod scheduler;

pub use config::StaticConfigProvider;
#[cfg(feature = "config")]
pub use config::{ConfigError, TomlConfigProvider};
pub use random::OsSaltSource;
#[cfg(feature = "scheduler")]
pub use scheduler::BloomResetScheduler;
