//! Test utilities for the IP tracker.
//!
//! Deterministic salt sources. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use qc_01_ip_tracker::test_utils::FixedSaltSource;
//! use qc_01_ip_tracker::SaltSource;
//!
//! let source = FixedSaltSource::new(7);
//! assert_eq!(source.generate_salt(4).unwrap(), vec![7, 7, 7, 7]);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::ports::outbound::{RandomnessError, SaltSource};

/// A salt source that fills every salt with one byte value.
///
/// Each call advances the byte so consecutive generations differ.
#[derive(Debug)]
pub struct FixedSaltSource {
    next: AtomicU8,
    advance: bool,
}

impl FixedSaltSource {
    /// Always produce salts filled with `byte`.
    pub fn new(byte: u8) -> Self {
        Self {
            next: AtomicU8::new(byte),
            advance: false,
        }
    }

    /// Start at `byte` and increment it on every call.
    pub fn incrementing(byte: u8) -> Self {
        Self {
            next: AtomicU8::new(byte),
            advance: true,
        }
    }
}

impl SaltSource for FixedSaltSource {
    fn generate_salt(&self, len: usize) -> Result<Vec<u8>, RandomnessError> {
        let byte = if self.advance {
            self.next.fetch_add(1, Ordering::Relaxed)
        } else {
            self.next.load(Ordering::Relaxed)
        };
        Ok(vec![byte; len])
    }
}

/// A salt source that can be switched into failure.
///
/// While working, each call yields a different salt.
#[derive(Debug, Default)]
pub struct FailingSaltSource {
    failing: AtomicBool,
    counter: AtomicU8,
}

impl FailingSaltSource {
    /// Starts out working.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out failing.
    pub fn failing() -> Self {
        Self {
            failing: AtomicBool::new(true),
            counter: AtomicU8::new(0),
        }
    }

    /// Switch failure on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl SaltSource for FailingSaltSource {
    fn generate_salt(&self, len: usize) -> Result<Vec<u8>, RandomnessError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RandomnessError("entropy source unavailable".to_string()));
        }
        Ok(vec![self.counter.fetch_add(1, Ordering::SeqCst); len])
    }
}
