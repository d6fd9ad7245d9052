//! Metrics for the IP tracker
//!
//! Gauges mirror the tracker state after each mutation; counters record
//! bloom filter resets. Everything is lock-free so exporters can read
//! without touching the tracker's state lock.
//!
//! ## Usage
//!
//! ```ignore
//! let tracker = IpTracker::new(config, Arc::new(OsSaltSource))?;
//! let snapshot = tracker.metrics().snapshot();
//! println!("gossipable: {}", snapshot.gossipable_ips);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the IP tracker
#[derive(Debug, Default)]
pub struct IpTrackerMetrics {
    /// Nodes with a most recent known IP
    pub tracked_ips: AtomicU64,
    /// Claims currently eligible for gossip
    pub gossipable_ips: AtomicU64,
    /// Validators tracked (manually tracked nodes included)
    pub validators: AtomicU64,
    /// Insertions in the current bloom generation
    pub bloom_count: AtomicU64,
    /// Insertion ceiling of the current bloom generation
    pub bloom_max_count: AtomicU64,
    /// Successful bloom resets
    pub bloom_resets: AtomicU64,
    /// Bloom resets that left the previous generation in place
    pub bloom_reset_failures: AtomicU64,
}

impl IpTrackerMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sizes of the tracker's state
    pub fn record_state(&self, tracked: usize, gossipable: usize, validators: usize) {
        self.tracked_ips.store(tracked as u64, Ordering::Relaxed);
        self.gossipable_ips.store(gossipable as u64, Ordering::Relaxed);
        self.validators.store(validators as u64, Ordering::Relaxed);
    }

    /// Record the current bloom insertion count
    pub fn record_bloom_count(&self, count: usize) {
        self.bloom_count.store(count as u64, Ordering::Relaxed);
    }

    /// Record a completed reset
    pub fn record_reset(&self, count: usize, max_count: usize) {
        self.bloom_resets.fetch_add(1, Ordering::Relaxed);
        self.bloom_count.store(count as u64, Ordering::Relaxed);
        self.bloom_max_count.store(max_count as u64, Ordering::Relaxed);
    }

    /// Record a failed reset
    pub fn record_reset_failure(&self) {
        self.bloom_reset_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> IpTrackerMetricsSnapshot {
        IpTrackerMetricsSnapshot {
            tracked_ips: self.tracked_ips.load(Ordering::Relaxed),
            gossipable_ips: self.gossipable_ips.load(Ordering::Relaxed),
            validators: self.validators.load(Ordering::Relaxed),
            bloom_count: self.bloom_count.load(Ordering::Relaxed),
            bloom_max_count: self.bloom_max_count.load(Ordering::Relaxed),
            bloom_resets: self.bloom_resets.load(Ordering::Relaxed),
            bloom_reset_failures: self.bloom_reset_failures.load(Ordering::Relaxed),
        }
    }

    /// Fraction of the bloom ceiling already used
    pub fn bloom_fill_ratio(&self) -> f64 {
        let max = self.bloom_max_count.load(Ordering::Relaxed);
        if max == 0 {
            return 0.0;
        }
        self.bloom_count.load(Ordering::Relaxed) as f64 / max as f64
    }
}

/// Point-in-time copy of [`IpTrackerMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpTrackerMetricsSnapshot {
    /// Nodes with a most recent known IP
    pub tracked_ips: u64,
    /// Claims currently eligible for gossip
    pub gossipable_ips: u64,
    /// Validators tracked
    pub validators: u64,
    /// Insertions in the current bloom generation
    pub bloom_count: u64,
    /// Insertion ceiling of the current bloom generation
    pub bloom_max_count: u64,
    /// Successful bloom resets
    pub bloom_resets: u64,
    /// Failed bloom resets
    pub bloom_reset_failures: u64,
}
