//! Periodic bloom filter reset driver.
//!
//! The tracker never resets its filter on its own clock. This adapter owns
//! the interval and calls [`IpTrackerApi::reset_bloom`] on every tick until
//! shutdown is signalled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::domain::IpTrackerConfig;
use crate::ports::IpTrackerApi;

/// Calls `reset_bloom` on a fixed period.
pub struct BloomResetScheduler<T: ?Sized> {
    tracker: Arc<T>,
    period: Duration,
}

impl<T> BloomResetScheduler<T>
where
    T: IpTrackerApi + ?Sized + 'static,
{
    /// Reset `tracker` every `period`.
    pub fn new(tracker: Arc<T>, period: Duration) -> Self {
        Self { tracker, period }
    }

    /// Reset `tracker` every `bloom_reset_interval_secs`.
    pub fn from_config(tracker: Arc<T>, config: &IpTrackerConfig) -> Self {
        Self::new(tracker, Duration::from_secs(config.bloom_reset_interval_secs))
    }

    /// Configured period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Perform one reset, logging failure. Returns whether it succeeded.
    pub fn reset_once(&self) -> bool {
        match self.tracker.reset_bloom() {
            Ok(()) => {
                debug!("[qc-01] scheduled bloom reset complete");
                true
            }
            Err(e) => {
                warn!("[qc-01] scheduled bloom reset failed, keeping previous filter: {}", e);
                false
            }
        }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The first reset happens one period after start. Returns the number of
    /// successful resets.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> u64 {
        if self.period.is_zero() {
            warn!("[qc-01] bloom reset scheduler disabled (zero period)");
            return 0;
        }

        info!(
            "[qc-01] starting bloom reset scheduler (period_secs={})",
            self.period.as_secs()
        );

        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut resets = 0;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if self.reset_once() {
                        resets += 1;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[qc-01] bloom reset scheduler shutting down");
                        break;
                    }
                }
            }
        }
        resets
    }

    /// Spawn [`run`](Self::run) on the current tokio runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<u64>
    where
        T: Send + Sync,
    {
        tokio::spawn(self.run(shutdown))
    }
}
