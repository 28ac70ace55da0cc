//! Shared health state for the /health endpoint. Reference tables are
//! immutable after startup, so health is mostly counters plus uptime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct HealthState {
    started_at: Instant,
    /// Recommendation requests served since startup.
    recommendations_served: AtomicU64,
    /// SMS webhook messages handled since startup.
    sms_handled: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            recommendations_served: AtomicU64::new(0),
            sms_handled: AtomicU64::new(0),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn inc_recommendations(&self) {
        self.recommendations_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn recommendations_served(&self) -> u64 {
        self.recommendations_served.load(Ordering::Relaxed)
    }

    pub fn inc_sms(&self) {
        self.sms_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sms_handled(&self) -> u64 {
        self.sms_handled.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
