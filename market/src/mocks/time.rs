//! Mock clock for testing.

use crate::traits::TimeProvider;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Mock clock with a controllable instant (millisecond resolution).
#[derive(Debug, Clone)]
pub struct MockTime {
    current_millis: Arc<AtomicI64>,
}

impl MockTime {
    /// Create a mock clock at the given instant.
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current_millis: Arc::new(AtomicI64::new(initial.timestamp_millis())),
        }
    }

    /// Create a mock clock at 2024-01-01 00:00:00 UTC.
    pub fn default_time() -> Self {
        let new_year_2024 = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default();
        Self::new(new_year_2024)
    }

    /// Set the current instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.current_millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock forward (or back, for negative durations).
    pub fn advance(&self, by: Duration) {
        self.current_millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Default for MockTime {
    fn default() -> Self {
        Self::default_time()
    }
}

impl TimeProvider for MockTime {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.current_millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}
