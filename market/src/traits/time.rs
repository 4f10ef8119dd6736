//! Clock abstraction for testable expiry checks.

use chrono::{DateTime, Utc};

/// Trait for providing the current wall-clock instant.
///
/// Expiry filtering reads the clock once per fetch; injecting it lets tests
/// pin "now" to a fixed instant.
pub trait TimeProvider: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Production implementation backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl SystemTimeProvider {
    pub const fn new() -> Self {
        Self
    }
}
