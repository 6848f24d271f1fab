//! # Injectable Time Source
//!
//! Every expiry decision in Rentgate depends on "now", so "now" is a
//! dependency, not an ambient call. Production wires [`SystemClock`];
//! tests wire [`FixedClock`] and advance it by hand to walk an entitlement
//! across its expiry boundary or a cache across its TTL.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::temporal::Timestamp;

/// A source of the current instant.
///
/// Implementations must be `Send + Sync`; clocks are shared across async
/// tasks behind an `Arc`.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at a settable instant, for deterministic tests.
///
/// Cloning shares the underlying instant: advancing one handle advances
/// every clone, so a test can hold one handle while the code under test
/// holds another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<Mutex<Timestamp>>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`.
    pub fn at(instant: Timestamp) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut guard = self.instant.lock();
        *guard = Timestamp::from_utc(*guard.as_datetime() + Duration::seconds(secs));
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.instant.lock();
        *guard = guard.plus_days(days);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        *self.instant.lock() = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.instant.lock()
    }
}
