//! Millisecond clock sources for time-windowed collections.
//!
//! The expiring collections ([`ExpiringSet`](crate::ds::ExpiringSet),
//! [`ExpiringArray`](crate::ds::ExpiringArray)) age entries against a
//! [`Clock`] rather than reading wall time directly, so expiry behavior can
//! be driven deterministically in tests.
//!
//! ## Key Components
//!
//! - [`Clock`]: Trait producing a monotonically non-decreasing millisecond
//!   reading.
//! - [`SystemClock`]: Default production clock, anchored to an [`Instant`]
//!   taken at construction so readings never move backward even if the
//!   system clock is adjusted.
//! - [`ManualClock`]: Hand-advanced clock for tests. Clones share the same
//!   underlying reading, so a test can hold a handle while the collection
//!   owns another.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let handle = clock.clone();
//!
//! handle.advance(250);
//! assert_eq!(clock.now_ms(), 250);
//! ```
//!
//! Eviction correctness in the expiring collections relies on readings never
//! decreasing between calls. Both provided clocks guarantee this; a custom
//! `Clock` implementation must as well.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A source of monotonically non-decreasing millisecond readings.
pub trait Clock {
    /// Returns the current reading in milliseconds.
    ///
    /// Successive calls must never return a smaller value than an earlier
    /// call on the same instance.
    fn now_ms(&self) -> u64;
}

/// Monotonic wall-clock milliseconds since the clock was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // u64 milliseconds cover ~584 million years of uptime.
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock for deterministic tests.
///
/// Starts at 0. Clones share the same reading.
///
/// # Example
///
/// ```
/// use evictkit::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.set(1_000);
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1_500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock reading 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reading to `ms`.
    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }

    /// Moves the reading forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemClock::default();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(42);
        assert_eq!(clock.now_ms(), 42);
        clock.set(7);
        assert_eq!(handle.now_ms(), 7);
    }
}
