//! Insertion-ordered sequence whose entries expire after a fixed window.
//!
//! Unlike [`ExpiringSet`](crate::ds::ExpiringSet) this keeps duplicates and
//! preserves push order; it is a rolling window over a stream of events
//! rather than a membership test. Every operation sweeps expired entries off
//! the front first, so traversals only ever see live entries.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      ExpiringArray<T, C>                         │
//!   │                                                                  │
//!   │   entries: VecDeque<(u64, T)>    (timestamp, value), push order  │
//!   │   ttl_ms: u64                    clock: C                        │
//!   │                                                                  │
//!   │   front ── oldest ──────────────────────── newest ── back        │
//!   │        (sweep pops here)              (push lands here)          │
//!   │                                                                  │
//!   │   Timestamps are non-decreasing front to back, so expiry is      │
//!   │   always a prefix and the sweep stops at the first live entry.   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::clock::ManualClock;
//! use evictkit::ds::ExpiringArray;
//!
//! let clock = ManualClock::new();
//! let mut events = ExpiringArray::with_clock(1_000, clock.clone());
//!
//! events.push("boot");
//! clock.advance(600);
//! events.push("ready");
//!
//! clock.advance(600); // "boot" is now 1 200 ms old
//! assert_eq!(events.to_vec(), vec!["ready"]);
//! assert_eq!(events.len(), 1);
//! ```
//!
//! An entry expires when its age strictly exceeds the window; at exactly
//! `age == ttl` it is still reported.

use std::collections::VecDeque;

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;

/// Rolling time window over a stream of pushed values.
pub struct ExpiringArray<T, C = SystemClock> {
    entries: VecDeque<(u64, T)>,
    ttl_ms: u64,
    clock: C,
}

impl<T> ExpiringArray<T> {
    /// Creates an array whose entries live for `ttl_ms` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `ttl_ms` is zero. Use [`try_new`](Self::try_new) to handle
    /// invalid windows without panicking.
    pub fn new(ttl_ms: u64) -> Self {
        match Self::try_new(ttl_ms) {
            Ok(array) => array,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an array whose entries live for `ttl_ms` milliseconds.
    ///
    /// Returns a [`ConfigError`] if `ttl_ms` is zero.
    pub fn try_new(ttl_ms: u64) -> Result<Self, ConfigError> {
        Self::try_with_clock(ttl_ms, SystemClock::default())
    }
}

impl<T, C: Clock> ExpiringArray<T, C> {
    /// Creates an array driven by a caller-supplied clock.
    ///
    /// # Panics
    ///
    /// Panics if `ttl_ms` is zero.
    pub fn with_clock(ttl_ms: u64, clock: C) -> Self {
        match Self::try_with_clock(ttl_ms, clock) {
            Ok(array) => array,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an array driven by a caller-supplied clock.
    ///
    /// Returns a [`ConfigError`] if `ttl_ms` is zero.
    pub fn try_with_clock(ttl_ms: u64, clock: C) -> Result<Self, ConfigError> {
        if ttl_ms == 0 {
            return Err(ConfigError::new("ttl must be greater than zero"));
        }
        Ok(Self {
            entries: VecDeque::new(),
            ttl_ms,
            clock,
        })
    }

    /// Returns the configured window in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Appends `item` stamped with the current time. Returns the number of
    /// live entries after the push.
    pub fn push(&mut self, item: T) -> usize {
        self.evict_expired();
        self.entries.push_back((self.clock.now_ms(), item));
        self.entries.len()
    }

    /// Returns the number of live entries.
    pub fn len(&mut self) -> usize {
        self.evict_expired();
        self.entries.len()
    }

    /// Returns `true` if there are no live entries.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Returns the oldest live entry.
    pub fn first(&mut self) -> Option<&T> {
        self.evict_expired();
        self.entries.front().map(|(_, item)| item)
    }

    /// Returns the newest live entry.
    pub fn last(&mut self) -> Option<&T> {
        self.evict_expired();
        self.entries.back().map(|(_, item)| item)
    }

    /// Iterates live entries oldest→newest.
    pub fn iter(&mut self) -> impl Iterator<Item = &T> {
        self.evict_expired();
        self.entries.iter().map(|(_, item)| item)
    }

    /// Iterates live entries newest→oldest.
    pub fn iter_rev(&mut self) -> impl Iterator<Item = &T> {
        self.evict_expired();
        self.entries.iter().rev().map(|(_, item)| item)
    }

    /// Iterates live entries oldest→newest together with their insertion
    /// timestamps in milliseconds.
    pub fn iter_with_ts(&mut self) -> impl Iterator<Item = (u64, &T)> {
        self.evict_expired();
        self.entries.iter().map(|(ts, item)| (*ts, item))
    }

    /// Collects the live entries into a `Vec`, oldest first.
    pub fn to_vec(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        self.evict_expired();
        self.entries.iter().map(|(_, item)| item.clone()).collect()
    }

    /// Calls `f` for each live entry, oldest first.
    pub fn for_each(&mut self, mut f: impl FnMut(&T)) {
        self.evict_expired();
        for (_, item) in &self.entries {
            f(item);
        }
    }

    /// Maps each live entry oldest→newest.
    pub fn map<U>(&mut self, mut f: impl FnMut(&T) -> U) -> Vec<U> {
        self.evict_expired();
        self.entries.iter().map(|(_, item)| f(item)).collect()
    }

    /// Returns the live entries matching `predicate`, oldest first.
    pub fn filter(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<&T> {
        self.evict_expired();
        self.entries
            .iter()
            .map(|(_, item)| item)
            .filter(|&item| predicate(item))
            .collect()
    }

    /// Returns the oldest live entry matching `predicate`.
    pub fn find(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.evict_expired();
        self.entries
            .iter()
            .map(|(_, item)| item)
            .find(|&item| predicate(item))
    }

    /// Returns the logical position (0 = oldest) of the oldest live entry
    /// matching `predicate`.
    pub fn find_index(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.evict_expired();
        self.entries.iter().position(|(_, item)| predicate(item))
    }

    /// Drops every entry immediately.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pops entries off the front while their age strictly exceeds the
    /// window. Timestamps are non-decreasing, so the first live entry ends
    /// the sweep.
    fn evict_expired(&mut self) {
        let now = self.clock.now_ms();
        while let Some(&(ts, _)) = self.entries.front() {
            if now.saturating_sub(ts) <= self.ttl_ms {
                break;
            }
            self.entries.pop_front();
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut prev = 0u64;
        for &(ts, _) in &self.entries {
            assert!(ts >= prev, "timestamps must be non-decreasing");
            prev = ts;
        }
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for ExpiringArray<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringArray")
            .field("ttl_ms", &self.ttl_ms)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn array_with_clock(ttl_ms: u64) -> (ExpiringArray<&'static str, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let array = ExpiringArray::with_clock(ttl_ms, clock.clone());
        (array, clock)
    }

    #[test]
    fn expiring_array_push_reports_live_count() {
        let (mut events, clock) = array_with_clock(1_000);

        assert_eq!(events.push("a"), 1);
        clock.set(500);
        assert_eq!(events.push("b"), 2);

        // "a" ages out before this push is counted.
        clock.set(1_200);
        assert_eq!(events.push("c"), 2);
    }

    #[test]
    fn expiring_array_rolling_window_drops_oldest_prefix() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("a");
        clock.set(400);
        events.push("b");
        clock.set(800);
        events.push("c");

        clock.set(1_300);
        assert_eq!(events.to_vec(), vec!["b", "c"]);

        clock.set(1_700);
        assert_eq!(events.to_vec(), vec!["c"]);

        clock.set(2_000);
        assert!(events.is_empty());
    }

    #[test]
    fn expiring_array_age_equal_to_ttl_is_still_live() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("a");
        clock.set(1_000);
        assert_eq!(events.len(), 1);

        clock.set(1_001);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn expiring_array_keeps_duplicates_in_push_order() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("x");
        clock.set(100);
        events.push("x");
        clock.set(200);
        events.push("y");

        assert_eq!(events.to_vec(), vec!["x", "x", "y"]);

        let backward: Vec<_> = events.iter_rev().copied().collect();
        assert_eq!(backward, vec!["y", "x", "x"]);
    }

    #[test]
    fn expiring_array_first_and_last_track_window_edges() {
        let (mut events, clock) = array_with_clock(1_000);

        assert_eq!(events.first(), None);
        assert_eq!(events.last(), None);

        events.push("a");
        clock.set(600);
        events.push("b");

        assert_eq!(events.first(), Some(&"a"));
        assert_eq!(events.last(), Some(&"b"));

        clock.set(1_200);
        assert_eq!(events.first(), Some(&"b"));
        assert_eq!(events.last(), Some(&"b"));
    }

    #[test]
    fn expiring_array_iter_with_ts_exposes_insertion_times() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("a");
        clock.set(250);
        events.push("b");

        let stamped: Vec<_> = events.iter_with_ts().map(|(ts, item)| (ts, *item)).collect();
        assert_eq!(stamped, vec![(0, "a"), (250, "b")]);
    }

    #[test]
    fn expiring_array_search_helpers_only_see_live_entries() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("apple");
        clock.set(500);
        events.push("banana");
        events.push("avocado");

        clock.set(1_200); // "apple" expired
        assert_eq!(events.find(|item| item.starts_with('a')), Some(&"avocado"));
        assert_eq!(events.find_index(|item| item.starts_with('a')), Some(1));
        assert_eq!(events.find(|item| item.starts_with('z')), None);
        assert_eq!(events.filter(|item| item.len() > 5), vec![&"banana", &"avocado"]);
    }

    #[test]
    fn expiring_array_map_and_for_each_traverse_oldest_first() {
        let (mut events, clock) = array_with_clock(1_000);

        events.push("a");
        clock.set(100);
        events.push("bb");

        assert_eq!(events.map(|item| item.len()), vec![1, 2]);

        let mut seen = Vec::new();
        events.for_each(|item| seen.push(*item));
        assert_eq!(seen, vec!["a", "bb"]);
    }

    #[test]
    fn expiring_array_clear_drops_everything() {
        let (mut events, _clock) = array_with_clock(1_000);

        events.push("a");
        events.push("b");
        events.clear();

        assert!(events.is_empty());
        assert_eq!(events.to_vec(), Vec::<&str>::new());
        events.debug_validate_invariants();
    }

    #[test]
    fn expiring_array_zero_ttl_is_rejected() {
        let err = ExpiringArray::<u32>::try_new(0).unwrap_err();
        assert!(err.to_string().contains("ttl"));
    }

    #[test]
    #[should_panic(expected = "ttl")]
    fn expiring_array_new_zero_ttl_panics() {
        let _ = ExpiringArray::<u32>::new(0);
    }

    #[test]
    fn expiring_array_churn_preserves_invariants() {
        let clock = ManualClock::new();
        let mut events = ExpiringArray::with_clock(50, clock.clone());

        for round in 0u64..500 {
            clock.set(round * 3);
            events.push(round);
            events.debug_validate_invariants();
            assert!(events.to_vec().iter().all(|&item| item * 3 + 50 >= round * 3));
        }
    }
}
