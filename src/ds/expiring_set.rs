//! Set whose members silently disappear after a fixed time-to-live.
//!
//! Every mutating or reading operation first sweeps expired members, so
//! callers never observe a stale element; there is no background task. A
//! member's age restarts whenever it is re-inserted.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      ExpiringSet<T, C>                           │
//!   │                                                                  │
//!   │   members: FxHashMap<T, u64>      (element → insertion time)     │
//!   │   queue: VecDeque<(u64, T)>       (insertion-ordered records)    │
//!   │   ttl_ms: u64                     clock: C                       │
//!   │                                                                  │
//!   │   Sweep (runs before every operation):                           │
//!   │     pop front records while now − ts > ttl;                      │
//!   │     delete from members ONLY if the map timestamp matches,       │
//!   │     so a refreshed element's old record cannot evict it.         │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A refresh leaves the superseded queue record in place rather than
//! searching the queue for it; the timestamp guard makes the stale record
//! harmless and it falls off the front within one TTL window.
//!
//! ## Operations
//!
//! | Operation    | Time           | Notes                              |
//! |--------------|----------------|------------------------------------|
//! | `insert`     | O(1) amortized | Refreshes age if already present   |
//! | `contains`   | O(1) amortized | Sweeps first, then looks up        |
//! | `remove`     | O(1)           | No sweep needed                    |
//! | `len`        | O(1) amortized | Live members only                  |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::clock::ManualClock;
//! use evictkit::ds::ExpiringSet;
//!
//! let clock = ManualClock::new();
//! let mut seen = ExpiringSet::with_clock(1_000, clock.clone());
//!
//! seen.insert("req-1");
//! assert!(seen.contains(&"req-1"));
//!
//! clock.advance(1_100);
//! assert!(!seen.contains(&"req-1"));
//! assert_eq!(seen.len(), 0);
//! ```
//!
//! ## Implementation Notes
//!
//! An element expires when its age strictly exceeds the TTL; at exactly
//! `age == ttl` it is still a member. With a refreshed element the queue can
//! briefly hold more records than there are members, but never more than one
//! record per insertion call, and records older than one TTL window are
//! always gone after the next operation.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;

/// Hash set with per-member time-to-live and lazy, inline expiry.
pub struct ExpiringSet<T, C = SystemClock> {
    members: FxHashMap<T, u64>,
    queue: VecDeque<(u64, T)>,
    ttl_ms: u64,
    clock: C,
}

impl<T: Eq + Hash + Clone> ExpiringSet<T> {
    /// Creates a set whose members live for `ttl_ms` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `ttl_ms` is zero. Use [`try_new`](Self::try_new) to handle
    /// invalid windows without panicking.
    pub fn new(ttl_ms: u64) -> Self {
        match Self::try_new(ttl_ms) {
            Ok(set) => set,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a set whose members live for `ttl_ms` milliseconds.
    ///
    /// Returns a [`ConfigError`] if `ttl_ms` is zero.
    pub fn try_new(ttl_ms: u64) -> Result<Self, ConfigError> {
        Self::try_with_clock(ttl_ms, SystemClock::default())
    }
}

impl<T: Eq + Hash + Clone, C: Clock> ExpiringSet<T, C> {
    /// Creates a set driven by a caller-supplied clock.
    ///
    /// # Panics
    ///
    /// Panics if `ttl_ms` is zero.
    pub fn with_clock(ttl_ms: u64, clock: C) -> Self {
        match Self::try_with_clock(ttl_ms, clock) {
            Ok(set) => set,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a set driven by a caller-supplied clock.
    ///
    /// Returns a [`ConfigError`] if `ttl_ms` is zero.
    pub fn try_with_clock(ttl_ms: u64, clock: C) -> Result<Self, ConfigError> {
        if ttl_ms == 0 {
            return Err(ConfigError::new("ttl must be greater than zero"));
        }
        Ok(Self {
            members: FxHashMap::default(),
            queue: VecDeque::new(),
            ttl_ms,
            clock,
        })
    }

    /// Returns the configured time-to-live in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Inserts `item`, restarting its age if it was already a member.
    /// Returns `true` if the item was not previously a live member.
    pub fn insert(&mut self, item: T) -> bool {
        self.evict_expired();
        let now = self.clock.now_ms();
        self.queue.push_back((now, item.clone()));
        self.members.insert(item, now).is_none()
    }

    /// Inserts every item from `items`, refreshing any existing members.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.evict_expired();
        let now = self.clock.now_ms();
        for item in items {
            self.queue.push_back((now, item.clone()));
            self.members.insert(item, now);
        }
    }

    /// Returns `true` if `item` is a live member.
    pub fn contains(&mut self, item: &T) -> bool {
        self.evict_expired();
        self.members.contains_key(item)
    }

    /// Removes `item` before its TTL elapses. Returns `true` if it was a
    /// live member.
    ///
    /// The queue record is left behind; the timestamp guard in the sweep
    /// keeps it from affecting any later insertion of the same item.
    pub fn remove(&mut self, item: &T) -> bool {
        self.members.remove(item).is_some()
    }

    /// Returns the number of live members.
    pub fn len(&mut self) -> usize {
        self.evict_expired();
        self.members.len()
    }

    /// Returns `true` if there are no live members.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Drops every member and pending record immediately.
    pub fn clear(&mut self) {
        self.members.clear();
        self.queue.clear();
    }

    /// Pops expired records off the queue front and deletes the matching
    /// members. A record whose timestamp no longer matches the map entry was
    /// superseded by a refresh and is discarded without touching the member.
    fn evict_expired(&mut self) {
        let now = self.clock.now_ms();
        while let Some(&(ts, _)) = self.queue.front() {
            if now.saturating_sub(ts) <= self.ttl_ms {
                break;
            }
            let (ts, item) = self.queue.pop_front().expect("front was Some");
            if self.members.get(&item) == Some(&ts) {
                self.members.remove(&item);
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        // Every live member must have a queue record carrying its timestamp.
        for (item, &ts) in &self.members {
            assert!(
                self.queue.iter().any(|(qts, qi)| *qts == ts && qi == item),
                "member without a matching queue record"
            );
        }
        // Queue timestamps never decrease front to back.
        let mut prev = 0u64;
        for &(ts, _) in &self.queue {
            assert!(ts >= prev);
            prev = ts;
        }
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for ExpiringSet<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringSet")
            .field("ttl_ms", &self.ttl_ms)
            .field("members", &self.members.len())
            .field("pending_records", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn set_with_clock(ttl_ms: u64) -> (ExpiringSet<&'static str, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let set = ExpiringSet::with_clock(ttl_ms, clock.clone());
        (set, clock)
    }

    #[test]
    fn expiring_set_member_vanishes_after_ttl() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        assert!(set.contains(&"a"));
        assert_eq!(set.len(), 1);

        clock.set(1_100);
        assert!(!set.contains(&"a"));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn expiring_set_age_equal_to_ttl_is_still_live() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        clock.set(1_000);
        assert!(set.contains(&"a"));

        clock.set(1_001);
        assert!(!set.contains(&"a"));
    }

    #[test]
    fn expiring_set_insert_reports_newness() {
        let (mut set, clock) = set_with_clock(500);

        assert!(set.insert("a"));
        assert!(!set.insert("a"));

        clock.set(600);
        assert!(set.insert("a"));
    }

    #[test]
    fn expiring_set_refresh_restarts_age() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        clock.set(800);
        set.insert("a");

        // The original record expires at t=1001; the refresh keeps "a" live.
        clock.set(1_200);
        assert!(set.contains(&"a"));
        set.debug_validate_invariants();

        clock.set(1_900);
        assert!(!set.contains(&"a"));
    }

    #[test]
    fn expiring_set_superseded_record_does_not_evict_neighbor() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        clock.set(500);
        set.insert("b");
        clock.set(700);
        set.insert("a");

        // a's t=0 record expires; the sweep must skip it and keep both
        // members, since b (t=500) and a (t=700) are within the window.
        clock.set(1_400);
        assert!(set.contains(&"a"));
        assert!(set.contains(&"b"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn expiring_set_insert_all_stamps_one_time() {
        let (mut set, clock) = set_with_clock(1_000);

        clock.set(100);
        set.insert_all(["a", "b", "c"]);
        assert_eq!(set.len(), 3);

        clock.set(1_101);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn expiring_set_remove_before_expiry() {
        let (mut set, _clock) = set_with_clock(1_000);

        set.insert("a");
        assert!(set.remove(&"a"));
        assert!(!set.remove(&"a"));
        assert!(!set.contains(&"a"));
    }

    #[test]
    fn expiring_set_reinsert_after_remove_is_fresh() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        set.remove(&"a");
        clock.set(900);
        set.insert("a");

        // The t=0 record expiring must not take down the t=900 insertion.
        clock.set(1_100);
        assert!(set.contains(&"a"));
        set.debug_validate_invariants();
    }

    #[test]
    fn expiring_set_clear_drops_everything() {
        let (mut set, _clock) = set_with_clock(1_000);

        set.insert_all(["a", "b"]);
        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(&"a"));
        set.debug_validate_invariants();
    }

    #[test]
    fn expiring_set_staggered_insertions_expire_independently() {
        let (mut set, clock) = set_with_clock(1_000);

        set.insert("a");
        clock.set(600);
        set.insert("b");

        clock.set(1_200);
        assert!(!set.contains(&"a"));
        assert!(set.contains(&"b"));

        clock.set(1_700);
        assert!(set.is_empty());
    }

    #[test]
    fn expiring_set_zero_ttl_is_rejected() {
        let err = ExpiringSet::<String>::try_new(0).unwrap_err();
        assert!(err.to_string().contains("ttl"));
    }

    #[test]
    #[should_panic(expected = "ttl")]
    fn expiring_set_new_zero_ttl_panics() {
        let _ = ExpiringSet::<String>::new(0);
    }

    #[test]
    fn expiring_set_churn_preserves_invariants() {
        let (mut set, clock) = set_with_clock(100);

        for round in 0u64..500 {
            clock.set(round * 7);
            match round % 4 {
                0 => {
                    set.insert(if round % 8 == 0 { "x" } else { "y" });
                }
                1 => {
                    set.contains(&"x");
                }
                2 => {
                    set.insert("x");
                }
                _ => {
                    set.remove(&"y");
                }
            }
            set.len();
            set.debug_validate_invariants();
        }
    }
}
