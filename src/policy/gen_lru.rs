//! Generational (two-segment) approximate-LRU cache.
//!
//! Implements an approximate LRU policy with two insertion-ordered
//! generations instead of a per-entry recency list. Entries land in the
//! "current" generation; when it fills, the "previous" generation is evicted
//! wholesale and the current generation takes its place. Reads that hit the
//! previous generation promote the entry back into the current one, buying it
//! another rotation of lifetime.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │                         GenLruCache<K, V> Layout                       │
//! │                                                                        │
//! │   current: Generation           previous: Generation                   │
//! │   ┌──────────────────────┐      ┌──────────────────────┐               │
//! │   │ map: FxHashMap<K, _> │      │ map: FxHashMap<K, _> │               │
//! │   │ order: VecDeque      │      │ order: VecDeque      │               │
//! │   │ (insertion order)    │      │ (insertion order)    │               │
//! │   └──────────────────────┘      └──────────────────────┘               │
//! │                                                                        │
//! │   inserts: insertions into current since the last rotation             │
//! │   gen_cap: max(1, max_size / 2) — per-generation insertion threshold   │
//! │                                                                        │
//! │   Rotation (inserts reaches gen_cap, checked before the insert):       │
//! │     1. every entry in previous is evicted (listener per entry)         │
//! │     2. previous ← current, current ← empty, inserts ← 0                │
//! │                                                                        │
//! │   Promotion (get hits previous):                                       │
//! │     entry moves previous → current; counts as an insertion             │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each generation holds at most `gen_cap` entries and the two generations
//! never share a key, so the cache never holds more than `max_size` live
//! entries. A capacity guard trims the oldest previous-generation entries in
//! the rare states where the bound would otherwise be exceeded (capacity 1,
//! or immediately after a shrinking [`resize`](GenLruCache::resize)).
//!
//! ## Operations
//!
//! | Operation  | Time        | Notes                                      |
//! |------------|-------------|--------------------------------------------|
//! | `get`      | O(1) amort. | May promote from the previous generation   |
//! | `insert`   | O(1) amort. | May trigger a generation rotation          |
//! | `peek`     | O(1)        | Never promotes or mutates                  |
//! | `contains` | O(1)        | Map lookups only                           |
//! | `remove`   | O(1)        | Removes from both generations              |
//! | `resize`   | O(n)        | Rebuilds both generations                  |
//! | `len`      | O(1)        | Distinct live keys                         |
//!
//! ## Algorithm Properties
//!
//! - **Approximate recency**: any key that survives a full rotation cycle
//!   untouched is evicted; a `get` extends a key's lifetime by one rotation.
//!   The ordering is coarser than exact LRU — that is the point: no
//!   per-entry linked-list bookkeeping, just two maps and a swap.
//! - **Bounded memory**: at most `max_size` live entries at any time.
//! - **Wholesale eviction**: entries leave in generation-sized batches at
//!   rotation, not one-by-one per insert.
//!
//! Callers wanting exact LRU ordering should use a linked-list based cache
//! instead; this structure deliberately trades exact ordering for simplicity
//! and must not be "fixed" into exact LRU.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::gen_lru::GenLruCache;
//!
//! let mut cache = GenLruCache::new(2);
//!
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.insert("c", 3);
//!
//! // "a" aged out; the two most recent keys are live.
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"b"), Some(&2));
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; designed for single-threaded use. Wrap in external
//! synchronization for concurrent access.
//!
//! ## Implementation Notes
//!
//! - Each generation pairs an `FxHashMap` with an insertion-order queue.
//!   Queue records carry the sequence number assigned at insertion; a record
//!   whose sequence no longer matches the map entry is stale (the key was
//!   removed or re-inserted) and is skipped during iteration and eviction.
//! - The eviction listener receives owned `(K, V)` pairs and is invoked
//!   synchronously during rotation and shrinking resizes. Panics from the
//!   listener propagate to the caller of the triggering operation.
//! - Rotation is checked before the insert that would overflow the current
//!   generation, so a freshly rotated previous generation always gets a full
//!   cycle before being discarded.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::traits::{CoreCache, MutableCache};

struct Slot<V> {
    seq: u64,
    value: V,
}

/// One insertion-ordered generation: lookup map plus order queue.
struct Generation<K, V> {
    map: FxHashMap<K, Slot<V>>,
    order: VecDeque<(u64, K)>,
}

impl<K, V> Default for Generation<K, V> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            order: VecDeque::new(),
        }
    }
}

impl<K, V> Generation<K, V>
where
    K: Eq + Hash + Clone,
{
    fn len(&self) -> usize {
        self.map.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|slot| &slot.value)
    }

    /// Inserts a key that must not already be present in this generation.
    fn insert(&mut self, key: K, value: V, seq: u64) {
        self.order.push_back((seq, key.clone()));
        self.map.insert(key, Slot { seq, value });
    }

    /// Replaces the value of an existing key in place, keeping its position.
    fn replace(&mut self, key: &K, value: V) -> Option<V> {
        let slot = self.map.get_mut(key)?;
        Some(std::mem::replace(&mut slot.value, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        // The order record goes stale and is skipped later.
        self.map.remove(key).map(|slot| slot.value)
    }

    /// Pops the oldest live entry, skipping stale order records.
    fn pop_oldest(&mut self) -> Option<(K, V)> {
        while let Some((seq, key)) = self.order.pop_front() {
            match self.map.remove(&key) {
                Some(slot) if slot.seq == seq => return Some((key, slot.value)),
                Some(slot) => {
                    // Stale record for a re-inserted key; keep the live slot.
                    self.map.insert(key, slot);
                }
                None => {}
            }
        }
        None
    }

    /// Consumes the generation, yielding live entries oldest-first.
    fn into_entries(mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.map.len());
        for (seq, key) in self.order {
            match self.map.remove(&key) {
                Some(slot) if slot.seq == seq => entries.push((key, slot.value)),
                Some(slot) => {
                    self.map.insert(key, slot);
                }
                None => {}
            }
        }
        entries
    }

    fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().filter_map(|(seq, key)| {
            self.map
                .get(key)
                .filter(|slot| slot.seq == *seq)
                .map(|slot| (key, &slot.value))
        })
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// Listener invoked with each entry evicted by rotation or a shrinking resize.
pub type EvictionListener<K, V> = Box<dyn FnMut(K, V)>;

/// Two-generation approximate-LRU cache with bounded memory.
///
/// See the [module documentation](self) for the algorithm. Construct with
/// [`new`](Self::new) / [`try_new`](Self::try_new), or
/// [`try_with_listener`](Self::try_with_listener) to observe evictions.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use evictkit::policy::gen_lru::GenLruCache;
///
/// let mut cache = GenLruCache::new(128);
/// cache.insert("session:1", "alice");
/// assert_eq!(cache.peek(&"session:1"), Some(&"alice"));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct GenLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    current: Generation<K, V>,
    previous: Generation<K, V>,
    max_size: usize,
    /// Insertion threshold per generation: `max(1, max_size / 2)`.
    gen_cap: usize,
    /// Insertions into `current` since the last rotation.
    inserts: usize,
    seq: u64,
    on_evict: Option<EvictionListener<K, V>>,
}

impl<K, V> GenLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero. Use [`try_new`](Self::try_new) to
    /// handle invalid sizes without panicking.
    pub fn new(max_size: usize) -> Self {
        match Self::try_new(max_size) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache holding at most `max_size` entries.
    ///
    /// Returns a [`ConfigError`] if `max_size` is zero.
    pub fn try_new(max_size: usize) -> Result<Self, ConfigError> {
        if max_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }
        Ok(Self {
            current: Generation::default(),
            previous: Generation::default(),
            max_size,
            gen_cap: Self::generation_cap(max_size),
            inserts: 0,
            seq: 0,
            on_evict: None,
        })
    }

    /// Creates a cache that reports evicted entries to `listener`.
    ///
    /// The listener runs synchronously inside the `insert` or `resize` call
    /// that triggered the eviction; panics propagate to that caller.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use evictkit::policy::gen_lru::GenLruCache;
    ///
    /// let evicted = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&evicted);
    /// let mut cache = GenLruCache::try_with_listener(2, move |key: &'static str, value: i32| {
    ///     sink.borrow_mut().push((key, value));
    /// })
    /// .unwrap();
    ///
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.insert("c", 3);
    ///
    /// assert_eq!(evicted.borrow().as_slice(), &[("a", 1)]);
    /// ```
    pub fn try_with_listener(
        max_size: usize,
        listener: impl FnMut(K, V) + 'static,
    ) -> Result<Self, ConfigError> {
        let mut cache = Self::try_new(max_size)?;
        cache.on_evict = Some(Box::new(listener));
        Ok(cache)
    }

    fn generation_cap(max_size: usize) -> usize {
        (max_size / 2).max(1)
    }

    /// Returns `key`'s value, promoting it from the previous generation if
    /// needed. Promotion counts as an insertion for rotation purposes.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.current.contains(key) {
            let value = self.previous.remove(key)?;
            self.insert_into_current(key.clone(), value);
        }
        self.current.get(key)
    }

    /// Returns `key`'s value without promoting or otherwise mutating.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.current.get(key).or_else(|| self.previous.get(key))
    }

    /// Returns `true` if `key` is live in either generation.
    pub fn contains(&self, key: &K) -> bool {
        self.current.contains(key) || self.previous.contains(key)
    }

    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// Updating a key already in the current generation overwrites in place
    /// and never triggers a rotation; inserting a new key counts toward the
    /// rotation threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.current.contains(&key) {
            return self.current.replace(&key, value);
        }
        let replaced = self.previous.remove(&key);
        self.insert_into_current(key, value);
        self.enforce_capacity();
        replaced
    }

    /// Removes `key` from both generations, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let from_current = self.current.remove(key);
        let from_previous = self.previous.remove(key);
        from_current.or(from_previous)
    }

    /// Changes the capacity to `new_size`, evicting the oldest surplus
    /// entries through the listener when shrinking.
    ///
    /// Returns a [`ConfigError`] if `new_size` is zero; the cache is left
    /// untouched in that case.
    pub fn resize(&mut self, new_size: usize) -> Result<(), ConfigError> {
        if new_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }

        // Age-ordered snapshot: previous generation (oldest) first.
        let previous = std::mem::take(&mut self.previous);
        let current = std::mem::take(&mut self.current);
        let mut entries = previous.into_entries();
        entries.extend(current.into_entries());

        self.max_size = new_size;
        self.gen_cap = Self::generation_cap(new_size);

        let surplus = entries.len().saturating_sub(new_size);
        let kept = entries.split_off(surplus);
        if let Some(on_evict) = self.on_evict.as_mut() {
            for (key, value) in entries {
                on_evict(key, value);
            }
        }

        if surplus > 0 {
            // Survivors have already aged: they form the previous generation.
            for (key, value) in kept {
                self.seq += 1;
                self.previous.insert(key, value, self.seq);
            }
            self.inserts = 0;
        } else {
            for (key, value) in kept {
                self.seq += 1;
                self.current.insert(key, value, self.seq);
            }
            self.inserts = self.current.len();
        }
        Ok(())
    }

    /// Returns the number of distinct live keys.
    pub fn len(&self) -> usize {
        // Generations never share a key, so the sum is the distinct count.
        self.current.len() + self.previous.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Removes every entry. The eviction listener is not invoked.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.inserts = 0;
    }

    /// Iterates over `(key, value)` pairs: current-generation entries first
    /// (insertion order), then previous-generation entries.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.current.iter().chain(self.previous.iter())
    }

    /// Iterates over keys in the same order as [`iter`](Self::iter).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over values in the same order as [`iter`](Self::iter).
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Inserts into the current generation, rotating first if it is full.
    fn insert_into_current(&mut self, key: K, value: V) {
        if self.inserts >= self.gen_cap {
            self.rotate();
        }
        self.seq += 1;
        self.current.insert(key, value, self.seq);
        self.inserts += 1;
    }

    /// Evicts the previous generation wholesale and swaps the current
    /// generation into its place.
    fn rotate(&mut self) {
        let evicted = std::mem::take(&mut self.previous);
        self.previous = std::mem::take(&mut self.current);
        self.inserts = 0;
        if let Some(on_evict) = self.on_evict.as_mut() {
            for (key, value) in evicted.into_entries() {
                on_evict(key, value);
            }
        } else {
            drop(evicted);
        }
    }

    /// Trims the oldest previous-generation entries while the live count
    /// exceeds `max_size`. A no-op in steady state; only capacity 1 and the
    /// aftermath of a shrinking resize can trip it.
    fn enforce_capacity(&mut self) {
        while self.current.len() + self.previous.len() > self.max_size {
            match self.previous.pop_oldest() {
                Some((key, value)) => {
                    if let Some(on_evict) = self.on_evict.as_mut() {
                        on_evict(key, value);
                    }
                }
                None => break,
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len() <= self.max_size);
        assert!(self.inserts >= self.current.len());
        assert!(self.gen_cap >= 1);
        for (key, _) in self.current.iter() {
            assert!(
                !self.previous.contains(key),
                "generations must never share a key"
            );
        }
    }
}

impl<K, V> fmt::Debug for GenLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenLruCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .field("gen_cap", &self.gen_cap)
            .field("inserts", &self.inserts)
            .field("has_listener", &self.on_evict.is_some())
            .finish()
    }
}

impl<K, V> CoreCache<K, V> for GenLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        GenLruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        GenLruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        GenLruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        GenLruCache::len(self)
    }

    fn capacity(&self) -> usize {
        GenLruCache::capacity(self)
    }

    fn clear(&mut self) {
        GenLruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for GenLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        GenLruCache::remove(self, key)
    }
}
