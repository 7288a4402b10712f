//! Trait hierarchy for the bounded cache structures.
//!
//! ## Architecture
//!
//! ```text
//!            ┌──────────────────────────────────────┐
//!            │           CoreCache<K, V>            │
//!            │                                      │
//!            │  insert(&mut, K, V) → Option<V>      │
//!            │  get(&mut, &K) → Option<&V>          │
//!            │  contains(&, &K) → bool              │
//!            │  len(&) → usize                      │
//!            │  is_empty(&) → bool                  │
//!            │  capacity(&) → usize                 │
//!            │  clear(&mut)                         │
//!            └──────────────────┬───────────────────┘
//!                               │
//!                               ▼
//!            ┌──────────────────────────────────────┐
//!            │         MutableCache<K, V>           │
//!            │                                      │
//!            │  remove(&K) → Option<V>              │
//!            └──────────────────────────────────────┘
//! ```
//!
//! [`GenLruCache`](crate::policy::gen_lru::GenLruCache) implements both
//! traits. `get` takes `&mut self` because a hit in the previous generation
//! promotes the entry into the current generation; use the inherent
//! [`peek`](crate::policy::gen_lru::GenLruCache::peek) for a side-effect-free
//! lookup.
//!
//! The time-windowed and positional structures in [`ds`](crate::ds) do not
//! implement these traits: an expiring set has no capacity and a ring buffer
//! has no keys, so forcing them through a keyed-cache interface would only
//! blur their contracts.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::gen_lru::GenLruCache;
//! use evictkit::traits::CoreCache;
//!
//! fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.clone());
//!     }
//! }
//!
//! let mut cache = GenLruCache::new(8);
//! warm_cache(&mut cache, &[(1, "a".into()), (2, "b".into())]);
//! assert_eq!(cache.len(), 2);
//! ```

/// Universal operations for a bounded key-value cache.
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value if present.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns a reference to `key`'s value, refreshing its recency.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is live, without side effects.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no live entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured maximum number of live entries.
    fn capacity(&self) -> usize;

    /// Removes all entries without invoking any eviction listener.
    fn clear(&mut self);
}

/// A cache supporting arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key` and returns its value, if present.
    fn remove(&mut self, key: &K) -> Option<V>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::gen_lru::GenLruCache;

    fn lookup<C: MutableCache<u32, &'static str>>(cache: &mut C, key: u32) -> Option<&str> {
        cache.get(&key).copied()
    }

    #[test]
    fn gen_lru_usable_through_trait_objects_of_the_hierarchy() {
        let mut cache = GenLruCache::new(4);
        cache.insert(1, "one");
        cache.insert(2, "two");

        assert_eq!(lookup(&mut cache, 1), Some("one"));
        assert_eq!(lookup(&mut cache, 3), None);
        assert_eq!(cache.remove(&2), Some("two"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn default_is_empty_tracks_len() {
        let mut cache = GenLruCache::<u32, u32>::new(2);
        assert!(CoreCache::is_empty(&cache));
        cache.insert(1, 1);
        assert!(!CoreCache::is_empty(&cache));
        cache.clear();
        assert!(CoreCache::is_empty(&cache));
    }
}
