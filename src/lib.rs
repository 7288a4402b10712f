//! # evictkit
//!
//! Single-threaded eviction toolkit: a generational LRU cache plus the
//! time-windowed and positional structures that usually sit next to one in a
//! service process.
//!
//! ## What's Inside
//!
//! | Structure                         | Bounds contents by        | Module     |
//! |-----------------------------------|---------------------------|------------|
//! | [`GenLruCache`](policy::GenLruCache) | Capacity + recency     | [`policy`] |
//! | [`ExpiringSet`](ds::ExpiringSet)  | Time-to-live              | [`ds`]     |
//! | [`ExpiringArray`](ds::ExpiringArray) | Rolling time window   | [`ds`]     |
//! | [`RingBuffer`](ds::RingBuffer)    | Fixed slot count          | [`ds`]     |
//! | [`HashRing`](ds::HashRing)        | n/a (routes keys)         | [`ds`]     |
//!
//! ## Quick Start
//!
//! ```
//! use evictkit::prelude::*;
//!
//! // Bounded cache: at most 2 entries, least-recently-used evicted first.
//! let mut cache = GenLruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.insert("c", 3);
//! assert!(cache.len() <= 2);
//!
//! // Route cache keys to servers with minimal reshuffling on changes.
//! let ring = HashRing::new(["node-1", "node-2"]);
//! assert!(ring.get("a").is_some());
//! ```
//!
//! ## Design Principles
//!
//! - **Inline maintenance**: expiry and eviction happen inside the operation
//!   that observes them. No background threads, no timers.
//! - **Fail-fast configuration**: zero capacities, TTLs, and replica counts
//!   are rejected at construction via [`ConfigError`](error::ConfigError);
//!   each structure offers both a panicking `new` and a fallible `try_new`.
//! - **Deterministic time**: the expiring collections read a
//!   [`Clock`](clock::Clock), so tests drive expiry by hand with
//!   [`ManualClock`](clock::ManualClock).
//!
//! ## Thread Safety
//!
//! None of these types synchronize internally, and every operation that can
//! evict or expire takes `&mut self`. Wrap a structure in a lock if it must
//! be shared across threads.

pub mod clock;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
