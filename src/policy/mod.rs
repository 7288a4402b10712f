//! Eviction policies for bounded key-value caches.
//!
//! ## Key Components
//!
//! - [`GenLruCache`]: Generational LRU approximation with two insertion
//!   cohorts and wholesale rotation.

pub mod gen_lru;

pub use gen_lru::GenLruCache;
