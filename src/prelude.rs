//! Convenience re-exports of the commonly used types.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache: GenLruCache<String, u64> = GenLruCache::new(64);
//! cache.insert("hits".into(), 1);
//! ```

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::ds::{ContinuumEntry, ExpiringArray, ExpiringSet, HashRing, RingBuffer};
pub use crate::error::ConfigError;
pub use crate::policy::GenLruCache;
pub use crate::traits::{CoreCache, MutableCache};
