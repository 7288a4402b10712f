//! Supporting data structures: time-windowed collections, a circular
//! buffer, and a consistent hash ring.
//!
//! These stand apart from the keyed cache in [`policy`](crate::policy): they
//! bound their contents by time or position rather than by a capacity with a
//! recency policy.
//!
//! ## Key Components
//!
//! - [`ExpiringSet`]: Membership set whose elements lapse after a TTL.
//! - [`ExpiringArray`]: Insertion-ordered rolling window over a stream.
//! - [`RingBuffer`]: Fixed-capacity circular buffer, oldest overwritten.
//! - [`HashRing`]: Consistent hashing over a changing server set.

pub mod expiring_array;
pub mod expiring_set;
pub mod hash_ring;
pub mod ring_buffer;

pub use expiring_array::ExpiringArray;
pub use expiring_set::ExpiringSet;
pub use hash_ring::{ContinuumEntry, HashRing, DEFAULT_REPLICAS};
pub use ring_buffer::RingBuffer;
