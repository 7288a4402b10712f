//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a structure is configured with invalid
//!   parameters (zero capacity, zero TTL/window, zero replica count).
//!
//! Invalid configuration always fails fast: constructors and `resize` reject
//! bad parameters instead of silently clamping them.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::gen_lru::GenLruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<GenLruCache<String, i32>, ConfigError> = GenLruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = GenLruCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`GenLruCache::try_new`](crate::policy::gen_lru::GenLruCache::try_new),
/// [`RingBuffer::try_new`](crate::ds::RingBuffer::try_new), and
/// [`GenLruCache::resize`](crate::policy::gen_lru::GenLruCache::resize).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use evictkit::ds::RingBuffer;
///
/// let err = RingBuffer::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be greater than zero");
        assert_eq!(err.to_string(), "capacity must be greater than zero");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad window");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad window"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
