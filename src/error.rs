//! Error types for the boundcache library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when internal
//!   bookkeeping invariants are violated.
//!
//! The cache core itself has no exceptional failure modes: lookups and
//! extractions report absence through `Option`, and no operation performs
//! I/O. `InvariantError` only ever surfaces from explicit invariant checks.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::cache::RecencyCache;
//!
//! let mut cache: RecencyCache<&str, i32> = RecencyCache::new(4);
//! cache.insert("a", 1);
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`CacheCore::check_invariants`] when the key map and the
/// active policy's metadata disagree. Carries a human-readable description
/// of which invariant failed.
///
/// [`CacheCore::check_invariants`]: crate::cache::CacheCore::check_invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
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

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message() {
        let err = InvariantError::new("live count mismatch");
        assert_eq!(err.to_string(), "live count mismatch");
    }

    #[test]
    fn debug_includes_message() {
        let err = InvariantError::new("orphaned metadata");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("orphaned metadata"));
    }

    #[test]
    fn message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
