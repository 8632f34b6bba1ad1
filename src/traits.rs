//! # Eviction Policy Trait
//!
//! This module defines the seam between the generic store ([`CacheCore`]) and
//! the eviction policies that decide which entry to sacrifice under capacity
//! pressure.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────┐
//!   │                  CacheCore<K, V, P>                        │
//!   │                                                            │
//!   │   map: FxHashMap<K, V>        policy: P                    │
//!   │                                                            │
//!   │   get hit        ──────────►  on_access(&K)                │
//!   │   insert (new)   ──────────►  on_insert(K)                 │
//!   │   remove / evict ──────────►  on_remove(&K)                │
//!   │   pull / evict   ◄──────────  least_valuable() -> &K       │
//!   │   pop            ◄──────────  most_valuable()  -> &K       │
//!   └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two implementations ship with the crate:
//!
//! | Policy                | least valuable      | most valuable        |
//! |-----------------------|---------------------|----------------------|
//! | [`RecencyPolicy`]     | oldest last touch   | newest last touch    |
//! | [`FrequencyPolicy`]   | lowest access count | highest access count |
//!
//! ## Contract
//!
//! The store guarantees that it only reports keys it actually holds:
//! `on_access` and `on_remove` are never called for keys the policy does not
//! track, and `on_insert` is never called twice for the same live key.
//! Violating that from outside `CacheCore` is a checked precondition — a
//! `debug_assert!` failure in debug builds and a documented no-op in release
//! builds.
//!
//! [`CacheCore`]: crate::cache::CacheCore
//! [`RecencyPolicy`]: crate::policy::recency::RecencyPolicy
//! [`FrequencyPolicy`]: crate::policy::frequency::FrequencyPolicy

/// Per-key eviction metadata for a capacity-bounded cache.
///
/// A policy tracks exactly the keys currently stored in the owning cache and
/// answers the two ordering questions eviction needs: which key is least
/// valuable (the auto-evict and [`pull`](crate::cache::CacheCore::pull)
/// target) and which is most valuable (the
/// [`pop`](crate::cache::CacheCore::pop) target).
///
/// # Example
///
/// ```
/// use boundcache::policy::recency::RecencyPolicy;
/// use boundcache::traits::EvictionPolicy;
///
/// let mut policy: RecencyPolicy<&str> = RecencyPolicy::new();
/// policy.on_insert("a");
/// policy.on_insert("b");
/// policy.on_access(&"a");
///
/// // "b" was touched longest ago, "a" most recently.
/// assert_eq!(policy.least_valuable(), Some(&"b"));
/// assert_eq!(policy.most_valuable(), Some(&"a"));
/// ```
pub trait EvictionPolicy<K> {
    /// Registers metadata for a key the cache just inserted.
    ///
    /// Recency policies record a fresh tick; frequency policies start the
    /// key at count 1, in front of every existing count-1 key so the
    /// earliest insert remains the tier's eviction target.
    fn on_insert(&mut self, key: K);

    /// Records a `get` hit.
    ///
    /// This is the only path that refreshes recency or increments frequency;
    /// value overwrites via `insert` deliberately do not go through it.
    fn on_access(&mut self, key: &K);

    /// Drops the key's metadata.
    ///
    /// Calling this for an untracked key is a caller contract violation:
    /// it panics via `debug_assert!` in debug builds and does nothing in
    /// release builds.
    fn on_remove(&mut self, key: &K);

    /// The key automatic eviction (and `pull`) would remove next.
    ///
    /// Returns `None` when no keys are tracked.
    fn least_valuable(&self) -> Option<&K>;

    /// The key `pop` would remove next.
    ///
    /// Returns `None` when no keys are tracked.
    fn most_valuable(&self) -> Option<&K>;

    /// Number of tracked keys.
    ///
    /// Always equal to the owning cache's live count (the no-orphans
    /// invariant); [`check_invariants`] verifies this.
    ///
    /// [`check_invariants`]: crate::cache::CacheCore::check_invariants
    fn len(&self) -> usize;

    /// Returns `true` if no keys are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the policy holds metadata for `key`.
    fn tracks(&self, key: &K) -> bool;
}
