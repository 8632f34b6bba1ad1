//! Recency (LRU-style) eviction policy.
//!
//! Tracks a per-key last-touch tick drawn from a monotonically increasing
//! logical clock. The key with the oldest tick is least valuable (evict /
//! `pull` target); the key with the newest tick is most valuable (`pop`
//! target).
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                      RecencyPolicy<K> Layout                      │
//! │                                                                   │
//! │   clock: u64  (bumped on every insert and touch)                  │
//! │                                                                   │
//! │   ticks: FxHashMap<K, u64>                                        │
//! │   ┌──────────┬────────┐                                           │
//! │   │   Key    │  Tick  │                                           │
//! │   ├──────────┼────────┤                                           │
//! │   │ "page_a" │   7    │  ◄── newest touch: most valuable (pop)    │
//! │   │ "page_b" │   2    │  ◄── oldest touch: least valuable (pull)  │
//! │   │ "page_c" │   5    │                                           │
//! │   └──────────┴────────┘                                           │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                   |
//! |------------------|------|-----------------------------------------|
//! | `on_insert`      | O(1) | Records the next clock tick             |
//! | `on_access`      | O(1) | Refreshes the key's tick                |
//! | `on_remove`      | O(1) | Drops the tick record                   |
//! | `least_valuable` | O(n) | Scan for the minimum tick               |
//! | `most_valuable`  | O(n) | Scan for the maximum tick               |
//!
//! The linear selection scan matches the reference semantics of the policy;
//! the cache only runs it on eviction, `pop`, and `pull`.
//!
//! ## Implementation Notes
//!
//! - The clock is logical, not wall time: each insert or touch consumes one
//!   tick, so ticks are unique per live key and the selection scan is fully
//!   deterministic. A coarse wall clock would instead allow ties between
//!   keys touched within the same clock grain.
//! - Value overwrites do not reach this policy; only `get` hits and fresh
//!   insertions move a key's tick.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::policy::recency::RecencyPolicy;
//! use boundcache::traits::EvictionPolicy;
//!
//! let mut policy = RecencyPolicy::new();
//! policy.on_insert("a");
//! policy.on_insert("b");
//! policy.on_insert("c");
//! policy.on_access(&"a");
//!
//! assert_eq!(policy.least_valuable(), Some(&"b"));
//! assert_eq!(policy.most_valuable(), Some(&"a"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::EvictionPolicy;

/// Recency-ordered eviction metadata: oldest-touched is least valuable.
#[derive(Debug, Clone)]
pub struct RecencyPolicy<K> {
    ticks: FxHashMap<K, u64>,
    clock: u64,
}

impl<K> RecencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty recency policy.
    pub fn new() -> Self {
        RecencyPolicy {
            ticks: FxHashMap::default(),
            clock: 0,
        }
    }

    /// Creates an empty recency policy sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        RecencyPolicy {
            ticks: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            clock: 0,
        }
    }

    /// Returns the logical tick of the key's last touch.
    ///
    /// Ticks are only comparable against other ticks from the same policy
    /// instance. Returns `None` for untracked keys.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::recency::RecencyPolicy;
    /// use boundcache::traits::EvictionPolicy;
    ///
    /// let mut policy = RecencyPolicy::new();
    /// policy.on_insert("a");
    /// let before = policy.last_touch(&"a").unwrap();
    /// policy.on_access(&"a");
    /// assert!(policy.last_touch(&"a").unwrap() > before);
    /// ```
    pub fn last_touch(&self, key: &K) -> Option<u64> {
        self.ticks.get(key).copied()
    }

    fn next_tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl<K> Default for RecencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for RecencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn on_insert(&mut self, key: K) {
        debug_assert!(
            !self.ticks.contains_key(&key),
            "recency policy asked to insert a key it already tracks"
        );
        let tick = self.next_tick();
        self.ticks.insert(key, tick);
    }

    fn on_access(&mut self, key: &K) {
        let tick = self.next_tick();
        match self.ticks.get_mut(key) {
            Some(slot) => *slot = tick,
            None => {
                debug_assert!(false, "recency policy asked to touch an untracked key");
            },
        }
    }

    fn on_remove(&mut self, key: &K) {
        let removed = self.ticks.remove(key);
        debug_assert!(
            removed.is_some(),
            "recency policy asked to drop an untracked key"
        );
    }

    fn least_valuable(&self) -> Option<&K> {
        self.ticks
            .iter()
            .min_by_key(|(_, &tick)| tick)
            .map(|(key, _)| key)
    }

    fn most_valuable(&self) -> Option<&K> {
        self.ticks
            .iter()
            .max_by_key(|(_, &tick)| tick)
            .map(|(key, _)| key)
    }

    fn len(&self) -> usize {
        self.ticks.len()
    }

    fn tracks(&self, key: &K) -> bool {
        self.ticks.contains_key(key)
    }
}
