//! Frequency (LFU-style) eviction policy.
//!
//! Tracks a per-key access count and keeps keys ordered by descending count
//! with stable tiers among equal counts. The tail of the lowest tier is
//! least valuable (evict / `pull` target); the head of the highest tier is
//! most valuable (`pop` target).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     FrequencyPolicy<K> Layout                       │
//! │                                                                     │
//! │   counts: FxHashMap<K, u64>        buckets: BTreeMap<u64, VecDeque> │
//! │   ┌──────────┬───────┐                                              │
//! │   │   Key    │ Count │             count=3: [a]          ◄── pop    │
//! │   ├──────────┼───────┤                       front = most valuable  │
//! │   │ "page_a" │   3   │             count=1: [c, b]                  │
//! │   │ "page_b" │   1   │                          back = least ──► pull │
//! │   │ "page_c" │   1   │                                              │
//! │   └──────────┴───────┘             (c inserted after b: front of    │
//! │                                     the count-1 tier; the earliest  │
//! │                                     insert stays at the tail)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Contract
//!
//! Reading all buckets from highest count to lowest, front to back, yields
//! the descending sequence the original list maintained:
//!
//! - a fresh insertion enters at count 1, **in front of** every existing
//!   count-1 key, leaving the earliest-inserted key at the back of the
//!   lowest tier;
//! - an access increments the count and moves the key **in front of** every
//!   key whose count is less than or equal to its new count — the front of
//!   its new tier;
//! - ties therefore break toward the earliest-inserted / least-recently
//!   promoted key at the `pull` end.
//!
//! ## Operations
//!
//! | Operation        | Time            | Notes                             |
//! |------------------|-----------------|-----------------------------------|
//! | `on_insert`      | O(log t)        | t = distinct counts (tiers)       |
//! | `on_access`      | O(log t + b)    | b = keys sharing the old count    |
//! | `on_remove`      | O(log t + b)    | scan within one tier only         |
//! | `least_valuable` | O(log t)        | back of the first bucket          |
//! | `most_valuable`  | O(log t)        | front of the last bucket          |
//!
//! The per-tier scan replaces the original's full-list scan; selection at
//! either end never scans at all.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::policy::frequency::FrequencyPolicy;
//! use boundcache::traits::EvictionPolicy;
//!
//! let mut policy = FrequencyPolicy::new();
//! policy.on_insert("a");
//! policy.on_insert("b");
//! policy.on_access(&"a"); // count 2
//!
//! assert_eq!(policy.frequency(&"a"), Some(2));
//! assert_eq!(policy.least_valuable(), Some(&"b"));
//! assert_eq!(policy.most_valuable(), Some(&"a"));
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::EvictionPolicy;

/// Frequency-ordered eviction metadata: least-accessed is least valuable.
#[derive(Debug, Clone)]
pub struct FrequencyPolicy<K> {
    counts: FxHashMap<K, u64>,
    buckets: BTreeMap<u64, VecDeque<K>>,
}

impl<K> FrequencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty frequency policy.
    pub fn new() -> Self {
        FrequencyPolicy {
            counts: FxHashMap::default(),
            buckets: BTreeMap::new(),
        }
    }

    /// Creates an empty frequency policy sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        FrequencyPolicy {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: BTreeMap::new(),
        }
    }

    /// Returns the key's access count (1 on insertion, +1 per `get` hit).
    ///
    /// Returns `None` for untracked keys.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::policy::frequency::FrequencyPolicy;
    /// use boundcache::traits::EvictionPolicy;
    ///
    /// let mut policy = FrequencyPolicy::new();
    /// policy.on_insert("a");
    /// assert_eq!(policy.frequency(&"a"), Some(1));
    /// policy.on_access(&"a");
    /// assert_eq!(policy.frequency(&"a"), Some(2));
    /// assert_eq!(policy.frequency(&"missing"), None);
    /// ```
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Detaches `key` from the bucket for `count`, dropping the bucket if it
    /// empties. The key must be in that bucket.
    fn detach(&mut self, key: &K, count: u64) {
        let bucket = self
            .buckets
            .get_mut(&count)
            .expect("frequency bucket missing for tracked count");
        let pos = bucket
            .iter()
            .position(|k| k == key)
            .expect("tracked key missing from its frequency bucket");
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&count);
        }
    }
}

impl<K> Default for FrequencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EvictionPolicy<K> for FrequencyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Starts the key at count 1, in front of every existing count-1 key
    /// so the earliest insert stays at the tier tail (the pull end).
    fn on_insert(&mut self, key: K) {
        debug_assert!(
            !self.counts.contains_key(&key),
            "frequency policy asked to insert a key it already tracks"
        );
        self.counts.insert(key.clone(), 1);
        self.buckets.entry(1).or_default().push_front(key);
    }

    /// Increments the count and promotes the key to the front of its new tier.
    fn on_access(&mut self, key: &K) {
        let old = match self.counts.get_mut(key) {
            Some(count) => {
                let old = *count;
                *count += 1;
                old
            },
            None => {
                debug_assert!(false, "frequency policy asked to touch an untracked key");
                return;
            },
        };
        self.detach(key, old);
        self.buckets.entry(old + 1).or_default().push_front(key.clone());
    }

    fn on_remove(&mut self, key: &K) {
        match self.counts.remove(key) {
            Some(count) => self.detach(key, count),
            None => {
                debug_assert!(false, "frequency policy asked to drop an untracked key");
            },
        }
    }

    /// Back of the lowest-count bucket: lowest count, earliest-inserted
    /// (or least-recently promoted) among ties.
    fn least_valuable(&self) -> Option<&K> {
        self.buckets
            .first_key_value()
            .and_then(|(_, bucket)| bucket.back())
    }

    /// Front of the highest-count bucket: highest count, most-recently
    /// promoted among ties.
    fn most_valuable(&self) -> Option<&K> {
        self.buckets
            .last_key_value()
            .and_then(|(_, bucket)| bucket.front())
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn tracks(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_has_no_candidates() {
        let policy: FrequencyPolicy<u32> = FrequencyPolicy::new();
        assert_eq!(policy.least_valuable(), None);
        assert_eq!(policy.most_valuable(), None);
        assert!(policy.is_empty());
    }

    #[test]
    fn fresh_inserts_leave_earliest_at_the_pull_end() {
        let mut policy = FrequencyPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_insert("c");

        // All at count 1: earliest insert is the eviction target, the
        // newest count-1 arrival sits at the tier head.
        assert_eq!(policy.least_valuable(), Some(&"a"));
        assert_eq!(policy.most_valuable(), Some(&"c"));
    }

    #[test]
    fn count1_tier_drains_in_insertion_order() {
        let mut policy = FrequencyPolicy::new();
        for key in 0u32..5 {
            policy.on_insert(key);
        }

        let mut drained = Vec::new();
        while let Some(&victim) = policy.least_valuable() {
            drained.push(victim);
            policy.on_remove(&victim);
        }
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn access_outranks_untouched_keys() {
        let mut policy = FrequencyPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_access(&"a");
        policy.on_access(&"a");

        assert_eq!(policy.frequency(&"a"), Some(3));
        assert_eq!(policy.frequency(&"b"), Some(1));
        assert_eq!(policy.least_valuable(), Some(&"b"));
        assert_eq!(policy.most_valuable(), Some(&"a"));
    }

    #[test]
    fn promotion_moves_to_front_of_new_tier() {
        let mut policy = FrequencyPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_access(&"a"); // a: 2
        policy.on_access(&"b"); // b: 2, promoted after a -> front of tier 2

        // Both at count 2; "a" was promoted first so it is now the
        // least-recently promoted key and the pull target.
        assert_eq!(policy.least_valuable(), Some(&"a"));
        assert_eq!(policy.most_valuable(), Some(&"b"));
    }

    #[test]
    fn remove_collapses_empty_tier() {
        let mut policy = FrequencyPolicy::new();
        policy.on_insert("a");
        policy.on_insert("b");
        policy.on_access(&"a"); // a alone in tier 2

        policy.on_remove(&"a");

        assert!(!policy.tracks(&"a"));
        assert_eq!(policy.len(), 1);
        assert_eq!(policy.least_valuable(), Some(&"b"));
        assert_eq!(policy.most_valuable(), Some(&"b"));
    }

    #[test]
    fn remove_from_middle_of_tier() {
        let mut policy = FrequencyPolicy::new();
        policy.on_insert(1u32);
        policy.on_insert(2);
        policy.on_insert(3);

        policy.on_remove(&2);

        assert_eq!(policy.least_valuable(), Some(&1));
        assert_eq!(policy.most_valuable(), Some(&3));
        assert_eq!(policy.len(), 2);
    }

    #[test]
    #[should_panic(expected = "untracked key")]
    #[cfg(debug_assertions)]
    fn dropping_untracked_key_is_checked() {
        let mut policy: FrequencyPolicy<u32> = FrequencyPolicy::new();
        policy.on_remove(&7);
    }
}
