//! # Capacity-Bounded Cache Core
//!
//! Generic key/value store with a fixed capacity and a pluggable eviction
//! policy. When a new key must enter a full cache, the policy's least
//! valuable entry is evicted first. The same ordering powers the dual
//! extraction contract: [`pop`](CacheCore::pop) removes the **most** valuable
//! entry, [`pull`](CacheCore::pull) the **least** valuable one — exactly the
//! entry automatic eviction would have chosen at that moment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        CacheCore<K, V, P>                           │
//! │                                                                     │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────┐ │
//! │   │  map: FxHashMap<K, V>       │   │  policy: P                  │ │
//! │   │  (values owned here)        │   │  (per-key ordering metadata)│ │
//! │   └─────────────────────────────┘   └─────────────────────────────┘ │
//! │                                                                     │
//! │   capacity: usize (fixed at construction)                           │
//! │   stats: CacheStats (hits / misses / evictions / ...)               │
//! │                                                                     │
//! │   Invariant: map and policy always track the same key set, and      │
//! │   len() <= capacity after every public operation (capacity 0        │
//! │   transiently holds one entry, see below).                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method            | Policy notification | Description                        |
//! |-------------------|---------------------|------------------------------------|
//! | `get`             | `on_access` on hit  | Lookup; refreshes recency / count  |
//! | `insert` (new)    | `on_insert`         | Evicts first if full               |
//! | `insert` (update) | none                | Overwrites the value in place      |
//! | `pop`             | `on_remove`         | Extracts the most valuable entry   |
//! | `pull`            | `on_remove`         | Extracts the least valuable entry  |
//! | `remove`          | `on_remove`         | Removes by key                     |
//! | `remove_where`    | `on_remove` each    | Removes every matching entry       |
//! | `clear`           | via `pop`           | Drains the cache entry by entry    |
//! | `contains`/`peek` | none                | Lookup without touching the policy |
//!
//! An `insert` that overwrites an existing key deliberately does **not**
//! count as an access: only `get` hits refresh recency or increment
//! frequency. This minimality contract comes from the original system and
//! is relied upon by the frequency tests.
//!
//! ## Zero Capacity
//!
//! A capacity-0 cache is legal. Because eviction runs *before* insertion,
//! every `insert` evicts whatever single entry the previous `insert` left
//! behind, inserts the new entry, and leaves the cache full. No entry
//! survives two consecutive inserts.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::cache::RecencyCache;
//!
//! let mut cache = RecencyCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3); // "b" was touched longest ago: evicted
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert!(cache.contains(&"c"));
//! ```
//!
//! ## Thread Safety
//!
//! `CacheCore` is **not** thread-safe; every operation takes `&mut self`.
//! Use [`SharedCache`](crate::sync::SharedCache) (feature `concurrency`)
//! for lock-serialized multi-threaded access.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::policy::frequency::FrequencyPolicy;
use crate::policy::recency::RecencyPolicy;
use crate::traits::EvictionPolicy;

/// Default capacity used by `Default` impls.
pub const DEFAULT_CAPACITY: usize = 16;

/// Operation counters accumulated by a cache instance.
///
/// The single-threaded analogue of a concurrent store's atomic metrics:
/// plain `u64` fields, snapshot by copy via [`CacheCore::stats`].
///
/// # Example
///
/// ```
/// use boundcache::cache::RecencyCache;
///
/// let mut cache = RecencyCache::new(2);
/// cache.insert("a", 1);
/// cache.get(&"a");
/// cache.get(&"missing");
///
/// let stats = cache.stats();
/// assert_eq!(stats.inserts, 1);
/// assert_eq!(stats.hits, 1);
/// assert_eq!(stats.misses, 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// `get` calls that found the key.
    pub hits: u64,
    /// `get` calls that missed.
    pub misses: u64,
    /// Fresh insertions (new keys).
    pub inserts: u64,
    /// In-place value overwrites of existing keys.
    pub updates: u64,
    /// Entries removed by `remove` / `remove_where`.
    pub removals: u64,
    /// Entries evicted by capacity pressure.
    pub evictions: u64,
    /// Entries extracted by `pop` / `pull` (including `clear`).
    pub extractions: u64,
}

/// Generic capacity-bounded cache, parameterized over an eviction policy.
///
/// See the [module documentation](self) for the operation table and
/// invariants. Most callers want the [`RecencyCache`] or [`FrequencyCache`]
/// aliases, or the policy-erased [`Cache`](crate::builder::Cache) built by
/// [`CacheBuilder`](crate::builder::CacheBuilder).
pub struct CacheCore<K, V, P> {
    map: FxHashMap<K, V>,
    policy: P,
    capacity: usize,
    stats: CacheStats,
}

/// Recency-evicting (LRU-style) cache.
pub type RecencyCache<K, V> = CacheCore<K, V, RecencyPolicy<K>>;

/// Frequency-evicting (LFU-style) cache.
pub type FrequencyCache<K, V> = CacheCore<K, V, FrequencyPolicy<K>>;

impl<K, V> RecencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a recency-evicting cache with the given capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::RecencyCache;
    ///
    /// let cache: RecencyCache<u64, String> = RecencyCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        CacheCore::with_policy(capacity, RecencyPolicy::with_capacity(capacity))
    }
}

impl<K, V> FrequencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a frequency-evicting cache with the given capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::FrequencyCache;
    ///
    /// let cache: FrequencyCache<u64, String> = FrequencyCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        CacheCore::with_policy(capacity, FrequencyPolicy::with_capacity(capacity))
    }
}

impl<K, V, P> CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K>,
{
    /// Creates a cache with the given capacity and an explicit policy value.
    ///
    /// The policy must be empty; both selectors are fixed for the lifetime
    /// of the instance.
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        debug_assert!(policy.is_empty(), "cache constructed with a non-empty policy");
        CacheCore {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            policy,
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Looks up a key, counting a hit as a policy access.
    ///
    /// On a hit the active policy is notified (recency refresh or frequency
    /// increment). A miss has no side effect beyond the miss counter. Use
    /// [`peek`](Self::peek) to read without touching eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::FrequencyCache;
    ///
    /// let mut cache = FrequencyCache::new(10);
    /// cache.insert(1, "one");
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// assert_eq!(cache.get(&99), None);
    /// assert_eq!(cache.policy().frequency(&1), Some(2)); // insert + hit
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.map.contains_key(key) {
            self.policy.on_access(key);
            self.stats.hits += 1;
            self.map.get(key)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Inserts a key/value pair, returning the previous value if the key
    /// already existed.
    ///
    /// An existing key has its value overwritten in place with **no** policy
    /// notification: overwrites are not accesses, so they neither refresh
    /// recency nor increment frequency. A new key registers fresh metadata,
    /// evicting the least valuable entry first when the cache is full.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::RecencyCache;
    ///
    /// let mut cache = RecencyCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.map.get_mut(&key) {
            self.stats.updates += 1;
            return Some(mem::replace(slot, value));
        }
        if self.is_full() {
            self.evict_one();
        }
        self.policy.on_insert(key.clone());
        self.map.insert(key, value);
        self.stats.inserts += 1;
        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Removes and returns the **most** valuable entry under the active
    /// policy (most recently touched / most frequently accessed).
    ///
    /// This is extraction of the best entry, not eviction: the automatic
    /// eviction path targets the opposite end (see [`pull`](Self::pull)).
    /// Returns `None` if the cache is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::RecencyCache;
    ///
    /// let mut cache = RecencyCache::new(10);
    /// cache.insert(1, "old");
    /// cache.insert(2, "new");
    /// assert_eq!(cache.pop(), Some((2, "new")));
    /// assert_eq!(cache.pop(), Some((1, "old")));
    /// assert_eq!(cache.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<(K, V)> {
        let key = self.policy.most_valuable()?.clone();
        self.policy.on_remove(&key);
        let value = self
            .map
            .remove(&key)
            .expect("pop target missing from the key map");
        self.stats.extractions += 1;
        #[cfg(debug_assertions)]
        self.validate_invariants();
        Some((key, value))
    }

    /// Removes and returns the **least** valuable entry under the active
    /// policy — the same entry automatic eviction would choose right now.
    ///
    /// Returns `None` if the cache is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::FrequencyCache;
    ///
    /// let mut cache = FrequencyCache::new(10);
    /// cache.insert(1, "hot");
    /// cache.insert(2, "cold");
    /// cache.get(&1);
    /// assert_eq!(cache.pull(), Some((2, "cold")));
    /// ```
    pub fn pull(&mut self) -> Option<(K, V)> {
        let key = self.policy.least_valuable()?.clone();
        self.policy.on_remove(&key);
        let value = self
            .map
            .remove(&key)
            .expect("pull target missing from the key map");
        self.stats.extractions += 1;
        #[cfg(debug_assertions)]
        self.validate_invariants();
        Some((key, value))
    }

    /// Removes an entry by key, returning its value if it was present.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::RecencyCache;
    ///
    /// let mut cache = RecencyCache::new(10);
    /// cache.insert(1, "one");
    /// assert_eq!(cache.remove(&1), Some("one"));
    /// assert_eq!(cache.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        self.policy.on_remove(key);
        self.stats.removals += 1;
        #[cfg(debug_assertions)]
        self.validate_invariants();
        Some(value)
    }

    /// Removes every entry for which `pred(key, value)` holds and returns
    /// the number removed.
    ///
    /// Victims are collected from a stable snapshot before any removal, so
    /// the predicate sees each live entry exactly once. Survivors keep
    /// their eviction metadata untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::RecencyCache;
    ///
    /// let mut cache = RecencyCache::new(10);
    /// cache.insert(1, 10);
    /// cache.insert(2, 25);
    /// cache.insert(3, 30);
    ///
    /// let removed = cache.remove_where(|_, &v| v >= 25);
    /// assert_eq!(removed, 2);
    /// assert_eq!(cache.len(), 1);
    /// assert!(cache.contains(&1));
    /// ```
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let victims: Vec<K> = self
            .map
            .iter()
            .filter(|(key, value)| pred(key, value))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &victims {
            self.map.remove(key);
            self.policy.on_remove(key);
            self.stats.removals += 1;
        }
        #[cfg(debug_assertions)]
        self.validate_invariants();
        victims.len()
    }

    /// Returns `true` once the live count has reached capacity.
    ///
    /// A capacity-0 cache is always full.
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    /// Drains the cache by repeatedly calling [`pop`](Self::pop).
    ///
    /// Clearing is defined as drain-via-pop rather than a separate bulk
    /// erase, so the extraction counter reflects the drained entries.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::FrequencyCache;
    ///
    /// let mut cache = FrequencyCache::new(10);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.clear();
    /// assert!(cache.is_empty());
    /// ```
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Checks key existence without notifying the policy.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Reads a value without notifying the policy.
    ///
    /// Unlike [`get`](Self::get), peeking never changes eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::FrequencyCache;
    ///
    /// let mut cache = FrequencyCache::new(10);
    /// cache.insert(1, "one");
    /// assert_eq!(cache.peek(&1), Some(&"one"));
    /// assert_eq!(cache.policy().frequency(&1), Some(1)); // unchanged
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum capacity, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read access to the active policy's metadata.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Verifies the bookkeeping invariants.
    ///
    /// - The map and the policy track the same key set (no orphans in
    ///   either direction).
    /// - The live count respects the capacity bound (capacity 0 may hold a
    ///   single transient entry, per the evict-before-insert contract).
    ///
    /// Mutating operations run this automatically in debug builds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.policy.len() {
            return Err(InvariantError::new(format!(
                "live count mismatch: map holds {}, policy tracks {}",
                self.map.len(),
                self.policy.len()
            )));
        }
        for key in self.map.keys() {
            if !self.policy.tracks(key) {
                return Err(InvariantError::new(
                    "map key has no policy metadata (orphaned entry)",
                ));
            }
        }
        let bound = if self.capacity == 0 { 1 } else { self.capacity };
        if self.map.len() > bound {
            return Err(InvariantError::new(format!(
                "live count {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        Ok(())
    }

    /// Evicts the policy's least valuable entry, if any.
    fn evict_one(&mut self) -> Option<(K, V)> {
        let victim = self.policy.least_valuable()?.clone();
        self.policy.on_remove(&victim);
        let value = self
            .map
            .remove(&victim)
            .expect("eviction victim missing from the key map");
        self.stats.evictions += 1;
        Some((victim, value))
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }
}

impl<K, V, P> fmt::Debug for CacheCore<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCore")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V, P> Default for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K> + Default,
{
    /// Creates a cache with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::with_policy(DEFAULT_CAPACITY, P::default())
    }
}

impl<K, V, P> Extend<(K, V)> for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Insert(u8, i32),
        Pop,
        Pull,
        Remove(u8),
        RemoveOdd,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<u8>()).prop_map(Op::Get),
            (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            Just(Op::Pop),
            Just(Op::Pull),
            (any::<u8>()).prop_map(Op::Remove),
            Just(Op::RemoveOdd),
        ]
    }

    fn run_ops<P: EvictionPolicy<u8>>(cache: &mut CacheCore<u8, i32, P>, ops: &[Op]) {
        for op in ops {
            match op {
                Op::Get(k) => {
                    cache.get(k);
                },
                Op::Insert(k, v) => {
                    cache.insert(*k, *v);
                },
                Op::Pop => {
                    cache.pop();
                },
                Op::Pull => {
                    cache.pull();
                },
                Op::Remove(k) => {
                    cache.remove(k);
                },
                Op::RemoveOdd => {
                    cache.remove_where(|k, _| k % 2 == 1);
                },
            }
            assert!(cache.check_invariants().is_ok());
            assert!(cache.len() <= cache.capacity().max(1));
        }
    }

    proptest! {
        /// Invariants hold for the recency policy under arbitrary op mixes.
        #[test]
        fn prop_recency_invariants(
            capacity in 0usize..12,
            ops in prop::collection::vec(op_strategy(), 0..120),
        ) {
            let mut cache: RecencyCache<u8, i32> = RecencyCache::new(capacity);
            run_ops(&mut cache, &ops);
        }

        /// Invariants hold for the frequency policy under arbitrary op mixes.
        #[test]
        fn prop_frequency_invariants(
            capacity in 0usize..12,
            ops in prop::collection::vec(op_strategy(), 0..120),
        ) {
            let mut cache: FrequencyCache<u8, i32> = FrequencyCache::new(capacity);
            run_ops(&mut cache, &ops);
        }

        /// Inserting into a full cache evicts exactly the current pull target.
        #[test]
        fn prop_eviction_target_equals_pull_target(
            seed in prop::collection::vec((0u8..50, any::<i32>()), 1..60),
        ) {
            let mut cache: FrequencyCache<u8, i32> = FrequencyCache::new(4);
            for (k, v) in seed {
                if !cache.contains(&k) && cache.is_full() {
                    let predicted = cache
                        .policy()
                        .least_valuable()
                        .copied()
                        .expect("full cache must have a pull target");
                    cache.insert(k, v);
                    prop_assert!(!cache.contains(&predicted));
                } else {
                    cache.insert(k, v);
                }
            }
        }
    }
}
