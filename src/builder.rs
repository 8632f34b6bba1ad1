//! Unified cache builder over both eviction strategies.
//!
//! Provides a policy-erased [`Cache`] wrapper so callers can pick the
//! eviction strategy at runtime while the concrete policy type stays fixed
//! for the lifetime of the instance.
//!
//! ## Example
//!
//! ```
//! use boundcache::builder::{CacheBuilder, EvictionStrategy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(EvictionStrategy::Recency);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;

use crate::cache::{CacheStats, FrequencyCache, RecencyCache};

/// Available eviction strategies.
///
/// Fixed for the lifetime of the built instance; there is no dynamic
/// policy switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionStrategy {
    /// Evict the entry touched longest ago (LRU-style).
    Recency,
    /// Evict the entry accessed least often (LFU-style).
    Frequency,
}

/// Policy-erased cache wrapper with a consistent API for both strategies.
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
{
    Recency(RecencyCache<K, V>),
    Frequency(FrequencyCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Looks up a key; a hit counts as a policy access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.get(key),
            CacheInner::Frequency(cache) => cache.get(key),
        }
    }

    /// Inserts a key/value pair, returning the previous value if the key
    /// existed. May evict the least valuable entry when full.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.insert(key, value),
            CacheInner::Frequency(cache) => cache.insert(key, value),
        }
    }

    /// Removes and returns the most valuable entry.
    pub fn pop(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.pop(),
            CacheInner::Frequency(cache) => cache.pop(),
        }
    }

    /// Removes and returns the least valuable entry (the eviction target).
    pub fn pull(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.pull(),
            CacheInner::Frequency(cache) => cache.pull(),
        }
    }

    /// Removes an entry by key.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.remove(key),
            CacheInner::Frequency(cache) => cache.remove(key),
        }
    }

    /// Removes every entry matching the predicate; returns the count.
    pub fn remove_where<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.remove_where(pred),
            CacheInner::Frequency(cache) => cache.remove_where(pred),
        }
    }

    /// Checks key existence without touching eviction order.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Recency(cache) => cache.contains(key),
            CacheInner::Frequency(cache) => cache.contains(key),
        }
    }

    /// Reads a value without touching eviction order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Recency(cache) => cache.peek(key),
            CacheInner::Frequency(cache) => cache.peek(key),
        }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Recency(cache) => cache.len(),
            CacheInner::Frequency(cache) => cache.len(),
        }
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Recency(cache) => cache.capacity(),
            CacheInner::Frequency(cache) => cache.capacity(),
        }
    }

    /// Returns `true` once the live count has reached capacity.
    pub fn is_full(&self) -> bool {
        match &self.inner {
            CacheInner::Recency(cache) => cache.is_full(),
            CacheInner::Frequency(cache) => cache.is_full(),
        }
    }

    /// Drains all entries via `pop`.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Recency(cache) => cache.clear(),
            CacheInner::Frequency(cache) => cache.clear(),
        }
    }

    /// The strategy this instance was built with.
    pub fn strategy(&self) -> EvictionStrategy {
        match &self.inner {
            CacheInner::Recency(_) => EvictionStrategy::Recency,
            CacheInner::Frequency(_) => EvictionStrategy::Frequency,
        }
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        match &self.inner {
            CacheInner::Recency(cache) => cache.stats(),
            CacheInner::Frequency(cache) => cache.stats(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("strategy", &self.strategy())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

/// Builder for cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Creates a builder with the given capacity.
    ///
    /// Capacity 0 is legal: the built cache is permanently full and churns
    /// its single transient entry on every insert.
    pub fn new(capacity: usize) -> Self {
        CacheBuilder { capacity }
    }

    /// Builds a single-threaded cache with the chosen strategy.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::builder::{CacheBuilder, EvictionStrategy};
    ///
    /// let mut cache = CacheBuilder::new(2).build::<&str, i32>(EvictionStrategy::Frequency);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.get(&"a");
    /// cache.insert("c", 3); // "b" has the lowest count: evicted
    /// assert!(!cache.contains(&"b"));
    /// ```
    pub fn build<K, V>(self, strategy: EvictionStrategy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match strategy {
            EvictionStrategy::Recency => CacheInner::Recency(RecencyCache::new(self.capacity)),
            EvictionStrategy::Frequency => {
                CacheInner::Frequency(FrequencyCache::new(self.capacity))
            },
        };
        Cache { inner }
    }

    /// Builds a lock-wrapped cache for multi-threaded access.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::builder::{CacheBuilder, EvictionStrategy};
    ///
    /// let cache = CacheBuilder::new(10).build_shared::<u64, String>(EvictionStrategy::Recency);
    /// cache.insert(1, "one".to_string());
    /// assert_eq!(cache.get(&1), Some("one".to_string()));
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_shared<K, V>(self, strategy: EvictionStrategy) -> crate::sync::SharedCache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        crate::sync::SharedCache::from_cache(self.build(strategy))
    }
}
