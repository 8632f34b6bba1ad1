//! Lock-serialized wrapper for multi-threaded access.
//!
//! [`SharedCache`] adds no semantics of its own: it holds one exclusive
//! `parking_lot::Mutex` around a policy-erased [`Cache`] for the full
//! duration of each public operation, so no operation is ever partially
//! visible to another thread. Values are handed back as clones, never as
//! references into the store.
//!
//! A `Mutex` rather than an `RwLock`: every public operation, including
//! `get`, mutates eviction metadata, so there is no read-only path to
//! share.
//!
//! ## Example
//!
//! ```
//! use std::thread;
//!
//! use boundcache::builder::EvictionStrategy;
//! use boundcache::sync::SharedCache;
//!
//! let cache: SharedCache<u64, String> = SharedCache::new(100, EvictionStrategy::Recency);
//!
//! let writer = cache.clone();
//! let handle = thread::spawn(move || {
//!     writer.insert(1, "from another thread".to_string());
//! });
//! handle.join().unwrap();
//!
//! assert_eq!(cache.get(&1), Some("from another thread".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::{Cache, CacheBuilder, EvictionStrategy};
use crate::cache::CacheStats;

/// Thread-safe cache: one exclusive lock around the whole store.
///
/// Cloning is cheap and shares the underlying cache.
pub struct SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<Cache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        SharedCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a shared cache with the given capacity and strategy.
    pub fn new(capacity: usize, strategy: EvictionStrategy) -> Self {
        Self::from_cache(CacheBuilder::new(capacity).build(strategy))
    }

    /// Wraps an existing single-threaded cache.
    pub fn from_cache(cache: Cache<K, V>) -> Self {
        SharedCache {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Looks up a key, returning a clone of the value on a hit.
    ///
    /// The hit counts as a policy access, exactly as in
    /// [`Cache::get`](crate::builder::Cache::get).
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts a key/value pair; returns the previous value if the key
    /// existed. May evict the least valuable entry when full.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Removes and returns the most valuable entry.
    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    /// Removes and returns the least valuable entry (the eviction target).
    pub fn pull(&self) -> Option<(K, V)> {
        self.inner.lock().pull()
    }

    /// Removes an entry by key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Removes every entry matching the predicate; returns the count.
    ///
    /// The predicate runs under the lock; keep it cheap and do not call
    /// back into the cache from inside it.
    pub fn remove_where<F>(&self, pred: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.inner.lock().remove_where(pred)
    }

    /// Checks key existence without touching eviction order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Reads a value without touching eviction order.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns `true` once the live count has reached capacity.
    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    /// Drains all entries via `pop`.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// The strategy this instance was built with.
    pub fn strategy(&self) -> EvictionStrategy {
        self.inner.lock().strategy()
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

impl<K, V> fmt::Debug for SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("SharedCache")
            .field("strategy", &cache.strategy())
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn serialized_ops_preserve_capacity() {
        let cache: SharedCache<u64, u64> = SharedCache::new(32, EvictionStrategy::Frequency);

        let mut handles = Vec::new();
        for t in 0..4u64 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    cache.insert(t * 1000 + i, i);
                    cache.get(&(t * 1000));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= cache.capacity());
    }

    #[test]
    fn values_come_back_as_clones() {
        let cache: SharedCache<&str, String> = SharedCache::new(4, EvictionStrategy::Recency);
        cache.insert("a", "value".to_string());

        let mut copy = cache.get(&"a").unwrap();
        copy.push_str(" mutated");

        // Mutating the returned clone never reaches the store.
        assert_eq!(cache.peek(&"a"), Some("value".to_string()));
    }

    #[test]
    fn pop_pull_and_clear_through_the_lock() {
        let cache: SharedCache<u64, u64> = SharedCache::new(8, EvictionStrategy::Recency);
        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.insert(3, 30);

        assert_eq!(cache.pop(), Some((3, 30)));
        assert_eq!(cache.pull(), Some((1, 10)));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn clones_share_the_store() {
        let cache: SharedCache<u64, u64> = SharedCache::new(4, EvictionStrategy::Frequency);
        let other = cache.clone();
        other.insert(7, 70);
        assert_eq!(cache.get(&7), Some(70));
    }
}
