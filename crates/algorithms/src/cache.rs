//! Bounded concurrent cache with first-in first-out eviction
//!
//! Used for memoized modular inverses and for the nonce registries. Hits are
//! a pure optimization for the former; callers never depend on an entry
//! surviving eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use parking_lot::Mutex;

struct Inner<K, V> {
    map: HashMap<K, V>,
    order: VecDeque<K>,
}

/// Fixed-capacity map safe for concurrent reads and writes.
pub struct BoundedCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a value.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().map.get(key).cloned()
    }

    /// Insert or replace a value, evicting the oldest entry when full.
    pub fn insert(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        if let Some(slot) = inner.map.get_mut(&key) {
            *slot = value;
            return;
        }
        Self::make_room(&mut inner, self.capacity);
        inner.order.push_back(key.clone());
        inner.map.insert(key, value);
    }

    /// Insert `value` unless `key` is present; returns the value that ends up
    /// stored under `key`.
    pub fn get_or_insert(&self, key: K, value: V) -> V {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.map.get(&key) {
            return existing.clone();
        }
        Self::make_room(&mut inner, self.capacity);
        inner.order.push_back(key.clone());
        inner.map.insert(key, value.clone());
        value
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// The lock is not held while `f` runs, so two callers may compute the
    /// same entry concurrently; the value stored first wins.
    pub fn get_or_try_insert_with<E, F>(&self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = f()?;
        Ok(self.get_or_insert(key, value))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.order.clear();
    }

    fn make_room(inner: &mut Inner<K, V>, capacity: usize) {
        while inner.map.len() >= capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

impl<K, V> core::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_and_get() {
        let cache = BoundedCache::new(4);
        assert!(cache.is_empty());
        cache.insert(1u32, "one");
        cache.insert(2u32, "two");
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);

        cache.insert(1, "uno");
        assert_eq!(cache.get(&1), Some("uno"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fifo_eviction() {
        let cache = BoundedCache::new(3);
        for i in 0..5u32 {
            cache.insert(i, i * 10);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&4), Some(40));
    }

    #[test]
    fn test_get_or_insert_keeps_first() {
        let cache = BoundedCache::new(8);
        assert_eq!(cache.get_or_insert("k", 1), 1);
        assert_eq!(cache.get_or_insert("k", 2), 1);
    }

    #[test]
    fn test_get_or_try_insert_with() {
        let cache: BoundedCache<u32, u32> = BoundedCache::new(8);
        let mut calls = 0;
        for _ in 0..3 {
            let v: Result<u32, ()> = cache.get_or_try_insert_with(7, || {
                calls += 1;
                Ok(49)
            });
            assert_eq!(v, Ok(49));
        }
        assert_eq!(calls, 1);

        let err: Result<u32, &str> = cache.get_or_try_insert_with(8, || Err("nope"));
        assert_eq!(err, Err("nope"));
        assert_eq!(cache.get(&8), None);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let cache = BoundedCache::new(0);
        cache.insert(1u8, 1u8);
        cache.insert(2u8, 2u8);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&2), Some(2));
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(BoundedCache::new(64));
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        cache.insert(t * 1000 + i, i);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
        cache.clear();
        assert!(cache.is_empty());
    }
}
