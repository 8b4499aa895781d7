//! LRU Policy Module
//!
//! Least-recently-used eviction: every access moves the key to the
//! most-recent end; the victim is whatever has sat untouched the longest.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::config::DEFAULT_CAPACITY;
use crate::eviction::{EvictionPolicy, KeyList};

// == LRU Policy ==
/// Tracks recency order and evicts the least recently used key.
#[derive(Debug)]
pub struct LruPolicy<K> {
    /// Front = least recent, back = most recent
    order: Mutex<KeyList<K>>,
    /// Kept for constructor parity; the inner lock is required for shared
    /// access and stays in both modes.
    #[allow(dead_code)]
    thread_safe: bool,
}

impl<K> LruPolicy<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates an LRU policy pre-sized for `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, true)
    }

    /// Creates an LRU policy with explicit thread-safety intent.
    ///
    /// A zero `capacity` pre-sizes for the default of 100; the policy never
    /// enforces capacity either way.
    pub fn with_config(capacity: usize, thread_safe: bool) -> Self {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        Self {
            order: Mutex::new(KeyList::with_capacity(capacity)),
            thread_safe,
        }
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Eq + Hash + Clone + Send,
{
    // == Access ==
    /// Moves `key` to the most-recent end, tracking it first if needed.
    fn access(&self, key: &K) {
        let mut order = self.order.lock();
        if !order.move_to_back(key) {
            order.push_back(key.clone());
        }
    }

    // == Evict ==
    /// Removes and returns the least recently used key.
    fn evict(&self) -> Option<K> {
        self.order.lock().pop_front()
    }

    // == Remove ==
    fn remove(&self, key: &K) {
        self.order.lock().remove(key);
    }

    // == Clear ==
    fn clear(&self) {
        self.order.lock().clear();
    }

    // == Length ==
    fn len(&self) -> usize {
        self.order.lock().len()
    }
}
