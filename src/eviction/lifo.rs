//! LIFO Policy Module
//!
//! Reverse insertion order: tracking works exactly like FIFO, but the victim
//! is the most recently *inserted* key.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::config::DEFAULT_CAPACITY;
use crate::eviction::{EvictionPolicy, KeyList};

// == LIFO Policy ==
/// Tracks insertion order and evicts the newest-inserted key.
#[derive(Debug)]
pub struct LifoPolicy<K> {
    /// Front = oldest insertion, back = newest
    order: Mutex<KeyList<K>>,
    #[allow(dead_code)]
    thread_safe: bool,
}

impl<K> LifoPolicy<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates a LIFO policy pre-sized for `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, true)
    }

    /// Creates a LIFO policy with explicit thread-safety intent.
    pub fn with_config(capacity: usize, thread_safe: bool) -> Self {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        Self {
            order: Mutex::new(KeyList::with_capacity(capacity)),
            thread_safe,
        }
    }
}

impl<K> EvictionPolicy<K> for LifoPolicy<K>
where
    K: Eq + Hash + Clone + Send,
{
    // == Access ==
    /// Tracks `key` at the newest end if it is new; re-access is a no-op.
    fn access(&self, key: &K) {
        let mut order = self.order.lock();
        if !order.contains(key) {
            order.push_back(key.clone());
        }
    }

    // == Evict ==
    /// Removes and returns the most recently inserted key.
    fn evict(&self) -> Option<K> {
        self.order.lock().pop_back()
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
