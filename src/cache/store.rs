//! Storage Module
//!
//! The entry-store contract and the default hash-map backend. The store maps
//! keys to cache records and owns their expiry bookkeeping; eviction order is
//! the policy's concern, never the store's.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{CacheEntry, EntryPool};

// == Storage Trait ==
/// Backend contract for cache entry storage.
///
/// All methods take `&self`: a store is internally synchronized so it can be
/// shared behind the coordinator. The coordinator serializes every call under
/// its own lock, which makes the store's lock redundant in normal use; a
/// store call must therefore never take its lock twice (no upgrades).
pub trait Storage<K, V>: Send + Sync {
    /// Returns a clone of the live value for `key`.
    ///
    /// An expired entry is a miss. It stays in place; the sweeper or a later
    /// write purges it.
    fn get(&self, key: &K) -> Option<V>;

    /// Checks for a live (present and unexpired) entry without cloning.
    fn contains(&self, key: &K) -> bool;

    /// Inserts or replaces the record for `key`.
    ///
    /// A replaced record is returned to the entry pool.
    fn set(&self, key: K, entry: Box<CacheEntry<V>>);

    /// Removes and pools the record for `key`. Returns whether it existed.
    fn delete(&self, key: &K) -> bool;

    /// Pools every record, then empties the store.
    fn clear(&self);

    /// Current number of records, expired ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, in no particular order.
    fn keys(&self) -> Vec<K>;

    /// Removes and pools every expired record.
    ///
    /// Returns the number removed.
    fn cleanup_expired(&self) -> usize;

    /// Pre-sizes for `capacity` records. Only effective while empty; the
    /// store never rehashes mid-use on behalf of this hint.
    fn reserve(&self, capacity: usize);
}

// == Memory Store ==
/// Default in-memory store: a hash map guarded by a single-writer,
/// multi-reader lock, with records recycled through an [`EntryPool`].
#[derive(Debug)]
pub struct MemoryStore<K, V> {
    data: RwLock<HashMap<K, Box<CacheEntry<V>>>>,
    pool: Arc<EntryPool<V>>,
    /// Kept for constructor parity; the inner lock is required for shared
    /// access and stays in both modes.
    #[allow(dead_code)]
    thread_safe: bool,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates an empty store with default sizing.
    pub fn new() -> Self {
        Self::with_config(0, true)
    }

    /// Creates a store pre-sized for `capacity` entries.
    pub fn with_config(capacity: usize, thread_safe: bool) -> Self {
        Self::with_pool(capacity, thread_safe, Arc::new(EntryPool::new()))
    }

    /// Creates a store that recycles records through a shared pool.
    pub(crate) fn with_pool(
        capacity: usize,
        thread_safe: bool,
        pool: Arc<EntryPool<V>>,
    ) -> Self {
        Self {
            data: RwLock::new(HashMap::with_capacity(capacity)),
            pool,
            thread_safe,
        }
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Storage<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    // == Get ==
    fn get(&self, key: &K) -> Option<V> {
        let data = self.data.read();
        data.get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.value().cloned())
    }

    // == Contains ==
    fn contains(&self, key: &K) -> bool {
        let data = self.data.read();
        data.get(key).is_some_and(|entry| !entry.is_expired())
    }

    // == Set ==
    fn set(&self, key: K, entry: Box<CacheEntry<V>>) {
        let mut data = self.data.write();
        if let Some(replaced) = data.insert(key, entry) {
            self.pool.release(replaced);
        }
    }

    // == Delete ==
    fn delete(&self, key: &K) -> bool {
        let mut data = self.data.write();
        match data.remove(key) {
            Some(entry) => {
                self.pool.release(entry);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    fn clear(&self) {
        let mut data = self.data.write();
        for (_, entry) in data.drain() {
            self.pool.release(entry);
        }
    }

    // == Length ==
    fn len(&self) -> usize {
        self.data.read().len()
    }

    // == Keys ==
    fn keys(&self) -> Vec<K> {
        self.data.read().keys().cloned().collect()
    }

    // == Cleanup Expired ==
    fn cleanup_expired(&self) -> usize {
        let mut data = self.data.write();

        let expired: Vec<K> = data
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if let Some(entry) = data.remove(key) {
                self.pool.release(entry);
            }
        }

        expired.len()
    }

    // == Reserve ==
    fn reserve(&self, capacity: usize) {
        let mut data = self.data.write();
        if data.is_empty() && capacity > 0 {
            data.reserve(capacity);
        }
    }
}
