//! Cache Module
//!
//! The public cache facade. The coordinator drives the storage backend and
//! the eviction policy in a fixed sequence on every operation, and owns
//! everything they don't: capacity enforcement, TTL clamping, statistics,
//! batch operations, and the background expiry sweeper.

mod entry;
mod lock;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, EntryPool};
pub use stats::CacheStats;
pub use store::{MemoryStore, Storage};

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::builder::CacheBuilder;
use crate::cache::lock::OpLock;
use crate::cache::stats::StatCounters;
use crate::config::CacheConfig;
use crate::eviction::EvictionPolicy;
use crate::tasks::CleanupHandle;

// == Cache Core ==
/// Shared state behind a cache handle: the two subsystems, the coordinator
/// lock that sequences them, and the counters.
///
/// Methods here assume the caller already holds the appropriate lock mode;
/// the public [`Cache`] wrapper is responsible for acquisition.
pub(crate) struct CacheCore<K, V> {
    pub(crate) store: Box<dyn Storage<K, V>>,
    pub(crate) policy: Box<dyn EvictionPolicy<K>>,
    pub(crate) pool: Arc<EntryPool<V>>,
    pub(crate) config: CacheConfig,
    pub(crate) lock: OpLock,
    pub(crate) counters: StatCounters,
}

impl<K, V> CacheCore<K, V>
where
    K: Clone,
{
    pub(crate) fn new(
        store: Box<dyn Storage<K, V>>,
        policy: Box<dyn EvictionPolicy<K>>,
        pool: Arc<EntryPool<V>>,
        config: CacheConfig,
    ) -> Self {
        let lock = OpLock::new(config.thread_safe);
        Self {
            store,
            policy,
            pool,
            config,
            lock,
            counters: StatCounters::new(),
        }
    }

    // == Lookup ==
    /// Get-equivalent used by `get` and `get_batch`; caller holds the shared
    /// lock. Counts one hit or miss per call.
    fn lookup(&self, key: &K) -> Option<V> {
        match self.store.get(key) {
            Some(value) => {
                self.policy.access(key);
                self.counters.record_hit();
                Some(value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Set-equivalent used by `set_with_ttl` and `set_batch`; caller holds
    /// the exclusive lock.
    fn insert(&self, key: K, value: V, ttl: Duration) {
        let ttl = ttl.min(self.config.max_ttl);

        let mut entry = self.pool.acquire();
        entry.fill(value, ttl);

        // Live key: replace in place, capacity is unaffected.
        if self.store.contains(&key) {
            self.store.set(key.clone(), entry);
            self.policy.access(&key);
            return;
        }

        self.evict_for_room();

        self.store.set(key.clone(), entry);
        self.policy.access(&key);
    }

    /// Evicts until a slot is free.
    ///
    /// The policy may hand back keys the sweeper already purged; those free
    /// no room, count no eviction, and the loop asks for the next victim.
    fn evict_for_room(&self) {
        while self.store.len() >= self.config.capacity {
            match self.policy.evict() {
                Some(victim) => {
                    if self.store.delete(&victim) {
                        self.counters.record_eviction();
                        debug!("evicted entry under capacity pressure");
                    }
                }
                None => break,
            }
        }
    }

    // == Sweep ==
    /// One sweeper tick: purge every expired record under the exclusive
    /// lock. Swept keys are not reported to the policy; `evict_for_room`
    /// absorbs the stale entries later.
    pub(crate) fn sweep(&self) -> usize {
        let _guard = self.lock.write();
        self.store.cleanup_expired()
    }
}

// == Cache ==
/// Generic in-process key/value cache with bounded capacity, optional TTL,
/// and a pluggable eviction policy.
///
/// Construct through [`Cache::builder`]. With `thread_safe` (the default)
/// the handle can be shared freely across threads behind an `Arc`; without
/// it, the caller must serialize all access.
pub struct Cache<K, V> {
    core: Arc<CacheCore<K, V>>,
    sweeper: Option<CleanupHandle>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Starts a builder with default configuration.
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    pub(crate) fn from_parts(
        core: Arc<CacheCore<K, V>>,
        sweeper: Option<CleanupHandle>,
    ) -> Self {
        Self { core, sweeper }
    }

    // == Get ==
    /// Retrieves a clone of the value for `key`.
    ///
    /// A present, unexpired entry counts a hit and refreshes the key's
    /// standing with the eviction policy; anything else counts a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let _guard = self.core.lock.read();
        self.core.lookup(key)
    }

    // == Set ==
    /// Stores `value` under `key` with the configured default TTL.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.core.config.default_ttl)
    }

    /// Stores `value` under `key` with an explicit TTL.
    ///
    /// The TTL is clamped to the configured `max_ttl`; zero means the entry
    /// never expires. Overwriting a live key replaces value and TTL without
    /// touching capacity. Inserting into a full cache first evicts the
    /// policy's chosen victim.
    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let _guard = self.core.lock.write();
        self.core.insert(key, value, ttl);
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was actually removed.
    pub fn delete(&self, key: &K) -> bool {
        let _guard = self.core.lock.write();
        if self.core.store.delete(key) {
            self.core.policy.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry and resets all statistics counters.
    pub fn clear(&self) {
        let _guard = self.core.lock.write();
        self.core.store.clear();
        self.core.policy.clear();
        self.core.counters.reset();
    }

    // == Contains ==
    /// Checks for a live entry. Touches neither the policy nor the
    /// hit/miss counters.
    pub fn contains(&self, key: &K) -> bool {
        let _guard = self.core.lock.read();
        self.core.store.contains(key)
    }

    // == Size ==
    /// Current number of stored entries.
    pub fn len(&self) -> usize {
        let _guard = self.core.lock.read();
        self.core.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.core.config.capacity
    }

    // == Keys ==
    /// All stored keys, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        let _guard = self.core.lock.read();
        self.core.store.keys()
    }

    // == Stats ==
    /// Snapshot of the counters plus current size and capacity.
    pub fn stats(&self) -> CacheStats {
        let _guard = self.core.lock.read();
        self.core
            .counters
            .snapshot(self.core.store.len(), self.core.config.capacity)
    }

    // == Batch Operations ==
    /// Stores every pair with the default TTL under one lock acquisition.
    ///
    /// Iteration order over the map is unspecified, so when the batch itself
    /// overflows capacity, which keys survive depends on the policy's
    /// victim choices along that order. Returns the number of pairs applied.
    pub fn set_batch(&self, items: HashMap<K, V>) -> usize {
        let _guard = self.core.lock.write();
        let mut count = 0;
        for (key, value) in items {
            self.core.insert(key, value, self.core.config.default_ttl);
            count += 1;
        }
        count
    }

    /// Looks up every key under one lock acquisition.
    ///
    /// Live entries land in the result map and each count a hit; absent or
    /// expired keys each count a miss and are omitted. A duplicated input
    /// key yields one map entry but one hit per occurrence.
    pub fn get_batch(&self, keys: &[K]) -> HashMap<K, V> {
        let _guard = self.core.lock.read();
        let mut result = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.core.lookup(key) {
                result.insert(key.clone(), value);
            }
        }
        result
    }

    /// Deletes every key under one lock acquisition.
    ///
    /// Returns the number of entries actually removed.
    pub fn delete_batch(&self, keys: &[K]) -> usize {
        let _guard = self.core.lock.write();
        let mut count = 0;
        for key in keys {
            if self.core.store.delete(key) {
                self.core.policy.remove(key);
                count += 1;
            }
        }
        count
    }

    // == Close ==
    /// Shuts the cache down, stopping the background sweeper.
    ///
    /// Consumes the handle, so use-after-close cannot compile. Dropping the
    /// cache has the same effect.
    pub fn close(self) {
        // Drop does the work.
    }
}

impl<K, V> Drop for Cache<K, V> {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.stop();
        }
    }
}
