//! Builder Module
//!
//! The construction surface for [`Cache`]. Options are applied in call
//! order on top of the defaults; whatever the caller does not supply is
//! built here (LRU policy, in-memory store, shared entry pool).

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Cache, CacheCore, EntryPool, MemoryStore, Storage};
use crate::config::{CacheConfig, DEFAULT_CAPACITY};
use crate::eviction::{EvictionPolicy, LruPolicy};
use crate::tasks::spawn_cleanup_task;

// == Cache Builder ==
/// Configures and builds a [`Cache`].
///
/// ```
/// use cachette::Cache;
/// use std::time::Duration;
///
/// let cache = Cache::builder()
///     .with_capacity(64)
///     .with_default_ttl(Duration::from_secs(30))
///     .build();
///
/// cache.set("answer", 42);
/// assert_eq!(cache.get(&"answer"), Some(42));
/// ```
pub struct CacheBuilder<K, V> {
    config: CacheConfig,
    policy: Option<Box<dyn EvictionPolicy<K>>>,
    store: Option<Box<dyn Storage<K, V>>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Starts from the default configuration: capacity 100, thread-safe,
    /// no default TTL, 24-hour max TTL.
    pub fn new() -> Self {
        Self {
            config: CacheConfig::default(),
            policy: None,
            store: None,
        }
    }

    // == Options ==
    /// Sets the capacity. Zero coerces to the default of 100.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        self
    }

    /// Supplies the eviction policy. Defaults to LRU.
    pub fn with_eviction_policy(mut self, policy: impl EvictionPolicy<K> + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Supplies the storage backend. Defaults to the in-memory store.
    pub fn with_storage(mut self, store: impl Storage<K, V> + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Enables or disables the coordinator lock.
    ///
    /// With `false`, the caller must serialize every operation externally.
    pub fn with_thread_safety(mut self, thread_safe: bool) -> Self {
        self.config.thread_safe = thread_safe;
        self
    }

    /// Sets the TTL applied by `set`. Zero (the default) disables expiry
    /// and the background sweeper.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.config.default_ttl = ttl;
        self
    }

    /// Sets the upper bound clamped onto per-call TTLs.
    pub fn with_max_ttl(mut self, ttl: Duration) -> Self {
        self.config.max_ttl = ttl;
        self
    }

    // == Build ==
    /// Wires everything together and starts the sweeper when a default TTL
    /// is configured.
    pub fn build(self) -> Cache<K, V> {
        let config = self.config;
        let pool = Arc::new(EntryPool::new());

        let store: Box<dyn Storage<K, V>> = self.store.unwrap_or_else(|| {
            Box::new(MemoryStore::with_pool(
                config.capacity,
                config.thread_safe,
                Arc::clone(&pool),
            ))
        });
        let policy: Box<dyn EvictionPolicy<K>> = self.policy.unwrap_or_else(|| {
            Box::new(LruPolicy::with_config(config.capacity, config.thread_safe))
        });

        store.reserve(config.capacity);

        let default_ttl = config.default_ttl;
        let core = Arc::new(CacheCore::new(store, policy, pool, config));

        let sweeper = (default_ttl > Duration::ZERO)
            .then(|| spawn_cleanup_task(Arc::clone(&core), default_ttl));

        Cache::from_parts(core, sweeper)
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
