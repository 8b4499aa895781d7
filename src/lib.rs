//! Cachette - an in-process, generic key/value cache
//!
//! Bounded capacity with pluggable eviction (LRU, FIFO, LIFO, or custom),
//! optional per-entry TTL with a background sweeper, optional thread safety,
//! and hit/miss/eviction statistics.
//!
//! ```
//! use cachette::Cache;
//!
//! let cache = Cache::builder().with_capacity(2).build();
//!
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.set("c", 3); // capacity reached: "a" is evicted (LRU default)
//!
//! assert_eq!(cache.get(&"a"), None);
//! assert_eq!(cache.get(&"c"), Some(3));
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod eviction;

mod tasks;

pub use builder::CacheBuilder;
pub use cache::{Cache, CacheEntry, CacheStats, EntryPool, MemoryStore, Storage};
pub use config::CacheConfig;
pub use eviction::{EvictionPolicy, FifoPolicy, LifoPolicy, LruPolicy};
