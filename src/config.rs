//! Configuration Module
//!
//! The immutable settings a cache is built with. Values come in through the
//! builder; invalid ones are coerced to defaults rather than rejected.

use std::time::Duration;

// == Defaults ==
/// Capacity used when none (or zero) is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Upper bound applied to per-call TTLs unless overridden.
pub const DEFAULT_MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// == Cache Config ==
/// Cache construction parameters. Immutable once the cache is built.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of live entries before eviction kicks in
    pub capacity: usize,
    /// TTL applied by `set`; zero disables expiry and the sweeper
    pub default_ttl: Duration,
    /// Clamp for TTLs passed to `set_with_ttl`
    pub max_ttl: Duration,
    /// Whether the coordinator takes its lock on every operation
    pub thread_safe: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: Duration::ZERO,
            max_ttl: DEFAULT_MAX_TTL,
            thread_safe: true,
        }
    }
}
