//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// A point-in-time snapshot of cache performance metrics.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of failed retrievals (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Number of live entries at snapshot time
    pub size: usize,
    /// Configured capacity
    pub capacity: usize,
    /// `hits / (hits + misses)`, or 0.0 before any lookup
    pub hit_ratio: f64,
}

// == Stat Counters ==
/// Live counters behind the snapshot.
///
/// Updated with atomic adds because read operations bump them while holding
/// the coordinator lock in shared mode, so multiple readers race on them.
#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StatCounters {
    // == Constructor ==
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Eviction ==
    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // == Reset ==
    /// Zeroes all counters. Only `clear()` does this.
    pub(crate) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Builds a [`CacheStats`] snapshot from the current counter values.
    ///
    /// The hit ratio is `hits / (hits + misses)`, or 0.0 when no lookups have
    /// been recorded yet.
    pub(crate) fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let evictions = self.evictions.load(Ordering::Relaxed);

        let total = hits + misses;
        let hit_ratio = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        CacheStats {
            hits,
            misses,
            evictions,
            size,
            capacity,
            hit_ratio,
        }
    }
}
