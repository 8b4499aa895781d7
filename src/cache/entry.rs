//! Cache Entry Module
//!
//! Defines the record stored per key (value plus expiration metadata) and the
//! free-list pool that recycles record allocations.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

// == Cache Entry ==
/// A single cache record: the stored value and its optional expiry.
///
/// The value is `None` only while the record sits in the [`EntryPool`]; a
/// record held by a store always carries `Some`.
#[derive(Debug, Default)]
pub struct CacheEntry<V> {
    /// The stored value; taken when the record is pooled
    value: Option<V>,
    /// Expiration deadline, `None` = never expires
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an empty record with no value and no TTL.
    pub fn new() -> Self {
        Self {
            value: None,
            expires_at: None,
        }
    }

    /// Creates a record holding `value` with the given TTL.
    ///
    /// A zero `ttl` means the record never expires.
    pub fn with_value(value: V, ttl: Duration) -> Self {
        let mut entry = Self::new();
        entry.fill(value, ttl);
        entry
    }

    /// Sets the value and TTL in one step (pool-acquire path).
    pub(crate) fn fill(&mut self, value: V, ttl: Duration) {
        self.value = Some(value);
        self.set_ttl(ttl);
    }

    // == TTL ==
    /// Sets the expiry `ttl` from now. Zero disables expiration.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.expires_at = (ttl > Duration::ZERO).then(|| Instant::now() + ttl);
    }

    /// Sets an absolute expiration deadline.
    pub fn set_expiry(&mut self, deadline: Instant) {
        self.expires_at = Some(deadline);
    }

    // == Is Expired ==
    /// Checks whether the record has expired.
    ///
    /// A record is expired when it has a deadline and the current instant is
    /// strictly past it; a deadline exactly equal to `now` is still live.
    /// Records without a TTL never expire.
    pub fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(deadline) if Instant::now() > deadline)
    }

    // == Value Access ==
    /// Returns the stored value, or `None` for a pooled (reset) record.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    // == Remaining TTL ==
    /// Returns the time left before expiry.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the record has already expired
    /// - `Some(remaining)` if the record has a TTL still running
    /// - `None` if the record has no TTL (never expires)
    pub fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    // == Reset ==
    /// Clears the record for pool reuse: drops the value, clears the TTL.
    pub(crate) fn reset(&mut self) {
        self.value = None;
        self.expires_at = None;
    }
}

// == Entry Pool ==
/// Thread-safe free list of recycled cache records.
///
/// Records returned through [`release`](EntryPool::release) are fully reset
/// before they become visible to [`acquire`](EntryPool::acquire); callers can
/// never observe a previous occupant's value or TTL.
#[derive(Debug, Default)]
pub struct EntryPool<V> {
    free: Mutex<Vec<Box<CacheEntry<V>>>>,
}

impl<V> EntryPool<V> {
    // == Constructor ==
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    // == Acquire ==
    /// Returns a reset record, reusing a pooled allocation when one exists.
    pub fn acquire(&self) -> Box<CacheEntry<V>> {
        self.free
            .lock()
            .pop()
            .unwrap_or_else(|| Box::new(CacheEntry::new()))
    }

    // == Release ==
    /// Resets a record and returns its allocation to the free list.
    pub fn release(&self, mut entry: Box<CacheEntry<V>>) {
        entry.reset();
        self.free.lock().push(entry);
    }

    /// Number of records currently pooled.
    pub fn pooled(&self) -> usize {
        self.free.lock().len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_no_ttl() {
        let entry = CacheEntry::with_value("test_value", Duration::ZERO);

        assert_eq!(entry.value(), Some(&"test_value"));
        assert!(!entry.is_expired());
        assert!(entry.remaining_ttl().is_none());
    }

    #[test]
    fn test_entry_with_ttl() {
        let entry = CacheEntry::with_value("test_value", Duration::from_secs(60));

        assert_eq!(entry.value(), Some(&"test_value"));
        assert!(!entry.is_expired());
        assert!(entry.remaining_ttl().is_some());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::with_value("test_value", Duration::from_millis(10));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(30));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_past_deadline_is_expired() {
        let mut entry = CacheEntry::with_value("test", Duration::ZERO);
        entry.set_expiry(Instant::now() - Duration::from_millis(5));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_future_deadline_is_live() {
        let mut entry = CacheEntry::with_value("test", Duration::ZERO);
        entry.set_expiry(Instant::now() + Duration::from_secs(3600));

        assert!(!entry.is_expired());
    }

    #[test]
    fn test_remaining_ttl_bounds() {
        let entry = CacheEntry::with_value("test", Duration::from_secs(10));

        let remaining = entry.remaining_ttl().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_remaining_ttl_expired_is_zero() {
        let mut entry = CacheEntry::with_value("test", Duration::ZERO);
        entry.set_expiry(Instant::now() - Duration::from_millis(5));

        assert_eq!(entry.remaining_ttl(), Some(Duration::ZERO));
    }

    #[test]
    fn test_set_ttl_overwrites_previous_deadline() {
        let mut entry = CacheEntry::with_value("test", Duration::from_millis(10));

        entry.set_ttl(Duration::ZERO);
        sleep(Duration::from_millis(30));

        assert!(!entry.is_expired());
    }

    #[test]
    fn test_pool_acquire_empty_allocates() {
        let pool: EntryPool<String> = EntryPool::new();

        let entry = pool.acquire();
        assert!(entry.value().is_none());
        assert_eq!(pool.pooled(), 0);
    }

    #[test]
    fn test_pool_release_resets_record() {
        let pool = EntryPool::new();

        let mut entry = pool.acquire();
        entry.fill("secret", Duration::from_secs(60));
        pool.release(entry);
        assert_eq!(pool.pooled(), 1);

        let recycled = pool.acquire();
        assert!(recycled.value().is_none());
        assert!(recycled.remaining_ttl().is_none());
        assert!(!recycled.is_expired());
    }

    #[test]
    fn test_pool_reuses_allocations() {
        let pool: EntryPool<u32> = EntryPool::new();

        pool.release(pool.acquire());
        pool.release(pool.acquire());
        assert_eq!(pool.pooled(), 1, "released record should be reacquired");
    }
}
