//! Integration Tests for the Cache Public API
//!
//! Exercises the library surface end to end: eviction policies, TTL and the
//! background sweeper, batch operations, custom policy and storage plug-ins,
//! generic key/value types, and concurrent use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::sleep;
use std::time::Duration;

use cachette::{Cache, EvictionPolicy, FifoPolicy, LifoPolicy, LruPolicy, MemoryStore};

// == Helper Types ==

/// Test policy ported from a demo strategy: the victim is always the middle
/// element of the insertion sequence.
struct MiddlePolicy {
    keys: Mutex<Vec<String>>,
}

impl MiddlePolicy {
    fn new() -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
        }
    }
}

impl EvictionPolicy<String> for MiddlePolicy {
    fn access(&self, key: &String) {
        let mut keys = self.keys.lock().unwrap();
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }

    fn evict(&self) -> Option<String> {
        let mut keys = self.keys.lock().unwrap();
        if keys.is_empty() {
            None
        } else {
            let middle = keys.len() / 2;
            Some(keys.remove(middle))
        }
    }

    fn remove(&self, key: &String) {
        self.keys.lock().unwrap().retain(|k| k != key);
    }

    fn clear(&self) {
        self.keys.lock().unwrap().clear();
    }

    fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

// == Eviction Policy Tests ==

#[test]
fn test_lru_end_to_end() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(3)
        .with_eviction_policy(LruPolicy::new(3))
        .build();

    cache.set("k1".into(), "v1".into());
    cache.set("k2".into(), "v2".into());
    cache.set("k3".into(), "v3".into());

    assert_eq!(cache.get(&"k1".into()), Some("v1".to_string()));

    // k2 is the least recently used entry now.
    cache.set("k4".into(), "v4".into());

    assert_eq!(cache.get(&"k2".into()), None);
    assert_eq!(cache.get(&"k3".into()), Some("v3".to_string()));
    assert_eq!(cache.get(&"k1".into()), Some("v1".to_string()));
    assert_eq!(cache.get(&"k4".into()), Some("v4".to_string()));
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_fifo_end_to_end() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(2)
        .with_eviction_policy(FifoPolicy::new(2))
        .build();

    cache.set("first".into(), "1".into());
    cache.set("second".into(), "2".into());

    // Reading "first" must not save it: FIFO ignores recency.
    cache.get(&"first".into());
    cache.set("third".into(), "3".into());

    assert_eq!(cache.get(&"first".into()), None);
    assert_eq!(cache.get(&"second".into()), Some("2".to_string()));
    assert_eq!(cache.get(&"third".into()), Some("3".to_string()));
}

#[test]
fn test_lifo_end_to_end() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(2)
        .with_eviction_policy(LifoPolicy::new(2))
        .build();

    cache.set("first".into(), "1".into());
    cache.set("second".into(), "2".into());
    cache.set("third".into(), "3".into());

    assert_eq!(cache.get(&"second".into()), None);
    assert_eq!(cache.get(&"first".into()), Some("1".to_string()));
    assert_eq!(cache.get(&"third".into()), Some("3".to_string()));
}

#[test]
fn test_custom_policy_chooses_the_victim() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(3)
        .with_eviction_policy(MiddlePolicy::new())
        .build();

    cache.set("a".into(), "1".into());
    cache.set("b".into(), "2".into());
    cache.set("c".into(), "3".into());
    cache.set("d".into(), "4".into());

    // Sequence was [a, b, c]; the middle element b dies.
    assert_eq!(cache.get(&"b".into()), None);
    assert_eq!(cache.get(&"a".into()), Some("1".to_string()));
    assert_eq!(cache.get(&"c".into()), Some("3".to_string()));
    assert_eq!(cache.get(&"d".into()), Some("4".to_string()));
    assert_eq!(cache.len(), 3);
}

// == TTL Tests ==

#[test]
fn test_ttl_mixed_lifetimes() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(5)
        .with_default_ttl(Duration::from_secs(2))
        .build();

    cache.set("a".into(), "x".into());
    cache.set_with_ttl("b".into(), "y".into(), Duration::from_millis(500));

    assert!(cache.contains(&"a".into()));
    assert!(cache.contains(&"b".into()));

    sleep(Duration::from_millis(600));

    assert!(cache.contains(&"a".into()));
    assert!(!cache.contains(&"b".into()));

    cache.close();
}

#[test]
fn test_sweeper_purges_in_the_background() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(10)
        .with_default_ttl(Duration::from_millis(300))
        .build();

    for i in 0..5 {
        cache.set(format!("key_{i}"), "value".into());
    }
    assert_eq!(cache.len(), 5);

    // Sweep interval clamps to 1s; allow two ticks without any reads.
    sleep(Duration::from_millis(2300));

    assert_eq!(cache.len(), 0, "expired entries should vanish unprompted");

    cache.close();
}

#[test]
fn test_expired_key_can_be_rewritten() {
    let cache: Cache<String, String> = Cache::builder().with_capacity(5).build();

    cache.set_with_ttl("key1".into(), "old".into(), Duration::from_millis(30));
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get(&"key1".into()), None);

    cache.set("key1".into(), "new".into());
    assert_eq!(cache.get(&"key1".into()), Some("new".to_string()));
    assert_eq!(cache.len(), 1);
}

// == Batch Tests ==

#[test]
fn test_batch_lifecycle() {
    let cache: Cache<String, String> = Cache::builder().with_capacity(10).build();

    let items: HashMap<String, String> = (1..=4)
        .map(|i| (format!("batch{i}"), format!("value{i}")))
        .collect();

    assert_eq!(cache.set_batch(items), 4);

    let keys: Vec<String> = vec![
        "batch1".into(),
        "batch2".into(),
        "batch3".into(),
        "nonexistent".into(),
    ];
    let found = cache.get_batch(&keys);
    assert_eq!(found.len(), 3);
    assert_eq!(found.get("batch2"), Some(&"value2".to_string()));

    let deleted = cache.delete_batch(&["batch1".into(), "batch2".into(), "nonexistent".into()]);
    assert_eq!(deleted, 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_overflowing_batch_respects_capacity() {
    let cache: Cache<String, String> = Cache::builder().with_capacity(3).build();

    let items: HashMap<String, String> = (0..5)
        .map(|i| (format!("key_{i}"), format!("value_{i}")))
        .collect();

    assert_eq!(cache.set_batch(items.clone()), 5);
    assert_eq!(cache.len(), 3, "overflow must evict down to capacity");

    // Whatever survived must read back as written.
    let keys: Vec<String> = items.keys().cloned().collect();
    for (key, value) in cache.get_batch(&keys) {
        assert_eq!(items.get(&key), Some(&value));
    }
}

// == Plug-in Surface Tests ==

#[test]
fn test_supplied_storage_backend() {
    let cache: Cache<String, u64> = Cache::builder()
        .with_capacity(4)
        .with_storage(MemoryStore::with_config(4, true))
        .build();

    cache.set("one".into(), 1);
    cache.set("two".into(), 2);

    assert_eq!(cache.get(&"one".into()), Some(1));
    assert_eq!(cache.len(), 2);
}

// == Generic Type Tests ==

#[test]
fn test_integer_keys() {
    let cache: Cache<u32, String> = Cache::builder().with_capacity(5).build();

    cache.set(1, "one".into());
    cache.set(2, "two".into());

    assert_eq!(cache.get(&1), Some("one".to_string()));
    assert_eq!(cache.get(&3), None);
}

#[test]
fn test_struct_values() {
    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: u64,
        name: String,
    }

    let cache: Cache<String, User> = Cache::builder().with_capacity(5).build();
    let user = User {
        id: 1,
        name: "Ada".into(),
    };

    cache.set("user1".into(), user.clone());

    assert_eq!(cache.get(&"user1".into()), Some(user));
}

// == Concurrency Tests ==

#[test]
fn test_concurrent_readers_and_writers() {
    let cache: Arc<Cache<String, String>> =
        Arc::new(Cache::builder().with_capacity(100).build());

    let mut handles = Vec::new();

    for id in 0..8 {
        let writer = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for j in 0..50 {
                writer.set(format!("key_{id}_{j}"), format!("value_{id}_{j}"));
            }
        }));

        let reader = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for j in 0..50 {
                reader.get(&format!("key_{id}_{j}"));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert!(cache.len() <= 100, "capacity must hold under concurrency");
    assert_eq!(stats.hits + stats.misses, 8 * 50, "every get must be counted");
}

#[test]
fn test_single_threaded_mode_full_lifecycle() {
    let cache: Cache<String, String> = Cache::builder()
        .with_capacity(10)
        .with_thread_safety(false)
        .build();

    cache.set("key1".into(), "value1".into());
    cache.set("key2".into(), "value2".into());

    assert_eq!(cache.get(&"key1".into()), Some("value1".to_string()));
    assert!(cache.delete(&"key2".into()));
    cache.clear();
    assert!(cache.is_empty());
}
