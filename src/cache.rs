//! # Bounded insertion-ordered TTL cache
//!
//! The suggestions cache (§3, §4.6): a `<query>:<lang>` keyed map with an
//! absolute expiry per entry and FIFO eviction once the map is full. A
//! single mutex guards the size check, eviction, and insert together so the
//! 500-entry bound is never exceeded under concurrent access (§5).
//!
//! This is intentionally a hand-rolled bounded map rather than a pulled-in
//! LRU crate: the eviction contract here is FIFO-on-insert, not
//! recency-on-access, which doesn't match what `lru`-style crates provide.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    results: Vec<String>,
    expires_at: Instant,
}

struct Inner {
    map: HashMap<String, Entry>,
    order: VecDeque<String>,
}

pub struct TtlCache {
    capacity: usize,
    ttl: Duration,
    inner: Mutex<Inner>,
}

impl TtlCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        TtlCache {
            capacity,
            ttl,
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Read-through lookup. Expired entries are removed lazily on read and
    /// treated as a miss. Removal drops the key from `order` too, so a
    /// lazily-expired entry can never leave a stale slot for `insert`'s FIFO
    /// eviction to pop without actually freeing room in `map`.
    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = inner.map.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.results.clone());
            }
            inner.map.remove(key);
            inner.order.retain(|k| k != key);
        }
        None
    }

    /// Write-through insert. If the key is new and the map is at capacity,
    /// evicts the oldest-inserted entry first, then inserts.
    pub fn insert(&self, key: String, results: Vec<String>) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let is_new = !inner.map.contains_key(&key);
        if is_new && inner.map.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.map.remove(&oldest);
            }
        }
        if is_new {
            inner.order.push_back(key.clone());
        }
        inner.map.insert(
            key,
            Entry {
                results,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().map.len()
    }
}

pub fn cache_key(query: &str, lang: &str) -> String {
    format!("{query}:{lang}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_after_insert() {
        let cache = TtlCache::new(10, Duration::from_secs(60));
        cache.insert("rust:en".to_string(), vec!["rust lang".to_string()]);
        assert_eq!(cache.get("rust:en"), Some(vec!["rust lang".to_string()]));
    }

    #[test]
    fn miss_for_unknown_key() {
        let cache = TtlCache::new(10, Duration::from_secs(60));
        assert_eq!(cache.get("nope:en"), None);
    }

    #[test]
    fn expired_entries_are_a_miss() {
        let cache = TtlCache::new(10, Duration::from_millis(1));
        cache.insert("k:en".to_string(), vec!["v".to_string()]);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("k:en"), None);
    }

    #[test]
    fn fifo_eviction_bounds_cache_size() {
        let cache = TtlCache::new(500, Duration::from_secs(60));
        for i in 0..10_000 {
            cache.insert(format!("q{i}:en"), vec![i.to_string()]);
        }
        assert!(cache.len() <= 500);
        assert_eq!(cache.get("q9999:en"), Some(vec!["9999".to_string()]));
        assert_eq!(cache.get("q0:en"), None);
    }

    #[test]
    fn expiring_a_key_via_get_does_not_leave_a_stale_order_slot() {
        // A key that expires and is reaped by `get` must not leave behind an
        // `order` entry that later lets FIFO eviction pop a no-op and grow
        // the map past capacity.
        let cache = TtlCache::new(2, Duration::from_millis(1));
        cache.insert("a:en".to_string(), vec!["a".to_string()]);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("a:en"), None);

        cache.insert("b:en".to_string(), vec!["b".to_string()]);
        cache.insert("c:en".to_string(), vec!["c".to_string()]);
        cache.insert("d:en".to_string(), vec!["d".to_string()]);

        assert!(cache.len() <= 2, "cache grew past capacity: {}", cache.len());
    }

    #[test]
    fn cache_key_format() {
        assert_eq!(cache_key("rust", "en"), "rust:en");
    }
}
