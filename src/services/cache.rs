use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Key for cached candle history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandleKey {
    pub pair: String,
    pub interval: &'static str,
    pub limit: u32,
}

impl CandleKey {
    pub fn new(pair: &str, interval: &'static str, limit: u32) -> Self {
        Self {
            pair: pair.to_uppercase(),
            interval,
            limit,
        }
    }
}

/// Thread-safe expiring map.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`. Stale entries are evicted on read.
    pub fn get(&self, key: &K) -> Option<V> {
        let fresh = self
            .entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone());

        if fresh.is_none() {
            // Re-checked under the shard lock so a concurrent refresh survives.
            self.entries
                .remove_if(key, |_, entry| entry.fetched_at.elapsed() >= self.ttl);
        }
        fresh
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
    }

    /// Number of entries, including ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
