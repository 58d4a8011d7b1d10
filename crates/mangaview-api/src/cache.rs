//! In-memory cache of successful catalog responses.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

struct CacheEntry {
    stored_at: Instant,
    value: serde_json::Value,
}

/// TTL cache keyed by request identity. A zero TTL disables caching.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Fresh cached value for `key`. Expired entries are evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }

        let value = {
            let entry = self.entries.get(key)?;
            if entry.stored_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        };

        match value {
            Some(value) => serde_json::from_value(value).ok(),
            None => {
                self.entries.remove(key);
                None
            }
        }
    }

    /// Store `value` under `key`, purging expired entries first.
    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        if !self.is_enabled() {
            return;
        }
        self.purge_expired();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(
                    key.into(),
                    CacheEntry {
                        stored_at: Instant::now(),
                        value,
                    },
                );
            }
            Err(e) => debug!("Skipping cache insert: {}", e),
        }
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
