//! In-memory query embedding cache backed by moka.
//!
//! TinyLFU admission, bounded entry count, idle expiry. Safe to read and
//! write from concurrent queries.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// Keys are blake3 hashes from [`super::query_key`]. Values are shared so a
/// hit never copies the vector.
pub struct L1MemoryCache {
    cache: Cache<String, Arc<[f32]>>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Arc<[f32]>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Arc<[f32]>) {
        self.cache.insert(key, embedding);
    }

    /// Approximate entry count. moka applies writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = L1MemoryCache::new(16);
        let v: Arc<[f32]> = Arc::from(vec![1.0, 2.0]);
        cache.insert("k".to_string(), v.clone());
        assert_eq!(cache.get("k").as_deref(), Some(&[1.0, 2.0][..]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn miss_returns_none() {
        let cache = L1MemoryCache::new(16);
        assert!(cache.get("missing").is_none());
        assert!(cache.is_empty());
    }
}
