use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Cache entry for an uploaded CSV
#[derive(Clone)]
struct UploadCacheEntry {
    content: Arc<str>,
    created_at: Instant,
}

struct UploadCacheInner {
    entries: HashMap<String, UploadCacheEntry>,
    access_order: Vec<String>,
    hits: usize,
    misses: usize,
}

/// Bounded LRU cache of uploaded CSV text, keyed by an opaque token, with TTL.
pub struct UploadCache {
    inner: Mutex<UploadCacheInner>,
    max_size: usize,
    ttl: Duration,
}

impl UploadCache {
    pub fn new(max_size: usize, ttl_secs: u64) -> Self {
        Self {
            inner: Mutex::new(UploadCacheInner {
                entries: HashMap::new(),
                access_order: Vec::new(),
                hits: 0,
                misses: 0,
            }),
            max_size: max_size.max(1),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Store content and hand back the token that names it.
    pub fn insert(&self, content: String) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut inner = self.lock();

        Self::purge_expired(&mut inner, self.ttl);

        // Evict oldest entries if at capacity
        while inner.entries.len() >= self.max_size && !inner.access_order.is_empty() {
            let oldest = inner.access_order.remove(0);
            inner.entries.remove(&oldest);
        }

        inner.entries.insert(
            token.clone(),
            UploadCacheEntry {
                content: Arc::from(content),
                created_at: Instant::now(),
            },
        );
        inner.access_order.push(token.clone());
        token
    }

    /// Content for a live token. Expired entries are dropped on lookup.
    pub fn get(&self, token: &str) -> Option<Arc<str>> {
        let mut inner = self.lock();

        let result = match inner.entries.get(token) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => Some(entry.content.clone()),
            _ => None,
        };

        if result.is_some() {
            inner.hits += 1;
            inner.access_order.retain(|k| k != token);
            inner.access_order.push(token.to_string());
        } else {
            inner.misses += 1;
            if inner.entries.remove(token).is_some() {
                inner.access_order.retain(|k| k != token);
            }
        }

        result
    }

    /// Clear expired entries
    pub fn cleanup(&self) {
        let mut inner = self.lock();
        Self::purge_expired(&mut inner, self.ttl);
    }

    pub fn stats(&self) -> UploadCacheStats {
        let inner = self.lock();
        UploadCacheStats {
            total_entries: inner.entries.len(),
            max_size: self.max_size,
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    fn purge_expired(inner: &mut UploadCacheInner, ttl: Duration) {
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.created_at.elapsed() >= ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired {
            inner.entries.remove(&key);
            inner.access_order.retain(|k| k != &key);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UploadCacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadCacheStats {
    pub total_entries: usize,
    pub max_size: usize,
    pub hits: usize,
    pub misses: usize,
}
