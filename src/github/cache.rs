use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};

use crate::error::Result;

struct CacheEntry {
    created_at: Instant,
    cell: Arc<OnceCell<Value>>,
}

/// TTL cache of parsed upstream responses, keyed by the exact request.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        // Concurrent callers for one key share a single cell and so a single fetch
        let cell = {
            let mut entries = self.entries.lock().await;
            let now = Instant::now();
            let ttl = self.ttl;
            entries.retain(|_, entry| now.duration_since(entry.created_at) < ttl);

            entries
                .entry(key.to_string())
                .or_insert_with(|| CacheEntry {
                    created_at: now,
                    cell: Arc::new(OnceCell::new()),
                })
                .cell
                .clone()
        };

        if let Some(value) = cell.get() {
            tracing::debug!("Cache hit: {}", key);
            return Ok(value.clone());
        }

        match cell.get_or_try_init(fetch).await {
            Ok(value) => Ok(value.clone()),
            Err(e) => {
                // Failures are not cached; the next caller goes upstream again
                self.evict_failed(key, &cell).await;
                Err(e)
            }
        }
    }

    // Drop the entry only if it is still the same empty cell, so a success
    // raced in by another caller is kept.
    async fn evict_failed(&self, key: &str, cell: &Arc<OnceCell<Value>>) {
        let mut entries = self.entries.lock().await;
        let stale = entries
            .get(key)
            .map(|entry| Arc::ptr_eq(&entry.cell, cell) && !entry.cell.initialized())
            .unwrap_or(false);
        if stale {
            entries.remove(key);
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
