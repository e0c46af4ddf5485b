//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tearsheet_core::{BundleCache, Result, SelectionKey, StatementBundle};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry {
    bundle: Arc<StatementBundle>,
    cached_at: chrono::DateTime<Utc>,
}

impl CacheEntry {
    fn new(bundle: Arc<StatementBundle>) -> Self {
        Self {
            bundle,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Session-lived in-memory bundle cache.
///
/// Bundles are stored in an `RwLock`-protected `HashMap` keyed by
/// [`SelectionKey`] and are lost when the cache is dropped. The map form
/// generalizes the single-active-selection interaction model without
/// changing its observable behavior.
#[derive(Debug, Default)]
pub struct InMemoryBundleCache {
    bundles: RwLock<HashMap<SelectionKey, CacheEntry>>,
}

impl InMemoryBundleCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BundleCache for InMemoryBundleCache {
    #[instrument(skip(self), fields(symbol = %key.symbol()))]
    async fn get(&self, key: &SelectionKey) -> Result<Option<Arc<StatementBundle>>> {
        let cache = self.bundles.read().await;
        match cache.get(key) {
            Some(entry) => {
                debug!("Cache hit for bundle");
                Ok(Some(Arc::clone(&entry.bundle)))
            }
            None => {
                debug!("Cache miss for bundle");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, bundle), fields(symbol = %key.symbol()))]
    async fn put(&self, key: &SelectionKey, bundle: Arc<StatementBundle>) -> Result<()> {
        let mut cache = self.bundles.write().await;
        cache.insert(key.clone(), CacheEntry::new(bundle));
        debug!("Cached bundle");
        Ok(())
    }

    #[instrument(skip(self), fields(symbol = %key.symbol()))]
    async fn invalidate(&self, key: &SelectionKey) -> Result<()> {
        let mut cache = self.bundles.write().await;
        if cache.remove(key).is_some() {
            debug!("Invalidated cached bundle");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.bundles.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.bundles.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
