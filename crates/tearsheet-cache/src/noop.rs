//! No-op cache implementation.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tearsheet_core::{BundleCache, Result, SelectionKey, StatementBundle};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and the mutating methods succeed
/// without effect. Useful for disabling caching or testing code paths
/// without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBundleCache;

impl NoopBundleCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BundleCache for NoopBundleCache {
    async fn get(&self, _key: &SelectionKey) -> Result<Option<Arc<StatementBundle>>> {
        trace!("NoopBundleCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _key: &SelectionKey, _bundle: Arc<StatementBundle>) -> Result<()> {
        trace!("NoopBundleCache: put called, doing nothing");
        Ok(())
    }

    async fn invalidate(&self, _key: &SelectionKey) -> Result<()> {
        trace!("NoopBundleCache: invalidate called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopBundleCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopBundleCache: clear called, doing nothing");
        Ok(())
    }
}
