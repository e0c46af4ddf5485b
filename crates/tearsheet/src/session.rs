//! Session orchestration over a statement source and a bundle cache.
//!
//! [`AnalysisSession`] replaces ambient UI-session state with an explicit,
//! caller-owned object: it drives fetches, owns the active selection, and
//! mediates every read of the cached bundle. A bundle is only ever fetched
//! by explicit caller action, stored atomically, and replaced wholesale;
//! reads never fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use tearsheet_core::{
    AnalysisError, BundleCache, RatioOutcome, Result, Selection, SelectionKey, StatementBundle,
    StatementSource, Symbol, compute_ratios,
};

/// Caller-owned pipeline state: one statement source, one cache, one
/// active selection.
///
/// Concurrent fetches are resolved by request order: if a newer fetch is
/// requested while an older one is still in flight, the older completion
/// is discarded rather than overwriting the newer bundle.
pub struct AnalysisSession {
    source: Arc<dyn StatementSource>,
    cache: Arc<dyn BundleCache>,
    fetch_seq: AtomicU64,
    selection: RwLock<Option<Selection>>,
}

impl std::fmt::Debug for AnalysisSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("source", &self.source.name())
            .field("fetches", &self.fetch_seq.load(Ordering::Relaxed))
            .finish()
    }
}

impl AnalysisSession {
    /// Create a session over a statement source and a bundle cache.
    #[must_use]
    pub fn new(source: Arc<dyn StatementSource>, cache: Arc<dyn BundleCache>) -> Self {
        Self {
            source,
            cache,
            fetch_seq: AtomicU64::new(0),
            selection: RwLock::new(None),
        }
    }

    /// Fetch the complete bundle for a symbol and make it the active
    /// selection.
    ///
    /// All-or-nothing: if any resource fetch fails, the cache is left
    /// unchanged and the previously active bundle (if any) remains
    /// visible. If a newer fetch was requested while this one was in
    /// flight, its result is returned to the caller but not cached.
    pub async fn fetch(&self, symbol: &Symbol, api_key: &str) -> Result<Arc<StatementBundle>> {
        if symbol.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "symbol must not be empty".to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "api key must not be empty".to_string(),
            ));
        }

        let ticket = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(symbol = %symbol, ticket, "Fetching bundle");

        // Make the selection active up front, carrying the chosen growth
        // metrics across the refetch.
        let previous = {
            let mut selection = self.selection.write().await;
            let previous = selection.take();
            let mut next = Selection::new(symbol.clone(), api_key.to_string());
            if let Some(prev) = &previous {
                next.metrics = prev.metrics.clone();
            }
            *selection = Some(next);
            previous
        };

        match self.source.fetch_bundle(symbol, api_key).await {
            Ok(bundle) => {
                let bundle = Arc::new(bundle);
                if self.fetch_seq.load(Ordering::SeqCst) == ticket {
                    let key = SelectionKey::new(symbol.clone(), api_key.to_string());
                    self.cache.put(&key, Arc::clone(&bundle)).await?;
                } else {
                    debug!(symbol = %symbol, ticket, "Discarding stale fetch result");
                }
                Ok(bundle)
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Bundle fetch failed, keeping prior state");
                // Roll the selection back so the prior bundle stays
                // visible, unless a newer fetch already replaced it.
                if self.fetch_seq.load(Ordering::SeqCst) == ticket {
                    *self.selection.write().await = previous;
                }
                Err(e)
            }
        }
    }

    /// The cached bundle for the active selection.
    ///
    /// Returns `None` before the first successful fetch. Never triggers a
    /// fetch.
    pub async fn current(&self) -> Result<Option<Arc<StatementBundle>>> {
        let key = match self.selection.read().await.as_ref() {
            Some(selection) => selection.key(),
            None => return Ok(None),
        };
        self.cache.get(&key).await
    }

    /// The derived ratio set for the active bundle.
    ///
    /// Returns `None` before the first successful fetch.
    pub async fn ratios(&self) -> Result<Option<Vec<RatioOutcome>>> {
        Ok(self.current().await?.map(|bundle| compute_ratios(&bundle)))
    }

    /// The growth metrics available for charting from the active bundle.
    pub async fn available_metrics(&self) -> Result<Vec<String>> {
        Ok(self
            .current()
            .await?
            .map(|bundle| bundle.growth.metric_names())
            .unwrap_or_default())
    }

    /// Store the caller's ordered growth-metric choice.
    ///
    /// The choice persists across refetches until changed; names are
    /// validated lazily against whatever bundle is current at read time.
    pub async fn select_metrics(&self, metrics: Vec<String>) -> Result<()> {
        let mut selection = self.selection.write().await;
        match selection.as_mut() {
            Some(selection) => {
                selection.metrics = metrics;
                Ok(())
            }
            None => Err(AnalysisError::InvalidParameter(
                "no active selection to choose metrics for".to_string(),
            )),
        }
    }

    /// The chosen growth metrics, validated against the current bundle.
    ///
    /// Names absent from the current bundle are dropped silently; order
    /// is the caller's.
    pub async fn selected_metrics(&self) -> Result<Vec<String>> {
        let chosen = match self.selection.read().await.as_ref() {
            Some(selection) => selection.metrics.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(self
            .current()
            .await?
            .map(|bundle| bundle.growth.select(&chosen))
            .unwrap_or_default())
    }

    /// The (date, value) time series for each validated chosen metric.
    pub async fn growth_series(&self) -> Result<Vec<(String, Vec<(String, f64)>)>> {
        let bundle = match self.current().await? {
            Some(bundle) => bundle,
            None => return Ok(Vec::new()),
        };
        let chosen = match self.selection.read().await.as_ref() {
            Some(selection) => selection.metrics.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(bundle
            .growth
            .select(&chosen)
            .into_iter()
            .map(|metric| {
                let points = bundle.growth.series(&metric);
                (metric, points)
            })
            .collect())
    }

    /// The symbols for which statements are available from the source.
    pub async fn symbols(&self, api_key: &str) -> Result<Vec<String>> {
        self.source.symbol_list(api_key).await
    }

    /// Drop the cached bundle for the active selection, if any.
    pub async fn invalidate(&self) -> Result<()> {
        let key = match self.selection.read().await.as_ref() {
            Some(selection) => selection.key(),
            None => return Ok(()),
        };
        self.cache.invalidate(&key).await
    }
}
