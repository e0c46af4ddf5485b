//! Cache trait for storing fetched statement bundles.
//!
//! This module defines [`SelectionKey`] and the [`BundleCache`] trait.
//! A bundle fetch is explicit caller action; the cache is only mutated by
//! that action, and reads never mutate it. The single-company interaction
//! model needs at most one live bundle, but implementations may retain a
//! bounded map keyed by [`SelectionKey`] without changing observable
//! behavior for the single-selection case.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::bundle::StatementBundle;
use crate::error::Result;
use crate::types::Symbol;

/// Identity of one cached fetch: the symbol and the credential it was
/// fetched with.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    symbol: Symbol,
    api_key: String,
}

impl SelectionKey {
    /// Creates a key from a symbol and API key.
    #[must_use]
    pub const fn new(symbol: Symbol, api_key: String) -> Self {
        Self { symbol, api_key }
    }

    /// The symbol half of the key.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

impl fmt::Debug for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionKey")
            .field("symbol", &self.symbol)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Trait for caching fetched statement bundles.
///
/// Implementations store whole bundles only; a bundle is replaced
/// wholesale on re-fetch, never patched field-by-field.
#[async_trait]
pub trait BundleCache: Send + Sync {
    /// Retrieves the cached bundle for a selection.
    ///
    /// Returns `Ok(Some(bundle))` if cached, `Ok(None)` if not.
    async fn get(&self, key: &SelectionKey) -> Result<Option<Arc<StatementBundle>>>;

    /// Stores a bundle for a selection, replacing any previous bundle.
    async fn put(&self, key: &SelectionKey, bundle: Arc<StatementBundle>) -> Result<()>;

    /// Drops the cached bundle for a selection, if any.
    async fn invalidate(&self, key: &SelectionKey) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached bundles.
    async fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_key_debug_redacts_api_key() {
        let key = SelectionKey::new(Symbol::new("AAPL"), "secret_key_12345".to_string());
        let debug_str = format!("{key:?}");
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("AAPL"));
    }

    #[test]
    fn test_selection_key_identity_includes_api_key() {
        let a = SelectionKey::new(Symbol::new("AAPL"), "key-1".to_string());
        let b = SelectionKey::new(Symbol::new("AAPL"), "key-2".to_string());
        assert_ne!(a, b);
    }
}
