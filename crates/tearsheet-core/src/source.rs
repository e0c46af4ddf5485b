//! Provider trait for fetching statement data.
//!
//! [`StatementSource`] is the seam between the pipeline and a remote
//! financial-data API. Implementations fetch raw JSON per resource and
//! assemble whole bundles; the remote API is otherwise opaque.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::bundle::StatementBundle;
use crate::error::Result;
use crate::resource::ResourceKind;
use crate::types::Symbol;

/// A remote source of financial statement data.
#[async_trait]
pub trait StatementSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "FMP").
    fn name(&self) -> &str;

    /// Returns a description of this source.
    fn description(&self) -> &str;

    /// Fetches one resource for a symbol, returning the decoded JSON body
    /// unvalidated beyond being valid JSON.
    async fn fetch_raw(
        &self,
        kind: ResourceKind,
        symbol: &Symbol,
        api_key: &str,
    ) -> Result<Value>;

    /// Fetches and assembles the complete bundle for a symbol.
    ///
    /// All-or-nothing: if any single resource fetch fails or comes back
    /// empty, the whole operation fails and no bundle is produced.
    async fn fetch_bundle(&self, symbol: &Symbol, api_key: &str) -> Result<StatementBundle>;

    /// Lists the symbols for which financial statements are available.
    async fn symbol_list(&self, api_key: &str) -> Result<Vec<String>>;
}
