#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tearsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) statement source.
//!
//! This crate implements the `tearsheet-core` source trait for the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tearsheet_fmp::FmpClient;
//! use tearsheet_core::{StatementSource, Symbol, compute_ratios};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::new();
//!     let symbol = Symbol::new("AAPL");
//!
//!     let bundle = client.fetch_bundle(&symbol, "your_api_key").await?;
//!     for outcome in compute_ratios(&bundle) {
//!         println!("{}: {:?}", outcome.kind, outcome.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use tearsheet_core::{
    AnalysisError, GrowthSeries, Normalized, PeriodRecord, ResourceKind, Result, StatementBundle,
    StatementSource, Symbol, normalize,
};

/// Base URL for the FMP v3 API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Endpoint listing the symbols with financial statements available.
const SYMBOL_LIST_ENDPOINT: &str = "financial-statement-symbol-lists";

/// Financial Modeling Prep statement source.
///
/// Holds no credential: the API key identifies a selection, so it travels
/// with each call and is appended to the request URL unchanged.
#[derive(Clone, Debug)]
pub struct FmpClient {
    client: Client,
    base_url: String,
}

impl Default for FmpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FmpClient {
    /// Create a new FMP client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new FMP client with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a URL with the API key appended.
    fn url(&self, endpoint: &str, api_key: &str) -> String {
        if endpoint.contains('?') {
            format!("{}/{endpoint}&apikey={api_key}", self.base_url)
        } else {
            format!("{}/{endpoint}?apikey={api_key}", self.base_url)
        }
    }

    /// The endpoint for one resource fetch, before the API key.
    fn resource_endpoint(kind: ResourceKind, symbol: &Symbol) -> String {
        match kind.period_limit() {
            Some(limit) => format!("{}/{}?limit={limit}", kind.path(), symbol.as_str()),
            None => format!("{}/{}", kind.path(), symbol.as_str()),
        }
    }

    /// Make a GET request for one resource and decode the JSON body.
    async fn get_resource(
        &self,
        kind: ResourceKind,
        symbol: &Symbol,
        api_key: &str,
    ) -> Result<Value> {
        let endpoint = Self::resource_endpoint(kind, symbol);
        let url = self.url(&endpoint, api_key);
        tracing::debug!(resource = %kind, symbol = %symbol, "FMP request: {endpoint}");

        let fetch_err = |message: String| AnalysisError::Fetch {
            resource: kind,
            symbol: symbol.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited {
                resource: kind,
                retry_after: None,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(fetch_err(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        // FMP reports failures as 200s with an error body
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(fetch_err(text));
        }

        serde_json::from_str(&text).map_err(|e| AnalysisError::Parse {
            resource: kind,
            message: format!("{e}: {text}"),
        })
    }

    fn require_inputs(symbol: &Symbol, api_key: &str) -> Result<()> {
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
        Ok(())
    }
}

/// Raw payloads for every resource, fetch order.
struct RawBundle {
    income_statement: Value,
    balance_sheet: Value,
    cash_flow: Value,
    quote: Value,
    enterprise_value: Value,
    growth: Value,
    key_metrics: Value,
    rating: Value,
    discounted_cash_flow: Value,
}

/// Normalize every raw payload and assemble the bundle.
fn assemble(symbol: &Symbol, raw: RawBundle) -> Result<StatementBundle> {
    let latest = |kind: ResourceKind, value: Value| -> Result<PeriodRecord> {
        match normalize(kind, symbol.as_str(), value)? {
            Normalized::Latest(record) => Ok(record),
            Normalized::Series(mut records) => Ok(records.remove(0)),
        }
    };

    let growth = match normalize(ResourceKind::FinancialGrowth, symbol.as_str(), raw.growth)? {
        Normalized::Series(records) => GrowthSeries::new(records),
        Normalized::Latest(record) => GrowthSeries::new(vec![record]),
    };

    Ok(StatementBundle {
        symbol: symbol.clone(),
        income_statement: latest(ResourceKind::IncomeStatement, raw.income_statement)?,
        balance_sheet: latest(ResourceKind::BalanceSheet, raw.balance_sheet)?,
        cash_flow: latest(ResourceKind::CashFlow, raw.cash_flow)?,
        quote: latest(ResourceKind::Quote, raw.quote)?,
        enterprise_value: latest(ResourceKind::EnterpriseValue, raw.enterprise_value)?,
        growth,
        key_metrics: latest(ResourceKind::KeyMetrics, raw.key_metrics)?,
        rating: latest(ResourceKind::Rating, raw.rating)?,
        discounted_cash_flow: latest(ResourceKind::DiscountedCashFlow, raw.discounted_cash_flow)?,
        fetched_at: Utc::now(),
    })
}

#[async_trait]
impl StatementSource for FmpClient {
    fn name(&self) -> &str {
        "FMP"
    }

    fn description(&self) -> &str {
        "Financial Modeling Prep - Financial data and stock market API"
    }

    async fn fetch_raw(
        &self,
        kind: ResourceKind,
        symbol: &Symbol,
        api_key: &str,
    ) -> Result<Value> {
        Self::require_inputs(symbol, api_key)?;
        self.get_resource(kind, symbol, api_key).await
    }

    async fn fetch_bundle(&self, symbol: &Symbol, api_key: &str) -> Result<StatementBundle> {
        Self::require_inputs(symbol, api_key)?;

        // The nine fetches have no ordering dependency; issue them
        // concurrently and join before normalization.
        let (
            income_statement,
            balance_sheet,
            cash_flow,
            quote,
            enterprise_value,
            growth,
            key_metrics,
            rating,
            discounted_cash_flow,
        ) = tokio::join!(
            self.get_resource(ResourceKind::IncomeStatement, symbol, api_key),
            self.get_resource(ResourceKind::BalanceSheet, symbol, api_key),
            self.get_resource(ResourceKind::CashFlow, symbol, api_key),
            self.get_resource(ResourceKind::Quote, symbol, api_key),
            self.get_resource(ResourceKind::EnterpriseValue, symbol, api_key),
            self.get_resource(ResourceKind::FinancialGrowth, symbol, api_key),
            self.get_resource(ResourceKind::KeyMetrics, symbol, api_key),
            self.get_resource(ResourceKind::Rating, symbol, api_key),
            self.get_resource(ResourceKind::DiscountedCashFlow, symbol, api_key),
        );

        // All-or-nothing: a single failed resource aborts the bundle.
        let raw = RawBundle {
            income_statement: income_statement?,
            balance_sheet: balance_sheet?,
            cash_flow: cash_flow?,
            quote: quote?,
            enterprise_value: enterprise_value?,
            growth: growth?,
            key_metrics: key_metrics?,
            rating: rating?,
            discounted_cash_flow: discounted_cash_flow?,
        };

        assemble(symbol, raw)
    }

    async fn symbol_list(&self, api_key: &str) -> Result<Vec<String>> {
        if api_key.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "api key must not be empty".to_string(),
            ));
        }

        let url = self.url(SYMBOL_LIST_ENDPOINT, api_key);
        tracing::debug!("FMP request: {SYMBOL_LIST_ENDPOINT}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Network(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        serde_json::from_str(&text)
            .map_err(|e| AnalysisError::Other(format!("symbol list decode: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new();
        assert_eq!(
            client.url("quote/AAPL", "test_key"),
            "https://financialmodelingprep.com/api/v3/quote/AAPL?apikey=test_key"
        );
        assert_eq!(
            client.url("income-statement/AAPL?limit=120", "test_key"),
            "https://financialmodelingprep.com/api/v3/income-statement/AAPL?limit=120&apikey=test_key"
        );
        assert_eq!(
            client.url(SYMBOL_LIST_ENDPOINT, "test_key"),
            "https://financialmodelingprep.com/api/v3/financial-statement-symbol-lists?apikey=test_key"
        );
    }

    #[test]
    fn test_resource_endpoints_follow_limit_contract() {
        let symbol = Symbol::new("AAPL");
        assert_eq!(
            FmpClient::resource_endpoint(ResourceKind::IncomeStatement, &symbol),
            "income-statement/AAPL?limit=120"
        );
        assert_eq!(
            FmpClient::resource_endpoint(ResourceKind::BalanceSheet, &symbol),
            "balance-sheet-statement/AAPL?limit=1"
        );
        assert_eq!(
            FmpClient::resource_endpoint(ResourceKind::FinancialGrowth, &symbol),
            "financial-growth/AAPL?limit=20"
        );
        assert_eq!(
            FmpClient::resource_endpoint(ResourceKind::Quote, &symbol),
            "quote/AAPL"
        );
    }

    #[test]
    fn test_source_metadata() {
        let client = FmpClient::new();
        assert_eq!(client.name(), "FMP");
        assert!(!client.description().is_empty());
    }

    fn raw_bundle() -> RawBundle {
        RawBundle {
            income_statement: json!([
                {"date": "2023-09-30", "revenue": 100.0, "grossProfit": 40.0},
                {"date": "2022-09-30", "revenue": 90.0, "grossProfit": 36.0},
            ]),
            balance_sheet: json!([{"date": "2023-09-30", "totalAssets": 50.0}]),
            cash_flow: json!([{"date": "2023-09-30", "operatingCashFlow": 500.0}]),
            quote: json!([{"price": 189.5, "symbol": "AAPL"}]),
            enterprise_value: json!([{"enterpriseValue": 1000.0}]),
            growth: json!([
                {"date": "2023-09-30", "revenueGrowth": 0.05},
                {"date": "2022-09-30", "revenueGrowth": 0.08},
            ]),
            key_metrics: json!([{"marketCap": 900.0}]),
            rating: json!([{"rating": "A"}]),
            discounted_cash_flow: json!({"dcf": 7.5, "Stock Price": 189.5}),
        }
    }

    #[test]
    fn test_assemble_takes_latest_and_keeps_growth_series() {
        let symbol = Symbol::new("AAPL");
        let bundle = assemble(&symbol, raw_bundle()).unwrap();

        assert_eq!(bundle.income_statement.date(), Some("2023-09-30"));
        assert_eq!(bundle.income_statement.number("revenue"), Some(100.0));
        assert_eq!(bundle.quote.number("price"), Some(189.5));
        // bare-object payloads are accepted directly
        assert_eq!(bundle.discounted_cash_flow.number("dcf"), Some(7.5));
        // the full growth series survives for charting
        assert_eq!(bundle.growth.len(), 2);
    }

    #[test]
    fn test_assemble_rejects_empty_resource() {
        let symbol = Symbol::new("AAPL");
        let mut raw = raw_bundle();
        raw.balance_sheet = json!([]);

        let err = assemble(&symbol, raw).unwrap_err();
        match err {
            AnalysisError::EmptyResult { resource, .. } => {
                assert_eq!(resource, ResourceKind::BalanceSheet);
            }
            other => panic!("expected EmptyResult, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_are_rejected_without_a_request() {
        let client = FmpClient::new().with_base_url("http://127.0.0.1:1");

        let err = client
            .fetch_bundle(&Symbol::new(""), "key")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));

        let err = client
            .fetch_bundle(&Symbol::new("AAPL"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));

        let err = client.symbol_list("").await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));
    }
}
