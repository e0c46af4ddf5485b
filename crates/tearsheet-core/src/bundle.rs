//! Statement bundle assembled from all resources.
//!
//! A [`StatementBundle`] is the full set of latest records for one symbol,
//! one per resource, plus the growth series. It is fetched and cached
//! atomically: either every resource fetch succeeded and the bundle
//! exists, or it does not. Once constructed it is immutable and replaced
//! wholesale on re-fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::growth::GrowthSeries;
use crate::record::PeriodRecord;
use crate::resource::ResourceKind;
use crate::types::Symbol;

/// The latest records for one symbol across every resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatementBundle {
    /// The symbol this bundle was fetched for.
    pub symbol: Symbol,
    /// Latest income statement period.
    pub income_statement: PeriodRecord,
    /// Latest balance sheet period.
    pub balance_sheet: PeriodRecord,
    /// Latest cash flow statement period.
    pub cash_flow: PeriodRecord,
    /// Current quote.
    pub quote: PeriodRecord,
    /// Latest enterprise value period.
    pub enterprise_value: PeriodRecord,
    /// Full financial growth series, newest first.
    pub growth: GrowthSeries,
    /// Latest key metrics period.
    pub key_metrics: PeriodRecord,
    /// Current analyst rating.
    pub rating: PeriodRecord,
    /// Current discounted cash flow valuation.
    pub discounted_cash_flow: PeriodRecord,
    /// When the bundle was assembled.
    pub fetched_at: DateTime<Utc>,
}

impl StatementBundle {
    /// The latest record for a resource.
    ///
    /// For the growth resource this is the newest period of the series.
    #[must_use]
    pub fn latest(&self, kind: ResourceKind) -> &PeriodRecord {
        match kind {
            ResourceKind::IncomeStatement => &self.income_statement,
            ResourceKind::BalanceSheet => &self.balance_sheet,
            ResourceKind::CashFlow => &self.cash_flow,
            ResourceKind::Quote => &self.quote,
            ResourceKind::EnterpriseValue => &self.enterprise_value,
            ResourceKind::FinancialGrowth => self.growth.latest(),
            ResourceKind::KeyMetrics => &self.key_metrics,
            ResourceKind::Rating => &self.rating,
            ResourceKind::DiscountedCashFlow => &self.discounted_cash_flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> PeriodRecord {
        match value {
            serde_json::Value::Object(fields) => PeriodRecord::new(fields),
            _ => panic!("test record must be an object"),
        }
    }

    fn sample_bundle() -> StatementBundle {
        StatementBundle {
            symbol: Symbol::new("AAPL"),
            income_statement: record(json!({
                "date": "2023-09-30",
                "revenue": 100.0,
                "grossProfit": 40.0,
                "operatingIncome": 20.0,
                "netIncome": 10.0,
                "epsdiluted": 2.0,
                "weightedAverageShsOut": 10.0,
            })),
            balance_sheet: record(json!({
                "date": "2023-09-30",
                "totalAssets": 50.0,
                "totalDebt": 25.0,
                "totalStockholdersEquity": 30.0,
            })),
            cash_flow: record(json!({
                "date": "2023-09-30",
                "operatingCashFlow": 500.0,
                "capitalExpenditure": 120.0,
            })),
            quote: record(json!({"price": 6.0, "symbol": "AAPL"})),
            enterprise_value: record(json!({"enterpriseValue": 1000.0})),
            growth: GrowthSeries::new(vec![record(json!({
                "date": "2023-09-30",
                "revenueGrowth": 0.05,
            }))]),
            key_metrics: record(json!({"marketCap": 900.0})),
            rating: record(json!({"rating": "A"})),
            discounted_cash_flow: record(json!({"dcf": 7.5})),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_latest_maps_every_resource() {
        let bundle = sample_bundle();
        for kind in ResourceKind::ALL {
            // every resource resolves to a non-empty record
            assert!(!bundle.latest(kind).is_empty(), "{kind} record is empty");
        }
        assert_eq!(
            bundle.latest(ResourceKind::FinancialGrowth).date(),
            Some("2023-09-30")
        );
    }
}
