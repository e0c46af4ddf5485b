//! Ratio definitions and the ratio engine.
//!
//! [`compute_ratios`] derives the standard ratio set from a bundle's
//! latest records. It is a pure function: it never mutates the bundle and
//! always returns every ratio in display order. Failure is local to one
//! ratio: a missing field or zero denominator marks that outcome
//! undefined with a reason, and the rest still compute. Values are plain
//! floating-point quotients; percentage scaling and rounding belong to a
//! presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bundle::StatementBundle;
use crate::error::AnalysisError;
use crate::record::PeriodRecord;

/// How a ratio's value should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueUnit {
    /// A plain quotient (margins, multiples).
    Quotient,
    /// A dollar amount (cash flow figures).
    Dollars,
}

/// The standard ratio set, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKind {
    /// grossProfit / revenue.
    GrossMargin,
    /// operatingIncome / revenue.
    OperatingMargin,
    /// netIncome / revenue.
    NetProfitMargin,
    /// netIncome / totalAssets.
    ReturnOnAssets,
    /// operatingCashFlow, passed through.
    OperatingCashFlow,
    /// operatingCashFlow - capitalExpenditure.
    FreeCashFlow,
    /// price / (totalStockholdersEquity / weightedAverageShsOut).
    PriceToBook,
    /// price / epsdiluted.
    PriceToEarnings,
    /// totalDebt / totalAssets.
    DebtRatio,
}

impl RatioKind {
    /// All ratios in display order.
    pub const ALL: [Self; 9] = [
        Self::GrossMargin,
        Self::OperatingMargin,
        Self::NetProfitMargin,
        Self::ReturnOnAssets,
        Self::OperatingCashFlow,
        Self::FreeCashFlow,
        Self::PriceToBook,
        Self::PriceToEarnings,
        Self::DebtRatio,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GrossMargin => "Gross Margin",
            Self::OperatingMargin => "Operating Margin",
            Self::NetProfitMargin => "Net Profit Margin",
            Self::ReturnOnAssets => "Return on Assets (ROA)",
            Self::OperatingCashFlow => "Operating Cash Flow",
            Self::FreeCashFlow => "Free Cash Flow",
            Self::PriceToBook => "Price to Book Ratio",
            Self::PriceToEarnings => "Price to Earnings Ratio",
            Self::DebtRatio => "Debt Ratio",
        }
    }

    /// Investor-facing explanation of what the ratio indicates.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::GrossMargin => {
                "This ratio indicates the percentage of revenue that exceeds the cost of \
                 goods sold. A higher gross margin indicates greater efficiency in turning \
                 raw materials into income."
            }
            Self::OperatingMargin => {
                "This ratio indicates how much profit a company makes on a dollar of sales \
                 after paying for variable costs of production, but before paying interest \
                 or tax."
            }
            Self::NetProfitMargin => {
                "This ratio indicates how much net profit a company makes with its total \
                 sales revenue. A high net profit margin means that a company is more \
                 efficient at converting sales into actual profit."
            }
            Self::ReturnOnAssets => {
                "This ratio indicates how profitable a company is relative to its total \
                 assets. ROA gives an idea as to how efficient management is at using its \
                 assets to generate earnings."
            }
            Self::OperatingCashFlow => {
                "This is a measure of the amount of cash generated by a company's normal \
                 business operations. It can be a better measure of a company's \
                 profitability as it is harder to manipulate with accounting practices."
            }
            Self::FreeCashFlow => {
                "This is a measure of a company's financial performance and represents the \
                 cash that a company is able to generate after spending the money required \
                 to maintain or expand its asset base."
            }
            Self::PriceToBook => {
                "This ratio compares a company's market value to its book value. A low P/B \
                 ratio could mean the stock is undervalued, while a high P/B ratio could \
                 mean the stock is overvalued."
            }
            Self::PriceToEarnings => {
                "This ratio measures the price you pay for each dollar of earning. A high \
                 P/E ratio could mean the stock's price is high relative to earnings and \
                 possibly overvalued. Conversely, a low P/E might indicate that the current \
                 stock price is low relative to earnings."
            }
            Self::DebtRatio => {
                "This ratio indicates what proportion of debt a company has relative to \
                 its assets. A debt ratio greater than 1 indicates that a company has more \
                 debt than assets, while a debt ratio less than 1 indicates that a company \
                 has more assets than debt."
            }
        }
    }

    /// How the value should be presented.
    #[must_use]
    pub const fn unit(&self) -> ValueUnit {
        match self {
            Self::OperatingCashFlow | Self::FreeCashFlow => ValueUnit::Dollars,
            _ => ValueUnit::Quotient,
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One derived ratio: its kind and either a value or the reason it is
/// undefined.
#[derive(Debug)]
pub struct RatioOutcome {
    /// Which ratio this outcome is for.
    pub kind: RatioKind,
    /// The derived value, or why it could not be derived.
    pub value: Result<f64, AnalysisError>,
}

impl RatioOutcome {
    fn defined(kind: RatioKind, value: f64) -> Self {
        Self {
            kind,
            value: Ok(value),
        }
    }

    fn undefined(kind: RatioKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: Err(AnalysisError::RatioUndefined {
                ratio: kind.name().to_string(),
                reason: reason.into(),
            }),
        }
    }
}

/// Derives every standard ratio from a bundle's latest records.
///
/// Always returns all ratios in [`RatioKind::ALL`] order; an undefined
/// ratio carries [`AnalysisError::RatioUndefined`] with the field that was
/// missing or zero.
#[must_use]
pub fn compute_ratios(bundle: &StatementBundle) -> Vec<RatioOutcome> {
    RatioKind::ALL
        .into_iter()
        .map(|kind| compute_ratio(bundle, kind))
        .collect()
}

fn compute_ratio(bundle: &StatementBundle, kind: RatioKind) -> RatioOutcome {
    let income = &bundle.income_statement;
    let balance = &bundle.balance_sheet;
    let cash = &bundle.cash_flow;
    let quote = &bundle.quote;

    match kind {
        RatioKind::GrossMargin => quotient(kind, income, "grossProfit", income, "revenue"),
        RatioKind::OperatingMargin => {
            quotient(kind, income, "operatingIncome", income, "revenue")
        }
        RatioKind::NetProfitMargin => quotient(kind, income, "netIncome", income, "revenue"),
        RatioKind::ReturnOnAssets => quotient(kind, income, "netIncome", balance, "totalAssets"),
        RatioKind::OperatingCashFlow => match field(cash, "operatingCashFlow") {
            Ok(value) => RatioOutcome::defined(kind, value),
            Err(reason) => RatioOutcome::undefined(kind, reason),
        },
        RatioKind::FreeCashFlow => {
            match (field(cash, "operatingCashFlow"), field(cash, "capitalExpenditure")) {
                (Ok(ocf), Ok(capex)) => RatioOutcome::defined(kind, ocf - capex),
                (Err(reason), _) | (_, Err(reason)) => RatioOutcome::undefined(kind, reason),
            }
        }
        RatioKind::PriceToBook => {
            let inputs = (
                field(quote, "price"),
                field(balance, "totalStockholdersEquity"),
                field(income, "weightedAverageShsOut"),
            );
            match inputs {
                (Ok(price), Ok(equity), Ok(shares)) => {
                    if shares == 0.0 {
                        return RatioOutcome::undefined(kind, "weightedAverageShsOut is zero");
                    }
                    let book_value_per_share = equity / shares;
                    if book_value_per_share == 0.0 {
                        RatioOutcome::undefined(kind, "book value per share is zero")
                    } else {
                        RatioOutcome::defined(kind, price / book_value_per_share)
                    }
                }
                (Err(reason), _, _) | (_, Err(reason), _) | (_, _, Err(reason)) => {
                    RatioOutcome::undefined(kind, reason)
                }
            }
        }
        RatioKind::PriceToEarnings => quotient(kind, quote, "price", income, "epsdiluted"),
        RatioKind::DebtRatio => quotient(kind, balance, "totalDebt", balance, "totalAssets"),
    }
}

/// Looks up a required numeric input, reporting its absence by name.
fn field(record: &PeriodRecord, name: &str) -> Result<f64, String> {
    record
        .number(name)
        .ok_or_else(|| format!("{name} is missing"))
}

/// numerator / denominator with the standard missing/zero handling.
fn quotient(
    kind: RatioKind,
    numerator_record: &PeriodRecord,
    numerator: &str,
    denominator_record: &PeriodRecord,
    denominator: &str,
) -> RatioOutcome {
    let num = match field(numerator_record, numerator) {
        Ok(value) => value,
        Err(reason) => return RatioOutcome::undefined(kind, reason),
    };
    let den = match field(denominator_record, denominator) {
        Ok(value) => value,
        Err(reason) => return RatioOutcome::undefined(kind, reason),
    };
    if den == 0.0 {
        RatioOutcome::undefined(kind, format!("{denominator} is zero"))
    } else {
        RatioOutcome::defined(kind, num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::GrowthSeries;
    use crate::types::Symbol;
    use chrono::Utc;
    use serde_json::{Value, json};

    const EPSILON: f64 = 1e-12;

    fn record(value: Value) -> PeriodRecord {
        match value {
            Value::Object(fields) => PeriodRecord::new(fields),
            _ => panic!("test record must be an object"),
        }
    }

    fn bundle(income: Value, balance: Value, cash: Value, quote: Value) -> StatementBundle {
        StatementBundle {
            symbol: Symbol::new("AAPL"),
            income_statement: record(income),
            balance_sheet: record(balance),
            cash_flow: record(cash),
            quote: record(quote),
            enterprise_value: record(json!({"enterpriseValue": 1000.0})),
            growth: GrowthSeries::new(vec![record(
                json!({"date": "2023-09-30", "revenueGrowth": 0.05}),
            )]),
            key_metrics: record(json!({"marketCap": 900.0})),
            rating: record(json!({"rating": "A"})),
            discounted_cash_flow: record(json!({"dcf": 7.5})),
            fetched_at: Utc::now(),
        }
    }

    fn value_of(outcomes: &[RatioOutcome], kind: RatioKind) -> f64 {
        outcomes
            .iter()
            .find(|o| o.kind == kind)
            .and_then(|o| o.value.as_ref().ok().copied())
            .unwrap_or_else(|| panic!("{kind} should be defined"))
    }

    fn reason_of(outcomes: &[RatioOutcome], kind: RatioKind) -> String {
        let outcome = outcomes.iter().find(|o| o.kind == kind).unwrap();
        match &outcome.value {
            Err(AnalysisError::RatioUndefined { reason, .. }) => reason.clone(),
            other => panic!("{kind} should be undefined, got {other:?}"),
        }
    }

    #[test]
    fn test_margin_scenario() {
        let outcomes = compute_ratios(&bundle(
            json!({"revenue": 100.0, "grossProfit": 40.0, "operatingIncome": 20.0, "netIncome": 10.0}),
            json!({"totalAssets": 50.0, "totalDebt": 25.0, "totalStockholdersEquity": 30.0}),
            json!({"operatingCashFlow": 500.0, "capitalExpenditure": 120.0}),
            json!({"price": 6.0}),
        ));

        assert_eq!(outcomes.len(), 9);
        assert!((value_of(&outcomes, RatioKind::GrossMargin) - 0.40).abs() < EPSILON);
        assert!((value_of(&outcomes, RatioKind::OperatingMargin) - 0.20).abs() < EPSILON);
        assert!((value_of(&outcomes, RatioKind::NetProfitMargin) - 0.10).abs() < EPSILON);
        assert!((value_of(&outcomes, RatioKind::ReturnOnAssets) - 0.20).abs() < EPSILON);
        assert!((value_of(&outcomes, RatioKind::DebtRatio) - 0.50).abs() < EPSILON);
    }

    #[test]
    fn test_cash_flow_scenario() {
        let outcomes = compute_ratios(&bundle(
            json!({"revenue": 100.0}),
            json!({}),
            json!({"operatingCashFlow": 500.0, "capitalExpenditure": 120.0}),
            json!({}),
        ));

        assert_eq!(value_of(&outcomes, RatioKind::OperatingCashFlow), 500.0);
        // identity, no rounding
        assert_eq!(value_of(&outcomes, RatioKind::FreeCashFlow), 380.0);
    }

    #[test]
    fn test_price_ratios() {
        let outcomes = compute_ratios(&bundle(
            json!({"epsdiluted": 2.0, "weightedAverageShsOut": 10.0}),
            json!({"totalStockholdersEquity": 30.0}),
            json!({}),
            json!({"price": 6.0}),
        ));

        // book value per share = 30 / 10 = 3
        assert!((value_of(&outcomes, RatioKind::PriceToBook) - 2.0).abs() < EPSILON);
        assert!((value_of(&outcomes, RatioKind::PriceToEarnings) - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_total_assets_only_affects_its_ratios() {
        let outcomes = compute_ratios(&bundle(
            json!({"revenue": 100.0, "grossProfit": 40.0, "operatingIncome": 20.0, "netIncome": 10.0}),
            json!({"totalAssets": 0.0, "totalDebt": 25.0}),
            json!({"operatingCashFlow": 500.0, "capitalExpenditure": 120.0}),
            json!({}),
        ));

        assert_eq!(
            reason_of(&outcomes, RatioKind::ReturnOnAssets),
            "totalAssets is zero"
        );
        assert_eq!(
            reason_of(&outcomes, RatioKind::DebtRatio),
            "totalAssets is zero"
        );
        // failure is per-ratio
        assert!((value_of(&outcomes, RatioKind::GrossMargin) - 0.40).abs() < EPSILON);
        assert_eq!(value_of(&outcomes, RatioKind::FreeCashFlow), 380.0);
    }

    #[test]
    fn test_zero_revenue_marks_margins_undefined() {
        let outcomes = compute_ratios(&bundle(
            json!({"revenue": 0.0, "grossProfit": 40.0, "operatingIncome": 20.0, "netIncome": 10.0}),
            json!({"totalAssets": 50.0}),
            json!({}),
            json!({}),
        ));

        for kind in [
            RatioKind::GrossMargin,
            RatioKind::OperatingMargin,
            RatioKind::NetProfitMargin,
        ] {
            assert_eq!(reason_of(&outcomes, kind), "revenue is zero");
        }
        assert!((value_of(&outcomes, RatioKind::ReturnOnAssets) - 0.20).abs() < EPSILON);
    }

    #[test]
    fn test_missing_field_reports_field_name() {
        let outcomes = compute_ratios(&bundle(
            json!({"revenue": 100.0}),
            json!({}),
            json!({}),
            json!({"price": 6.0}),
        ));

        assert_eq!(
            reason_of(&outcomes, RatioKind::GrossMargin),
            "grossProfit is missing"
        );
        assert_eq!(
            reason_of(&outcomes, RatioKind::PriceToEarnings),
            "epsdiluted is missing"
        );
        assert_eq!(
            reason_of(&outcomes, RatioKind::OperatingCashFlow),
            "operatingCashFlow is missing"
        );
    }

    #[test]
    fn test_zero_shares_outstanding() {
        let outcomes = compute_ratios(&bundle(
            json!({"weightedAverageShsOut": 0.0}),
            json!({"totalStockholdersEquity": 30.0}),
            json!({}),
            json!({"price": 6.0}),
        ));

        assert_eq!(
            reason_of(&outcomes, RatioKind::PriceToBook),
            "weightedAverageShsOut is zero"
        );
    }

    #[test]
    fn test_zero_equity_reports_book_value() {
        let outcomes = compute_ratios(&bundle(
            json!({"weightedAverageShsOut": 10.0}),
            json!({"totalStockholdersEquity": 0.0}),
            json!({}),
            json!({"price": 6.0}),
        ));

        assert_eq!(
            reason_of(&outcomes, RatioKind::PriceToBook),
            "book value per share is zero"
        );
    }

    #[test]
    fn test_units() {
        assert_eq!(RatioKind::GrossMargin.unit(), ValueUnit::Quotient);
        assert_eq!(RatioKind::OperatingCashFlow.unit(), ValueUnit::Dollars);
        assert_eq!(RatioKind::FreeCashFlow.unit(), ValueUnit::Dollars);
    }
}
