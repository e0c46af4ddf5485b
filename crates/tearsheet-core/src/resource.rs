//! Financial resource definitions.
//!
//! This module defines [`ResourceKind`], the fixed set of financial
//! resources fetched for a symbol, together with each resource's endpoint
//! path and payload shape contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One category of financial data with a fixed endpoint and shape contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Income statement periods.
    IncomeStatement,
    /// Balance sheet periods.
    BalanceSheet,
    /// Cash flow statement periods.
    CashFlow,
    /// Real-time quote.
    Quote,
    /// Enterprise value periods.
    EnterpriseValue,
    /// Financial statement growth periods (kept as a full series).
    FinancialGrowth,
    /// Key metrics periods.
    KeyMetrics,
    /// Analyst rating.
    Rating,
    /// Discounted cash flow valuation.
    DiscountedCashFlow,
}

impl ResourceKind {
    /// All resources that make up a complete bundle, in fetch order.
    pub const ALL: [Self; 9] = [
        Self::IncomeStatement,
        Self::BalanceSheet,
        Self::CashFlow,
        Self::Quote,
        Self::EnterpriseValue,
        Self::FinancialGrowth,
        Self::KeyMetrics,
        Self::Rating,
        Self::DiscountedCashFlow,
    ];

    /// The provider endpoint path segment for this resource.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "income-statement",
            Self::BalanceSheet => "balance-sheet-statement",
            Self::CashFlow => "cash-flow-statement",
            Self::Quote => "quote",
            Self::EnterpriseValue => "enterprise-values",
            Self::FinancialGrowth => "financial-growth",
            Self::KeyMetrics => "key-metrics",
            Self::Rating => "rating",
            Self::DiscountedCashFlow => "discounted-cash-flow",
        }
    }

    /// The `limit` query parameter for period-limited resources.
    ///
    /// Returns `None` for the unparameterized endpoints (quote, rating,
    /// discounted cash flow).
    #[must_use]
    pub const fn period_limit(&self) -> Option<u32> {
        match self {
            Self::IncomeStatement => Some(120),
            Self::BalanceSheet | Self::CashFlow => Some(1),
            Self::EnterpriseValue | Self::KeyMetrics => Some(40),
            Self::FinancialGrowth => Some(20),
            Self::Quote | Self::Rating | Self::DiscountedCashFlow => None,
        }
    }

    /// Whether the full ordered period list is retained rather than just
    /// the latest record.
    #[must_use]
    pub const fn keeps_series(&self) -> bool {
        matches!(self, Self::FinancialGrowth)
    }

    /// Human-readable resource name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "income statement",
            Self::BalanceSheet => "balance sheet",
            Self::CashFlow => "cash flow statement",
            Self::Quote => "quote",
            Self::EnterpriseValue => "enterprise value",
            Self::FinancialGrowth => "financial statement growth",
            Self::KeyMetrics => "key metrics",
            Self::Rating => "company rating",
            Self::DiscountedCashFlow => "discounted cash flow",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
