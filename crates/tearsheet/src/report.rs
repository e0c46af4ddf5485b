//! Presentation-facing rendering helpers.
//!
//! The pipeline's outputs are data; these helpers turn them into strings a
//! table or chart widget can show directly, without pulling a UI toolkit
//! into the pipeline. Quotient ratios are rendered as plain floats (no
//! percentage scaling), dollar figures with a currency prefix and
//! thousands separators. Undefined ratios always carry their reason; no
//! ratio is ever silently blank.

use serde_json::Value;

use tearsheet_core::{PeriodRecord, RatioOutcome, ValueUnit};

/// One ratio prepared for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioLine {
    /// Display name of the ratio.
    pub name: &'static str,
    /// Investor-facing explanation of what the ratio indicates.
    pub explanation: &'static str,
    /// Rendered value, or `undefined (<reason>)`.
    pub display: String,
}

/// Formats a dollar amount with thousands separators, rounded to whole
/// dollars.
#[must_use]
pub fn format_dollars(value: f64) -> String {
    let rounded = value.round() as i128;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Prepares ratio outcomes for display, in engine order.
#[must_use]
pub fn ratio_lines(outcomes: &[RatioOutcome]) -> Vec<RatioLine> {
    outcomes
        .iter()
        .map(|outcome| {
            let display = match &outcome.value {
                Ok(value) => match outcome.kind.unit() {
                    ValueUnit::Dollars => format_dollars(*value),
                    ValueUnit::Quotient => value.to_string(),
                },
                Err(tearsheet_core::AnalysisError::RatioUndefined { reason, .. }) => {
                    format!("undefined ({reason})")
                }
                Err(other) => format!("undefined ({other})"),
            };
            RatioLine {
                name: outcome.kind.name(),
                explanation: outcome.kind.describe(),
                display,
            }
        })
        .collect()
}

/// Renders a record's fields as (name, value) rows for tabular display,
/// in provider order.
#[must_use]
pub fn record_rows(record: &PeriodRecord) -> Vec<(String, String)> {
    record
        .field_names()
        .map(|name| {
            let rendered = match record.get(name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            (name.to_string(), rendered)
        })
        .collect()
}
