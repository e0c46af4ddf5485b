//! Dynamic period records and shape normalization.
//!
//! Provider payloads have no fixed schema, so one reporting period is
//! modeled as a field map with typed optional accessors; an absent field
//! is a recoverable condition, never a crash. [`normalize`] converts the
//! provider's heterogeneous payload shapes (bare object, single-element
//! list, multi-period list) into the explicit [`Normalized`] union exactly
//! once, so everything downstream consumes a uniform representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnalysisError, Result};
use crate::resource::ResourceKind;

/// One reporting period for one resource, as a field-name → value map.
///
/// Field names and value types are provider-defined and not exhaustively
/// validated. Numeric fields are kept provider-native; no unit conversion
/// is performed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord(Map<String, Value>);

impl PeriodRecord {
    /// Creates a record from a JSON object map.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw JSON value for a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a numeric field as `f64`, if present and numeric.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(Value::as_f64)
    }

    /// Returns a string field, if present and a string.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Returns the reporting date field, if present.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.text("date")
    }

    /// Iterates field names in provider order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for PeriodRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A resource payload after shape normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
    /// The latest reporting period for the resource.
    Latest(PeriodRecord),
    /// The full ordered period list, newest first.
    Series(Vec<PeriodRecord>),
}

impl Normalized {
    /// The latest period regardless of variant.
    ///
    /// For a series this is the first element (provider convention:
    /// newest period first).
    #[must_use]
    pub fn latest(&self) -> &PeriodRecord {
        match self {
            Self::Latest(record) => record,
            // normalize never produces an empty series
            Self::Series(records) => &records[0],
        }
    }
}

/// Converts a raw resource payload into its normalized representation.
///
/// A list payload yields its first element as the latest record, or the
/// whole list for resources that keep a series. A bare object is used
/// directly. An empty list yields [`AnalysisError::EmptyResult`] rather
/// than a degenerate default record.
pub fn normalize(kind: ResourceKind, symbol: &str, raw: Value) -> Result<Normalized> {
    match raw {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(AnalysisError::EmptyResult {
                    resource: kind,
                    symbol: symbol.to_string(),
                });
            }
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                records.push(as_record(kind, item)?);
                if !kind.keeps_series() {
                    break;
                }
            }
            if kind.keeps_series() {
                Ok(Normalized::Series(records))
            } else {
                Ok(Normalized::Latest(records.remove(0)))
            }
        }
        Value::Object(fields) => {
            let record = PeriodRecord::new(fields);
            if kind.keeps_series() {
                Ok(Normalized::Series(vec![record]))
            } else {
                Ok(Normalized::Latest(record))
            }
        }
        other => Err(AnalysisError::Parse {
            resource: kind,
            message: format!("expected object or array, got {}", json_type(&other)),
        }),
    }
}

fn as_record(kind: ResourceKind, value: Value) -> Result<PeriodRecord> {
    match value {
        Value::Object(fields) => Ok(PeriodRecord::new(fields)),
        other => Err(AnalysisError::Parse {
            resource: kind,
            message: format!("expected period object, got {}", json_type(&other)),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PeriodRecord {
        match value {
            Value::Object(fields) => PeriodRecord::new(fields),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_number_accessor_accepts_int_and_float() {
        let rec = record(json!({"revenue": 100, "eps": 1.25, "symbol": "AAPL"}));
        assert_eq!(rec.number("revenue"), Some(100.0));
        assert_eq!(rec.number("eps"), Some(1.25));
        assert_eq!(rec.number("symbol"), None);
        assert_eq!(rec.number("missing"), None);
    }

    #[test]
    fn test_text_and_date_accessors() {
        let rec = record(json!({"date": "2023-09-30", "revenue": 100}));
        assert_eq!(rec.date(), Some("2023-09-30"));
        assert_eq!(rec.text("revenue"), None);
    }

    #[test]
    fn test_normalize_list_takes_first_element() {
        let raw = json!([
            {"date": "2023-09-30", "revenue": 100},
            {"date": "2022-09-30", "revenue": 90},
        ]);
        let normalized = normalize(ResourceKind::IncomeStatement, "AAPL", raw).unwrap();
        match normalized {
            Normalized::Latest(rec) => assert_eq!(rec.date(), Some("2023-09-30")),
            Normalized::Series(_) => panic!("income statement is not a series resource"),
        }
    }

    #[test]
    fn test_normalize_growth_keeps_full_series() {
        let raw = json!([
            {"date": "2023-09-30", "revenueGrowth": 0.05},
            {"date": "2022-09-30", "revenueGrowth": 0.08},
        ]);
        let normalized = normalize(ResourceKind::FinancialGrowth, "AAPL", raw).unwrap();
        match normalized {
            Normalized::Series(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].date(), Some("2023-09-30"));
            }
            Normalized::Latest(_) => panic!("growth keeps the full series"),
        }
    }

    #[test]
    fn test_normalize_bare_object() {
        let raw = json!({"price": 189.5, "symbol": "AAPL"});
        let normalized = normalize(ResourceKind::Quote, "AAPL", raw).unwrap();
        assert_eq!(normalized.latest().number("price"), Some(189.5));
    }

    #[test]
    fn test_normalize_empty_list_is_an_error() {
        let err = normalize(ResourceKind::BalanceSheet, "AAPL", json!([])).unwrap_err();
        match err {
            AnalysisError::EmptyResult { resource, symbol } => {
                assert_eq!(resource, ResourceKind::BalanceSheet);
                assert_eq!(symbol, "AAPL");
            }
            other => panic!("expected EmptyResult, got {other}"),
        }
    }

    #[test]
    fn test_normalize_rejects_non_object_payloads() {
        assert!(normalize(ResourceKind::Quote, "AAPL", json!("nope")).is_err());
        assert!(normalize(ResourceKind::Quote, "AAPL", json!([1, 2])).is_err());
    }
}
