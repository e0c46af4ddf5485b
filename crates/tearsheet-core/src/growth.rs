//! Growth metric series and selection.
//!
//! The financial growth resource is the one resource kept as a full time
//! series, so users can chart any of its metrics over time. This module
//! defines [`GrowthSeries`] and the selection rules: available metrics are
//! every record field except the date column, and a caller's chosen subset
//! is validated by silent intersection. A name absent from the current
//! series is dropped, never an error.

use serde::{Deserialize, Serialize};

use crate::record::PeriodRecord;

/// The field excluded from chartable metrics.
const DATE_FIELD: &str = "date";

/// The full ordered list of growth periods for one symbol, newest first.
///
/// Always non-empty; construction goes through the shape normalizer, which
/// rejects empty payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    records: Vec<PeriodRecord>,
}

impl GrowthSeries {
    /// Creates a series from normalized records, newest first.
    #[must_use]
    pub const fn new(records: Vec<PeriodRecord>) -> Self {
        Self { records }
    }

    /// The latest growth period.
    #[must_use]
    pub fn latest(&self) -> &PeriodRecord {
        &self.records[0]
    }

    /// All periods, newest first.
    #[must_use]
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the series has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The metrics available for charting.
    ///
    /// The union of field names across all periods, in first-seen order,
    /// excluding the date column, with no duplicates.
    #[must_use]
    pub fn metric_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for record in &self.records {
            for field in record.field_names() {
                if field != DATE_FIELD && !names.iter().any(|n| n == field) {
                    names.push(field.to_string());
                }
            }
        }
        names
    }

    /// Validates a caller-chosen metric subset against this series.
    ///
    /// Retains the caller's order, silently dropping names that are not
    /// available. Idempotent: selecting an already-validated subset
    /// returns it unchanged.
    #[must_use]
    pub fn select(&self, candidates: &[String]) -> Vec<String> {
        let available = self.metric_names();
        candidates
            .iter()
            .filter(|name| available.iter().any(|a| a == *name))
            .cloned()
            .collect()
    }

    /// The (date, value) time series for one metric, oldest first.
    ///
    /// Periods missing the metric or holding a non-numeric value are
    /// skipped.
    #[must_use]
    pub fn series(&self, metric: &str) -> Vec<(String, f64)> {
        self.records
            .iter()
            .rev()
            .filter_map(|record| {
                let date = record.date()?.to_string();
                let value = record.number(metric)?;
                Some((date, value))
            })
            .collect()
    }
}
