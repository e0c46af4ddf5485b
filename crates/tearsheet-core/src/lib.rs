#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tearsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the company fundamentals pipeline.
//!
//! This crate provides the foundational abstractions for fetching and
//! deriving company fundamentals:
//!
//! - [`ResourceKind`](resource::ResourceKind) - the financial resources a provider exposes
//! - [`PeriodRecord`](record::PeriodRecord) - one reporting period as a dynamic field map
//! - [`StatementBundle`](bundle::StatementBundle) - the latest records for one symbol
//! - [`compute_ratios`](ratio::compute_ratios) - derived financial ratios
//! - [`GrowthSeries`](growth::GrowthSeries) - growth metrics for charting
//! - [`StatementSource`](source::StatementSource) - provider trait
//! - [`BundleCache`](cache::BundleCache) - caching abstraction

/// Statement bundle assembled from all resources.
pub mod bundle;
/// Cache trait and selection key types.
pub mod cache;
/// Error types for pipeline operations.
pub mod error;
/// Growth metric series and selection.
pub mod growth;
/// Ratio definitions and the ratio engine.
pub mod ratio;
/// Dynamic period records and shape normalization.
pub mod record;
/// Financial resource definitions.
pub mod resource;
/// Provider trait for fetching statement data.
pub mod source;
/// Core value types (Symbol, Selection).
pub mod types;

// Re-export commonly used items at crate root
pub use bundle::StatementBundle;
pub use cache::{BundleCache, SelectionKey};
pub use error::{AnalysisError, Result};
pub use growth::GrowthSeries;
pub use ratio::{RatioKind, RatioOutcome, ValueUnit, compute_ratios};
pub use record::{Normalized, PeriodRecord, normalize};
pub use resource::ResourceKind;
pub use source::StatementSource;
pub use types::{Selection, Symbol};
