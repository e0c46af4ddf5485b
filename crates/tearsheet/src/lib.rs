#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tearsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company fundamentals aggregation and ratio pipeline.
//!
//! This crate re-exports the core types and provides
//! [`AnalysisSession`] for driving the pipeline from a presentation
//! layer.
//!
//! # Features
//!
//! - `fmp` - Financial Modeling Prep statement source (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tearsheet::{AnalysisSession, FmpClient, InMemoryBundleCache, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> tearsheet::Result<()> {
//!     let session = AnalysisSession::new(
//!         Arc::new(FmpClient::new()),
//!         Arc::new(InMemoryBundleCache::new()),
//!     );
//!
//!     session.fetch(&Symbol::new("AAPL"), "your_api_key").await?;
//!     for outcome in session.ratios().await?.unwrap_or_default() {
//!         println!("{}: {:?}", outcome.kind, outcome.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use tearsheet_core::*;

// Cache implementations
pub use tearsheet_cache::{InMemoryBundleCache, NoopBundleCache};

// Statement sources
#[cfg(feature = "fmp")]
pub use tearsheet_fmp::FmpClient;

mod report;
mod session;
pub use report::{RatioLine, format_dollars, ratio_lines, record_rows};
pub use session::AnalysisSession;
