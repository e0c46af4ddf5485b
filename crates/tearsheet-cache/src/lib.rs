#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tearsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for statement bundles.
//!
//! This crate provides implementations of the [`BundleCache`] trait from
//! `tearsheet-core`:
//!
//! - [`InMemoryBundleCache`] - Session-lived in-memory cache
//! - [`NoopBundleCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use tearsheet_core::BundleCache;

// Re-export implementations
pub use memory::InMemoryBundleCache;
pub use noop::NoopBundleCache;
