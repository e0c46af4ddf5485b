//! Error types for pipeline operations.
//!
//! This module defines [`AnalysisError`] which covers all error cases that
//! can occur when fetching, normalizing, or deriving company fundamentals.

use thiserror::Error;

use crate::resource::ResourceKind;

/// Errors that can occur during pipeline operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A single resource fetch failed (connection failure, non-success status).
    #[error("Fetch failed for {resource} ({symbol}): {message}")]
    Fetch {
        /// The resource that was being fetched.
        resource: ResourceKind,
        /// The symbol the fetch was for.
        symbol: String,
        /// Underlying failure description.
        message: String,
    },

    /// Rate limit exceeded by the provider.
    #[error("Rate limited fetching {resource}: retry after {retry_after:?}")]
    RateLimited {
        /// The resource whose fetch was rate limited.
        resource: ResourceKind,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The provider returned zero periods where at least one was expected.
    #[error("No periods returned for {resource} ({symbol})")]
    EmptyResult {
        /// The resource that came back empty.
        resource: ResourceKind,
        /// The symbol the fetch was for.
        symbol: String,
    },

    /// A payload could not be decoded into the expected shape.
    #[error("Parse error for {resource}: {message}")]
    Parse {
        /// The resource whose payload failed to decode.
        resource: ResourceKind,
        /// Decode failure description.
        message: String,
    },

    /// Network-related errors outside any single resource fetch.
    #[error("Network error: {0}")]
    Network(String),

    /// A ratio could not be derived from the current bundle.
    ///
    /// This is always local to one ratio; other ratios still compute.
    #[error("{ratio} is undefined: {reason}")]
    RatioUndefined {
        /// Display name of the affected ratio.
        ratio: String,
        /// Why the ratio has no value (missing field, zero denominator).
        reason: String,
    },

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`AnalysisError`].
pub type Result<T> = std::result::Result<T, AnalysisError>;
