//! Core value types.
//!
//! This module defines [`Symbol`], the uppercased ticker newtype, and
//! [`Selection`], the caller-driven choice of symbol, API key and growth
//! metrics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cache::SelectionKey;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The caller's active choice: which company to analyze, the credential to
/// fetch it with, and which growth metrics to chart.
///
/// The metric choice persists across refetches until explicitly changed;
/// it is re-validated against the current bundle on read, never stored
/// pre-filtered.
#[derive(Clone, PartialEq, Eq)]
pub struct Selection {
    /// The selected company.
    pub symbol: Symbol,
    /// Caller-supplied provider API key, passed through unchanged.
    pub api_key: String,
    /// Ordered growth metrics chosen for charting.
    pub metrics: Vec<String>,
}

impl Selection {
    /// Creates a selection with no chosen growth metrics.
    #[must_use]
    pub const fn new(symbol: Symbol, api_key: String) -> Self {
        Self {
            symbol,
            api_key,
            metrics: Vec::new(),
        }
    }

    /// The cache key for this selection.
    #[must_use]
    pub fn key(&self) -> SelectionKey {
        SelectionKey::new(self.symbol.clone(), self.api_key.clone())
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("symbol", &self.symbol)
            .field("api_key", &"[REDACTED]")
            .field("metrics", &self.metrics)
            .finish()
    }
}
