//! Typed error definitions for the futu bridge.
//!
//! [`TranslateError`] covers every failure of the enumeration and symbol
//! translators. [`FtbError`] covers configuration loading. Both implement
//! `std::error::Error` via `thiserror`, so they compose with `anyhow::Result`
//! at the binary edge.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of canonical ↔ vendor translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The identity string is not `symbol.EXCHANGE` with a known exchange.
    #[error("malformed identity '{identity}': {reason}")]
    MalformedIdentity { identity: String, reason: String },

    /// No vendor market is mapped for this exchange.
    #[error("unsupported exchange: {0}")]
    UnsupportedExchange(String),

    /// The vendor market prefix is outside the supported set.
    #[error("unsupported market '{market}' in vendor code '{code}'")]
    UnsupportedMarket { market: String, code: String },

    /// A member of an enumeration family has no counterpart on the other side.
    #[error("{family}: no counterpart for {member}")]
    Unmapped { family: &'static str, member: String },

    /// A mapping table failed exhaustive validation at construction.
    #[error("{family} mapping table is invalid: {reason}")]
    IncompleteMapping { family: &'static str, reason: String },

    /// One element of a batch failed; the whole batch is rejected.
    #[error("batch element {index} ('{input}') failed: {source}")]
    Batch {
        index: usize,
        input: String,
        #[source]
        source: Box<TranslateError>,
    },
}

impl TranslateError {
    pub(crate) fn malformed(identity: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentity { identity: identity.to_string(), reason: reason.into() }
    }
}

/// Configuration and settings errors.
#[derive(Debug, Error)]
pub enum FtbError {
    /// Configuration is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Reading a config or settings file failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config or settings file is not valid JSON for its schema.
    #[error("json error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
