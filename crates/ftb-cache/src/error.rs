//! Errors raised by the metadata cache.
//!
//! Absence of a whole table is not an error (it reads as empty). Absence of
//! one identity is only an error for the accessors that require it, and is
//! reported as [`CacheError::MissingMetadata`] so callers can tell "not
//! configured" apart from I/O or corruption.

use std::path::PathBuf;

use ftb_core::TranslateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// A required accessor found no entry for the identity.
    #[error("{identity} doesn't exist in {table}")]
    MissingMetadata { table: &'static str, identity: String },

    /// A table or snapshot file exists but cannot be decoded.
    #[error("corrupt store {path}: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// Local filesystem failure.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Translating identities for a selection failed.
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptStore { path: path.into(), reason: reason.to_string() }
    }
}
