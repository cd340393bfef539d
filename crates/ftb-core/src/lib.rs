//! # ftb-core
//!
//! Core crate for the futu bridge, providing:
//!
//! - **Types** (`types`): canonical enums, symbol identities, contract records
//! - **Vendor enums** (`vendor`): Futu OpenAPI markets, K-line types, screener fields
//! - **Translation** (`translate`): validated enum tables and symbol conversion
//! - **Configuration** (`config`): JSON config and connection settings
//! - **Error types** (`error`): `TranslateError` / `FtbError` via thiserror
//! - **Logging** (`logging`): tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod translate;
pub mod types;
pub mod vendor;

pub use error::{FtbError, TranslateError};
pub use translate::{EnumTranslator, SymbolTranslator};
// Re-export types at crate root for convenience.
pub use types::*;
