//! Canonical ↔ vendor translation.
//!
//! - [`enums`]: per-family enumeration tables, validated at construction
//! - [`symbol`]: identity strings and vendor codes, built on the exchange table

pub mod enums;
pub mod symbol;

pub use enums::{Coverage, EnumTable, EnumTranslator};
pub use symbol::SymbolTranslator;
