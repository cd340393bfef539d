//! Core data types: canonical enums, identities, and contract metadata.

pub mod contract;
pub mod enums;
pub mod symbol;

pub use contract::*;
pub use enums::*;
pub use symbol::*;
