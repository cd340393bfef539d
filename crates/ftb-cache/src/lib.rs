//! # ftb-cache
//!
//! Instrument metadata cache for the futu bridge.
//!
//! ## Layers
//!
//! Reads go through three layers in a fixed order, and a hit in a slower
//! layer is promoted into the faster one:
//!
//! 1. [`lru`]: bounded in-process memoization keyed by identity string
//! 2. [`attribute`]: JSON tables (`stock_basic_info`, `constracts_info`,
//!    trading info) behind the [`TableStore`] trait
//! 3. [`snapshot`]: one rkyv-encoded contract snapshot per calendar day
//!
//! [`MetadataCache`] composes the three and is the only type most callers
//! need.
//!
//! ## Shared infrastructure
//!
//! - [`paths`]: metadata root resolution
//! - [`fs_util`]: atomic replace-on-write
//! - [`json_util`]: comment stripping for hand-edited tables

pub mod attribute;
pub mod error;
pub mod fs_util;
pub mod json_util;
pub mod lru;
pub mod metadata;
pub mod paths;
pub mod snapshot;

pub use attribute::{AttributeStore, FileTableStore, MemoryTableStore, Table, TableStore};
pub use error::CacheError;
pub use lru::LruCache;
pub use metadata::MetadataCache;
pub use paths::MetadataRoot;
pub use snapshot::{SnapshotKey, SnapshotStore};
