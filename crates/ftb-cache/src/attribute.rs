//! Persistent attribute tables.
//!
//! Each logical table is one JSON object keyed by canonical identity. The
//! [`TableStore`] trait owns raw text in and out; [`AttributeStore`] owns the
//! decoding rules shared by every table:
//!
//! - no backing file, or an empty one, reads as an empty table
//! - anything else must parse completely or the read fails with
//!   [`CacheError::CorruptStore`]
//! - writes serialize the whole table (pretty, trailing newline) and replace
//!   the file in one step

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;

use ahash::AHashMap;
use ftb_core::config::MetadataConfig;
use ftb_core::{ContractRecord, StockBasicInfo, StockTradeInfo};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::CacheError;
use crate::fs_util::{read_optional, write_atomic};
use crate::json_util::strip_comments;
use crate::paths::MetadataRoot;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Logical tables of the attribute store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// identity → price tick, lot size, display name
    BasicInfo,
    /// identity → reduced contract record
    Contracts,
    /// identity → curated trading parameters, read-only
    TradingInfo,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::BasicInfo, Table::Contracts, Table::TradingInfo];

    /// Name used in log lines and missing-metadata errors.
    pub fn label(self) -> &'static str {
        match self {
            Table::BasicInfo => "stock basic info",
            Table::Contracts => "contracts info",
            Table::TradingInfo => "trading info",
        }
    }

    /// Hand-edited tables may carry explanatory comments.
    pub fn comment_tolerant(self) -> bool {
        matches!(self, Table::TradingInfo)
    }
}

/// Raw text storage for the attribute tables.
pub trait TableStore {
    /// Full content of `table`, or `None` if it has never been written.
    fn load(&self, table: Table) -> Result<Option<String>, CacheError>;

    /// Replace the full content of `table`. Must not leave partial content
    /// visible on failure.
    fn save(&self, table: Table, content: &str) -> Result<(), CacheError>;

    /// Where `table` lives, for diagnostics.
    fn location(&self, table: Table) -> PathBuf;
}

// ---------------------------------------------------------------------------
// Disk store
// ---------------------------------------------------------------------------

/// One JSON file per table under the metadata root.
#[derive(Debug, Clone)]
pub struct FileTableStore {
    root: MetadataRoot,
    basic_info_file: String,
    contracts_file: String,
    trading_info_file: String,
}

impl FileTableStore {
    pub fn new(root: MetadataRoot, config: &MetadataConfig) -> Self {
        Self {
            root,
            basic_info_file: config.basic_info_file.clone(),
            contracts_file: config.contracts_file.clone(),
            trading_info_file: config.trading_info_file.clone(),
        }
    }

    pub fn root(&self) -> &MetadataRoot {
        &self.root
    }

    fn file_name(&self, table: Table) -> &str {
        match table {
            Table::BasicInfo => &self.basic_info_file,
            Table::Contracts => &self.contracts_file,
            Table::TradingInfo => &self.trading_info_file,
        }
    }
}

impl TableStore for FileTableStore {
    fn load(&self, table: Table) -> Result<Option<String>, CacheError> {
        let path = self.location(table);
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        String::from_utf8(bytes).map(Some).map_err(|e| CacheError::corrupt(&path, e))
    }

    fn save(&self, table: Table, content: &str) -> Result<(), CacheError> {
        write_atomic(&self.location(table), content.as_bytes())
    }

    fn location(&self, table: Table) -> PathBuf {
        self.root.file(self.file_name(table))
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Table store held in memory, counting every load per table.
///
/// Used to observe how often the cache layers fall through to storage.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RefCell<AHashMap<Table, String>>,
    loads: RefCell<AHashMap<Table, usize>>,
    saves: Cell<usize>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with raw content.
    pub fn with_table(self, table: Table, content: impl Into<String>) -> Self {
        self.tables.borrow_mut().insert(table, content.into());
        self
    }

    pub fn loads(&self, table: Table) -> usize {
        self.loads.borrow().get(&table).copied().unwrap_or(0)
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn content(&self, table: Table) -> Option<String> {
        self.tables.borrow().get(&table).cloned()
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self, table: Table) -> Result<Option<String>, CacheError> {
        *self.loads.borrow_mut().entry(table).or_insert(0) += 1;
        Ok(self.tables.borrow().get(&table).cloned())
    }

    fn save(&self, table: Table, content: &str) -> Result<(), CacheError> {
        self.saves.set(self.saves.get() + 1);
        self.tables.borrow_mut().insert(table, content.to_string());
        Ok(())
    }

    fn location(&self, table: Table) -> PathBuf {
        PathBuf::from(format!("memory://{}", table.label()))
    }
}

// ---------------------------------------------------------------------------
// Typed access
// ---------------------------------------------------------------------------

pub type BasicInfoTable = BTreeMap<String, StockBasicInfo>;
pub type ContractsTable = BTreeMap<String, ContractRecord>;
pub type TradingInfoTable = BTreeMap<String, StockTradeInfo>;

/// Typed reads and writes over a [`TableStore`].
#[derive(Debug, Clone)]
pub struct AttributeStore<S> {
    store: S,
}

impl<S: TableStore> AttributeStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_basic_info(&self) -> Result<BasicInfoTable, CacheError> {
        self.load_table(Table::BasicInfo)
    }

    pub fn save_basic_info(&self, table: &BasicInfoTable) -> Result<(), CacheError> {
        self.save_table(Table::BasicInfo, table)
    }

    pub fn load_contracts(&self) -> Result<ContractsTable, CacheError> {
        self.load_table(Table::Contracts)
    }

    pub fn save_contracts(&self, table: &ContractsTable) -> Result<(), CacheError> {
        self.save_table(Table::Contracts, table)
    }

    /// Curated trading parameters. There is no writer; the file is maintained
    /// by hand.
    pub fn load_trading_info(&self) -> Result<TradingInfoTable, CacheError> {
        self.load_table(Table::TradingInfo)
    }

    fn load_table<T: DeserializeOwned + Default>(&self, table: Table) -> Result<T, CacheError> {
        let Some(raw) = self.store.load(table)? else {
            debug!(table = table.label(), "table absent, reading as empty");
            return Ok(T::default());
        };

        let text = if table.comment_tolerant() { strip_comments(&raw) } else { raw };
        if text.trim().is_empty() {
            debug!(table = table.label(), "table empty");
            return Ok(T::default());
        }

        serde_json::from_str(&text)
            .map_err(|e| CacheError::corrupt(self.store.location(table), e))
    }

    fn save_table<T: Serialize>(&self, table: Table, value: &T) -> Result<(), CacheError> {
        let location = self.store.location(table);
        let mut text =
            serde_json::to_string_pretty(value).map_err(|e| CacheError::corrupt(&location, e))?;
        text.push('\n');
        self.store.save(table, &text)?;
        info!(table = table.label(), path = %location.display(), "table saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftb_core::{Exchange, Product};

    fn record(symbol: &str, exchange: Exchange, tick: f64, size: f64) -> ContractRecord {
        ContractRecord {
            symbol: symbol.into(),
            exchange,
            name: format!("{symbol} name"),
            product: Product::Equity,
            size,
            pricetick: tick,
            min_volume: size,
            stop_supported: false,
        }
    }

    #[test]
    fn absent_and_empty_tables_read_empty() {
        let absent = AttributeStore::new(MemoryTableStore::new());
        assert!(absent.load_basic_info().unwrap().is_empty());

        let empty = AttributeStore::new(MemoryTableStore::new().with_table(Table::Contracts, "  \n"));
        assert!(empty.load_contracts().unwrap().is_empty());
    }

    #[test]
    fn bad_json_is_corrupt() {
        let store =
            AttributeStore::new(MemoryTableStore::new().with_table(Table::BasicInfo, "{not json"));
        let err = store.load_basic_info().unwrap_err();
        assert!(matches!(err, CacheError::CorruptStore { .. }));
    }

    #[test]
    fn basic_info_round_trip_through_text() {
        let store = AttributeStore::new(MemoryTableStore::new());
        let rec = record("00700", Exchange::Sehk, 0.2, 100.0);
        let mut table = BasicInfoTable::new();
        table.insert(rec.vt_symbol(), StockBasicInfo::from(&rec));
        store.save_basic_info(&table).unwrap();

        let text = store.store().content(Table::BasicInfo).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"lot_size\": 100"));
        assert_eq!(store.load_basic_info().unwrap(), table);
    }

    #[test]
    fn trading_info_tolerates_comments() {
        let raw = r#"{
    // excluded while halted
    "00700.SEHK": {"exclude": 1},
    "AAPL.US": {"max_position": 10} /* default */
}"#;
        let store = AttributeStore::new(MemoryTableStore::new().with_table(Table::TradingInfo, raw));
        let table = store.load_trading_info().unwrap();
        assert!(table["00700.SEHK"].exclude);
        assert!(!table["AAPL.US"].exclude);
    }

    #[test]
    fn comments_not_accepted_in_generated_tables() {
        let raw = "{ // note\n}";
        let store = AttributeStore::new(MemoryTableStore::new().with_table(Table::Contracts, raw));
        assert!(store.load_contracts().is_err());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = MetadataRoot::at(dir.path()).unwrap();
        let store = AttributeStore::new(FileTableStore::new(root, &MetadataConfig::default()));

        assert!(store.load_contracts().unwrap().is_empty());

        let rec = record("AAPL", Exchange::Smart, 0.01, 1.0);
        let mut table = ContractsTable::new();
        table.insert(rec.vt_symbol(), rec);
        store.save_contracts(&table).unwrap();

        assert!(dir.path().join("constracts_info.json").is_file());
        assert_eq!(store.load_contracts().unwrap(), table);
    }
}
