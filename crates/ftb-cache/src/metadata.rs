//! The metadata cache facade.
//!
//! [`MetadataCache`] owns one [`LruCache`] per accessor, the attribute store
//! and the snapshot store. Reads try the memo first, then storage, and
//! promote a storage hit into the memo. Only hits are memoized: an identity
//! that is absent today is looked up again on the next call.
//!
//! Writes replace a whole table, so they also reset the memo layers that
//! were derived from it. A stored snapshot goes straight into the snapshot
//! memo.

use std::sync::Arc;

use chrono::NaiveDate;
use ftb_core::config::MetadataConfig;
use ftb_core::{ContractRecord, ContractSnapshot, StockBasicInfo, StockTradeInfo, SymbolTranslator};
use tracing::{debug, info, warn};

use crate::attribute::{AttributeStore, BasicInfoTable, ContractsTable, FileTableStore, Table, TableStore};
use crate::error::CacheError;
use crate::lru::LruCache;
use crate::paths::MetadataRoot;
use crate::snapshot::{SnapshotKey, SnapshotStore};

/// Memoized, layered access to instrument metadata.
///
/// Not thread-safe: every read may refresh recency and takes `&mut self`.
#[derive(Debug)]
pub struct MetadataCache<S = FileTableStore> {
    translator: SymbolTranslator,
    attributes: AttributeStore<S>,
    snapshots: SnapshotStore,
    basic_info: LruCache<String, StockBasicInfo>,
    price_ticks: LruCache<String, f64>,
    lot_sizes: LruCache<String, u64>,
    display_names: LruCache<String, String>,
    trade_info: LruCache<String, StockTradeInfo>,
    contracts: Option<Arc<ContractsTable>>,
    snapshot_memo: LruCache<NaiveDate, Arc<ContractSnapshot>>,
}

impl MetadataCache<FileTableStore> {
    /// Open the on-disk cache described by `config`.
    pub fn open(config: &MetadataConfig) -> Result<Self, CacheError> {
        let root = match &config.root {
            Some(path) => MetadataRoot::at(path.clone())?,
            None => MetadataRoot::resolve(&config.marker_dir)?,
        };
        let snapshot_dir = config.snapshot_dir.clone().unwrap_or_else(|| root.snapshot_dir());
        let snapshots = SnapshotStore::new(snapshot_dir, config.snapshot_namespace.clone());
        info!(
            root = %root.path().display(),
            snapshots = %snapshots.dir().display(),
            namespace = snapshots.namespace(),
            "metadata cache opened"
        );
        Self::with_store(FileTableStore::new(root, config), snapshots, config.memo_capacity)
    }

    pub fn root(&self) -> &MetadataRoot {
        self.attributes.store().root()
    }
}

impl<S: TableStore> MetadataCache<S> {
    /// Compose a cache over any table store. Each memo layer holds at most
    /// `capacity` entries.
    pub fn with_store(store: S, snapshots: SnapshotStore, capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            translator: SymbolTranslator::new()?,
            attributes: AttributeStore::new(store),
            snapshots,
            basic_info: LruCache::new(capacity),
            price_ticks: LruCache::new(capacity),
            lot_sizes: LruCache::new(capacity),
            display_names: LruCache::new(capacity),
            trade_info: LruCache::new(capacity),
            contracts: None,
            snapshot_memo: LruCache::new(capacity),
        })
    }

    pub fn translator(&self) -> &SymbolTranslator {
        &self.translator
    }

    pub fn attributes(&self) -> &AttributeStore<S> {
        &self.attributes
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Canonical cache key for `identity`.
    fn key(&self, identity: &str) -> Result<String, CacheError> {
        let sym = self.translator.parse_canonical(identity)?;
        Ok(self.translator.format_canonical(&sym))
    }

    // -----------------------------------------------------------------------
    // Basic info
    // -----------------------------------------------------------------------

    /// Basic info for `identity`, or `None` if the table has no entry.
    pub fn stock_basic_info(&mut self, identity: &str) -> Result<Option<StockBasicInfo>, CacheError> {
        let key = self.key(identity)?;
        if let Some(info) = self.basic_info.get(&key) {
            return Ok(Some(info.clone()));
        }

        let table = self.attributes.load_basic_info()?;
        let Some(info) = table.get(&key).cloned() else {
            debug!(identity = %key, "no basic info");
            return Ok(None);
        };
        self.basic_info.insert(key, info.clone());
        Ok(Some(info))
    }

    pub fn price_tick(&mut self, identity: &str) -> Result<f64, CacheError> {
        self.derived(identity, |c| &mut c.price_ticks, |info| info.price_tick)
    }

    pub fn lot_size(&mut self, identity: &str) -> Result<u64, CacheError> {
        self.derived(identity, |c| &mut c.lot_sizes, |info| info.lot_size)
    }

    pub fn display_name(&mut self, identity: &str) -> Result<String, CacheError> {
        self.derived(identity, |c| &mut c.display_names, |info| info.display_name)
    }

    fn derived<T: Clone>(
        &mut self,
        identity: &str,
        memo: fn(&mut Self) -> &mut LruCache<String, T>,
        project: fn(StockBasicInfo) -> T,
    ) -> Result<T, CacheError> {
        let key = self.key(identity)?;
        if let Some(value) = memo(self).get(&key) {
            return Ok(value.clone());
        }

        let info = self
            .stock_basic_info(&key)?
            .ok_or_else(|| missing(Table::BasicInfo, &key))?;
        let value = project(info);
        memo(self).insert(key, value.clone());
        Ok(value)
    }

    /// Replace the basic-info table with projections of `records`.
    ///
    /// Returns the number of entries written. An empty `records` leaves the
    /// stored table and its memos untouched.
    pub fn store_basic_info<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a ContractRecord>,
    ) -> Result<usize, CacheError> {
        let table: BasicInfoTable =
            records.into_iter().map(|r| (r.vt_symbol(), StockBasicInfo::from(r))).collect();
        if table.is_empty() {
            warn!("no contracts to store, keeping existing basic info");
            return Ok(0);
        }
        self.attributes.save_basic_info(&table)?;

        self.basic_info.clear();
        self.price_ticks.clear();
        self.lot_sizes.clear();
        self.display_names.clear();
        Ok(table.len())
    }

    // -----------------------------------------------------------------------
    // Contracts
    // -----------------------------------------------------------------------

    /// The whole contracts table, loaded once per process when non-empty.
    pub fn contracts_info(&mut self) -> Result<Arc<ContractsTable>, CacheError> {
        if let Some(table) = &self.contracts {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.attributes.load_contracts()?);
        if !table.is_empty() {
            self.contracts = Some(Arc::clone(&table));
        }
        Ok(table)
    }

    pub fn contract_info(&mut self, identity: &str) -> Result<Option<ContractRecord>, CacheError> {
        let key = self.key(identity)?;
        Ok(self.contracts_info()?.get(&key).cloned())
    }

    /// Replace the contracts table with `records`. Empty input is a no-op.
    pub fn store_contracts_info<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a ContractRecord>,
    ) -> Result<usize, CacheError> {
        let table: ContractsTable = records.into_iter().map(|r| (r.vt_symbol(), r.clone())).collect();
        if table.is_empty() {
            warn!("no contracts to store, keeping existing contracts info");
            return Ok(0);
        }
        self.attributes.save_contracts(&table)?;
        let len = table.len();
        self.contracts = Some(Arc::new(table));
        Ok(len)
    }

    // -----------------------------------------------------------------------
    // Trading info
    // -----------------------------------------------------------------------

    /// Curated trading parameters for `identity`; absence is an error.
    pub fn stock_trade_info(&mut self, identity: &str) -> Result<StockTradeInfo, CacheError> {
        let key = self.key(identity)?;
        if let Some(info) = self.trade_info.get(&key) {
            return Ok(info.clone());
        }

        let info = self
            .attributes
            .load_trading_info()?
            .remove(&key)
            .ok_or_else(|| missing(Table::TradingInfo, &key))?;
        self.trade_info.insert(key, info.clone());
        Ok(info)
    }

    /// Identities listed in the trading-info table, in key order.
    ///
    /// With `check_exclude`, entries flagged `exclude` are dropped.
    pub fn selected_identities(&self, check_exclude: bool) -> Result<Vec<String>, CacheError> {
        let table = self.attributes.load_trading_info()?;
        Ok(table
            .into_iter()
            .filter(|(_, info)| !(check_exclude && info.exclude))
            .map(|(identity, _)| identity)
            .collect())
    }

    /// [`selected_identities`](Self::selected_identities) as vendor codes.
    pub fn selected_vendor_codes(&self, check_exclude: bool) -> Result<Vec<String>, CacheError> {
        let identities = self.selected_identities(check_exclude)?;
        Ok(self.translator.identities_to_vendor_codes(&identities)?)
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Snapshot for `date`, plus the key it lives (or would live) under.
    pub fn load_snapshot(
        &mut self,
        date: NaiveDate,
    ) -> Result<(Option<Arc<ContractSnapshot>>, SnapshotKey), CacheError> {
        if let Some(snapshot) = self.snapshot_memo.get(&date) {
            return Ok((Some(Arc::clone(snapshot)), self.snapshots.key(date)));
        }

        let (snapshot, key) = self.snapshots.load(date)?;
        let snapshot = snapshot.map(Arc::new);
        if let Some(s) = &snapshot {
            self.snapshot_memo.insert(date, Arc::clone(s));
        }
        Ok((snapshot, key))
    }

    /// Persist the contract directory captured on `date`.
    pub fn store_snapshot(
        &mut self,
        date: NaiveDate,
        records: impl IntoIterator<Item = ContractRecord>,
    ) -> Result<SnapshotKey, CacheError> {
        let snapshot = ContractSnapshot::from_records(date, records);
        let key = self.snapshots.store(&snapshot)?;
        self.snapshot_memo.insert(date, Arc::new(snapshot));
        Ok(key)
    }
}

fn missing(table: Table, identity: &str) -> CacheError {
    CacheError::MissingMetadata { table: table.label(), identity: identity.to_string() }
}
