//! Date-partitioned contract snapshots.
//!
//! One file per (namespace, calendar date), named
//! `{namespace}_contracts_{YYYYMMDD}`, so a snapshot is located without
//! scanning the directory.
//!
//! # File layout
//!
//! ```text
//! ┌─────────┬──────────────────────────────────────┐
//! │ version │ rkyv-serialized SnapshotFile         │
//! │ (1 byte)│ (captured_on + key/record entries)   │
//! └─────────┴──────────────────────────────────────┘
//! ```
//!
//! Decoding copies the payload into an aligned buffer and validates it with
//! `rkyv::from_bytes`; no unchecked access to archived data.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use ftb_core::{ContractRecord, ContractSnapshot};
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use tracing::{debug, info};

use crate::error::CacheError;
use crate::fs_util::{read_optional, write_atomic};

/// Current snapshot format version.
pub const FORMAT_VERSION: u8 = 2;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Address of one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub namespace: String,
    pub date: NaiveDate,
}

impl SnapshotKey {
    pub fn new(namespace: impl Into<String>, date: NaiveDate) -> Self {
        Self { namespace: namespace.into(), date }
    }

    /// `{namespace}_contracts_{YYYYMMDD}`
    pub fn file_name(&self) -> String {
        format!("{}_contracts_{}", self.namespace, self.date.format("%Y%m%d"))
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

#[derive(Debug, Archive, RkyvSerialize, RkyvDeserialize)]
struct SnapshotFile {
    /// Days since 0001-01-01 (proleptic Gregorian, day 1).
    captured_on: i32,
    /// Map entries as stored, key first.
    entries: Vec<(String, ContractRecord)>,
}

fn encode(snapshot: &ContractSnapshot) -> Result<Vec<u8>, rkyv::rancor::Error> {
    let file = SnapshotFile {
        captured_on: snapshot.date.num_days_from_ce(),
        entries: snapshot.records.iter().map(|(k, r)| (k.clone(), r.clone())).collect(),
    };
    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(&file)?;
    let mut out = Vec::with_capacity(1 + payload.len());
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

fn decode(path: &Path, bytes: &[u8]) -> Result<ContractSnapshot, CacheError> {
    let Some((&version, payload)) = bytes.split_first() else {
        return Err(CacheError::corrupt(path, "empty snapshot file"));
    };
    if version != FORMAT_VERSION {
        return Err(CacheError::corrupt(path, format!("unsupported format version {version}")));
    }

    let mut aligned = rkyv::util::AlignedVec::<8>::with_capacity(payload.len());
    aligned.extend_from_slice(payload);
    let file = rkyv::from_bytes::<SnapshotFile, rkyv::rancor::Error>(&aligned)
        .map_err(|e| CacheError::corrupt(path, e))?;

    let date = NaiveDate::from_num_days_from_ce_opt(file.captured_on)
        .ok_or_else(|| CacheError::corrupt(path, format!("invalid capture day {}", file.captured_on)))?;
    Ok(ContractSnapshot { date, records: file.entries.into_iter().collect() })
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Directory of snapshot files for one namespace.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    namespace: String,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self { dir: dir.into(), namespace: namespace.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self, date: NaiveDate) -> SnapshotKey {
        SnapshotKey::new(self.namespace.clone(), date)
    }

    pub fn path(&self, key: &SnapshotKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Read the snapshot for `date`.
    ///
    /// A missing file is `Ok((None, key))`: the caller fetches live data and
    /// writes it back under the returned key.
    pub fn load(&self, date: NaiveDate) -> Result<(Option<ContractSnapshot>, SnapshotKey), CacheError> {
        let key = self.key(date);
        let path = self.path(&key);
        let Some(bytes) = read_optional(&path)? else {
            debug!(%key, "no snapshot");
            return Ok((None, key));
        };

        let snapshot = decode(&path, &bytes)?;
        if snapshot.date != date {
            return Err(CacheError::corrupt(
                &path,
                format!("file captured on {} but named for {date}", snapshot.date),
            ));
        }
        debug!(%key, contracts = snapshot.len(), "snapshot loaded");
        Ok((Some(snapshot), key))
    }

    /// Write `snapshot` under its own date, replacing any earlier file for
    /// that day.
    pub fn store(&self, snapshot: &ContractSnapshot) -> Result<SnapshotKey, CacheError> {
        let key = self.key(snapshot.date);
        let path = self.path(&key);
        let bytes = encode(snapshot).map_err(|e| CacheError::corrupt(&path, e))?;
        if path.exists() {
            info!(%key, "replacing existing snapshot");
        }
        write_atomic(&path, &bytes)?;
        info!(%key, contracts = snapshot.len(), bytes = bytes.len(), "snapshot stored");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftb_core::{Exchange, Product};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(date: NaiveDate) -> ContractSnapshot {
        let records = vec![
            ContractRecord {
                symbol: "00700".into(),
                exchange: Exchange::Sehk,
                name: "TENCENT".into(),
                product: Product::Equity,
                size: 100.0,
                pricetick: 0.2,
                min_volume: 100.0,
                stop_supported: true,
            },
            ContractRecord {
                symbol: "BRK.B".into(),
                exchange: Exchange::Smart,
                name: "Berkshire B".into(),
                product: Product::Equity,
                size: 1.0,
                pricetick: 0.01,
                min_volume: 1.0,
                stop_supported: false,
            },
            ContractRecord {
                symbol: "510300".into(),
                exchange: Exchange::Sse,
                name: "CSI 300 ETF".into(),
                product: Product::Etf,
                size: 100.0,
                pricetick: 0.001,
                min_volume: 100.0,
                stop_supported: false,
            },
        ];
        ContractSnapshot::from_records(date, records)
    }

    #[test]
    fn file_name_is_deterministic() {
        let key = SnapshotKey::new("backtrader_futu", day(2024, 1, 2));
        assert_eq!(key.file_name(), "backtrader_futu_contracts_20240102");
    }

    #[test]
    fn write_then_read_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("contracts_cache"), "ns");
        let snap = sample(day(2024, 1, 2));

        let key = store.store(&snap).unwrap();
        assert_eq!(key, store.key(day(2024, 1, 2)));
        assert!(store.path(&key).is_file());

        let (loaded, loaded_key) = store.load(day(2024, 1, 2)).unwrap();
        assert_eq!(loaded_key, key);
        assert_eq!(loaded.as_ref(), Some(&snap));
    }

    #[test]
    fn keys_survive_even_when_not_the_record_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        let mut snap = sample(day(2024, 1, 2));
        let tencent = snap.records.remove("00700.SEHK").unwrap();
        snap.records.insert("700.SEHK".into(), tencent);

        store.store(&snap).unwrap();
        let (loaded, _) = store.load(day(2024, 1, 2)).unwrap();
        let loaded = loaded.unwrap();
        assert!(loaded.get("700.SEHK").is_some());
        assert!(loaded.get("00700.SEHK").is_none());
        assert_eq!(loaded, snap);
    }

    #[test]
    fn missing_date_returns_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        store.store(&sample(day(2024, 1, 2))).unwrap();

        let (loaded, key) = store.load(day(2024, 1, 3)).unwrap();
        assert!(loaded.is_none());
        assert_eq!(key.file_name(), "ns_contracts_20240103");
    }

    #[test]
    fn overwrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        let date = day(2024, 1, 2);
        store.store(&sample(date)).unwrap();

        let smaller = ContractSnapshot::from_records(date, sample(date).records.into_values().take(1));
        store.store(&smaller).unwrap();

        let (loaded, _) = store.load(date).unwrap();
        assert_eq!(loaded.unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        let key = store.key(day(2024, 1, 2));
        std::fs::write(store.path(&key), [FORMAT_VERSION, 0xde, 0xad]).unwrap();

        let err = store.load(day(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, CacheError::CorruptStore { .. }));
    }

    #[test]
    fn unknown_version_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        let key = store.key(day(2024, 1, 2));
        std::fs::write(store.path(&key), [FORMAT_VERSION + 1]).unwrap();

        assert!(matches!(store.load(day(2024, 1, 2)), Err(CacheError::CorruptStore { .. })));
    }

    #[test]
    fn misfiled_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "ns");
        store.store(&sample(day(2024, 1, 2))).unwrap();
        std::fs::rename(
            store.path(&store.key(day(2024, 1, 2))),
            store.path(&store.key(day(2024, 1, 5))),
        )
        .unwrap();

        assert!(matches!(store.load(day(2024, 1, 5)), Err(CacheError::CorruptStore { .. })));
    }
}
