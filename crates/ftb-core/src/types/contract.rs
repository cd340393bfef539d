//! Instrument metadata records.
//!
//! [`ContractRecord`] is produced by the brokerage session and persisted both
//! in the JSON attribute store and (via `rkyv`) in the binary snapshot store.
//! [`StockBasicInfo`] is the small projection order sizing reads on every
//! order. [`StockTradeInfo`] is curated by hand and only ever read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{Exchange, Product};
use super::symbol::CanonicalSymbol;

fn default_min_volume() -> f64 {
    1.0
}

/// Static trading attributes of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
pub struct ContractRecord {
    pub symbol: String,
    pub exchange: Exchange,
    /// Display name.
    pub name: String,
    pub product: Product,
    /// Contract size; the lot size for equities.
    pub size: f64,
    /// Minimum price increment.
    pub pricetick: f64,
    /// Minimum order volume.
    #[serde(default = "default_min_volume")]
    pub min_volume: f64,
    /// Whether the venue accepts stop orders.
    #[serde(default)]
    pub stop_supported: bool,
}

impl ContractRecord {
    pub fn canonical(&self) -> CanonicalSymbol {
        CanonicalSymbol::new(self.symbol.clone(), self.exchange)
    }

    /// Identity string `symbol.EXCHANGE`.
    pub fn vt_symbol(&self) -> String {
        self.canonical().vt_symbol()
    }
}

/// Price tick, lot size and display name of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBasicInfo {
    pub price_tick: f64,
    pub lot_size: u64,
    pub display_name: String,
}

impl From<&ContractRecord> for StockBasicInfo {
    fn from(contract: &ContractRecord) -> Self {
        Self {
            price_tick: contract.pricetick,
            lot_size: contract.size.max(0.0).round() as u64,
            display_name: contract.name.clone(),
        }
    }
}

/// Hand-curated trading parameters for one symbol.
///
/// Only `exclude` is interpreted; every other key is kept as-is for callers
/// that attach their own parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockTradeInfo {
    /// Drop this symbol from selections that honour exclusion.
    #[serde(default, deserialize_with = "truthy", skip_serializing_if = "std::ops::Not::not")]
    pub exclude: bool,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Accept `true`, `1`, `"yes"` and friends as a set flag, like the curated files do.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Every contract known on one trading day, keyed by identity string.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractSnapshot {
    pub date: NaiveDate,
    pub records: BTreeMap<String, ContractRecord>,
}

impl ContractSnapshot {
    /// Build a snapshot, keying each record by its own identity.
    pub fn from_records(date: NaiveDate, records: impl IntoIterator<Item = ContractRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.vt_symbol(), r)).collect();
        Self { date, records }
    }

    pub fn get(&self, vt_symbol: &str) -> Option<&ContractRecord> {
        self.records.get(vt_symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tencent() -> ContractRecord {
        ContractRecord {
            symbol: "00700".into(),
            exchange: Exchange::Sehk,
            name: "TENCENT".into(),
            product: Product::Equity,
            size: 100.0,
            pricetick: 0.2,
            min_volume: 100.0,
            stop_supported: true,
        }
    }

    #[test]
    fn basic_info_projection() {
        let info = StockBasicInfo::from(&tencent());
        assert_eq!(info.price_tick, 0.2);
        assert_eq!(info.lot_size, 100);
        assert_eq!(info.display_name, "TENCENT");
    }

    #[test]
    fn contract_json_defaults() {
        let json = r#"{"symbol":"AAPL","exchange":"US","name":"Apple","product":"EQUITY","size":1,"pricetick":0.01}"#;
        let c: ContractRecord = serde_json::from_str(json).unwrap();
        assert_eq!(c.min_volume, 1.0);
        assert!(!c.stop_supported);
        assert_eq!(c.vt_symbol(), "AAPL.US");
    }

    #[test]
    fn trade_info_truthy_exclude() {
        let a: StockTradeInfo = serde_json::from_str(r#"{"exclude": 1, "max_pos": 3}"#).unwrap();
        assert!(a.exclude);
        assert_eq!(a.extra.get("max_pos"), Some(&serde_json::json!(3)));

        let b: StockTradeInfo = serde_json::from_str(r#"{"exclude": 0}"#).unwrap();
        assert!(!b.exclude);

        let c: StockTradeInfo = serde_json::from_str("{}").unwrap();
        assert!(!c.exclude);
    }

    #[test]
    fn snapshot_keys_by_identity() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let snap = ContractSnapshot::from_records(date, [tencent()]);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.get("00700.SEHK").map(|c| c.pricetick), Some(0.2));
    }
}
