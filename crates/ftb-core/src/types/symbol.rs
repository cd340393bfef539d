//! Instrument identities on both sides of the bridge.
//!
//! A [`CanonicalSymbol`] is written `symbol.EXCHANGE` (`700.SEHK`) and is the
//! key of every cache table. A [`VendorCode`] is written `MARKET.code`
//! (`HK.700`); the code part may itself contain the separator (`US.BRK.B`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::Exchange;
use crate::error::TranslateError;

/// Separator between the two halves of either identity string.
pub const SEPARATOR: char = '.';

/// Canonical instrument identity: a symbol listed on one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalSymbol {
    pub symbol: String,
    pub exchange: Exchange,
}

impl CanonicalSymbol {
    pub fn new(symbol: impl Into<String>, exchange: Exchange) -> Self {
        Self { symbol: symbol.into(), exchange }
    }

    /// Identity string `symbol.EXCHANGE`, the cache key.
    pub fn vt_symbol(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CanonicalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.symbol, self.exchange)
    }
}

/// Vendor instrument identity: a market prefix plus the vendor's code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorCode {
    pub market: String,
    pub code: String,
}

impl VendorCode {
    pub fn new(market: impl Into<String>, code: impl Into<String>) -> Self {
        Self { market: market.into(), code: code.into() }
    }

    /// Split a vendor code string at its first separator.
    ///
    /// Everything after the market prefix is the code, separators included.
    pub fn parse(s: &str) -> Result<Self, TranslateError> {
        let Some((market, code)) = s.split_once(SEPARATOR) else {
            return Err(TranslateError::malformed(s, "missing market separator"));
        };
        if market.is_empty() || code.is_empty() {
            return Err(TranslateError::malformed(s, "empty market or code"));
        }
        Ok(Self::new(market, code))
    }
}

impl fmt::Display for VendorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.market, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_display() {
        let sym = CanonicalSymbol::new("AAPL", Exchange::Smart);
        assert_eq!(sym.vt_symbol(), "AAPL.US");
    }

    #[test]
    fn vendor_parse_keeps_dotted_code() {
        let code = VendorCode::parse("US.BRK.B").unwrap();
        assert_eq!(code.market, "US");
        assert_eq!(code.code, "BRK.B");
        assert_eq!(code.to_string(), "US.BRK.B");
    }

    #[test]
    fn vendor_parse_rejects_missing_parts() {
        assert!(VendorCode::parse("HK00700").is_err());
        assert!(VendorCode::parse(".00700").is_err());
        assert!(VendorCode::parse("HK.").is_err());
    }
}
