//! Bidirectional symbol translation between canonical and Futu identities.
//!
//! The canonical side writes `symbol.EXCHANGE` (`700.SEHK`, `AAPL.US`); Futu
//! writes `MARKET.code` (`HK.700`, `US.AAPL`). The exchange ↔ market half is
//! a closed bijection owned by the [`EnumTranslator`], so anything outside it
//! is an error rather than a pass-through.
//!
//! Batch conversions are all-or-nothing: callers zip the output against their
//! own ordered input, so a partial list would silently misalign.

use crate::error::TranslateError;
use crate::types::enums::{EnumMember, Exchange};
use crate::types::symbol::{CanonicalSymbol, SEPARATOR, VendorCode};
use crate::vendor::Market;

use super::enums::EnumTranslator;

/// Stateless converter between [`CanonicalSymbol`] and [`VendorCode`].
#[derive(Debug, Clone)]
pub struct SymbolTranslator {
    enums: EnumTranslator,
}

impl SymbolTranslator {
    /// Create a translator over freshly validated enumeration tables.
    pub fn new() -> Result<Self, TranslateError> {
        Ok(Self::with_enums(EnumTranslator::new()?))
    }

    pub fn with_enums(enums: EnumTranslator) -> Self {
        Self { enums }
    }

    /// The enumeration tables this translator is built on.
    pub fn enums(&self) -> &EnumTranslator {
        &self.enums
    }

    /// Parse `symbol.EXCHANGE`.
    ///
    /// The string must contain exactly one separator, a non-empty symbol, and
    /// an exchange token from the closed [`Exchange`] set.
    pub fn parse_canonical(&self, identity: &str) -> Result<CanonicalSymbol, TranslateError> {
        let mut parts = identity.split(SEPARATOR);
        let (Some(symbol), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TranslateError::malformed(identity, "expected exactly one separator"));
        };
        if symbol.is_empty() {
            return Err(TranslateError::malformed(identity, "empty symbol"));
        }
        let Some(exchange) = Exchange::from_name(token) else {
            return Err(TranslateError::malformed(identity, format!("unknown exchange '{token}'")));
        };
        Ok(CanonicalSymbol::new(symbol, exchange))
    }

    /// Inverse of [`parse_canonical`](Self::parse_canonical).
    pub fn format_canonical(&self, sym: &CanonicalSymbol) -> String {
        sym.to_string()
    }

    pub fn canonical_to_vendor(&self, sym: &CanonicalSymbol) -> Result<VendorCode, TranslateError> {
        let market = self
            .enums
            .exchange_to_market(sym.exchange)
            .map_err(|_| TranslateError::UnsupportedExchange(sym.exchange.to_string()))?;
        Ok(VendorCode::new(market.name(), sym.symbol.clone()))
    }

    pub fn vendor_to_canonical(&self, code: &VendorCode) -> Result<CanonicalSymbol, TranslateError> {
        let unsupported = || TranslateError::UnsupportedMarket {
            market: code.market.clone(),
            code: code.to_string(),
        };
        let market = Market::from_prefix(&code.market).ok_or_else(unsupported)?;
        let exchange = self.enums.market_to_exchange(market).map_err(|_| unsupported())?;
        Ok(CanonicalSymbol::new(code.code.clone(), exchange))
    }

    /// `700.SEHK` → `HK.700`.
    pub fn identity_to_vendor_code(&self, identity: &str) -> Result<String, TranslateError> {
        let sym = self.parse_canonical(identity)?;
        Ok(self.canonical_to_vendor(&sym)?.to_string())
    }

    /// `HK.700` → `700.SEHK`.
    pub fn vendor_code_to_identity(&self, code: &str) -> Result<String, TranslateError> {
        let code = VendorCode::parse(code)?;
        Ok(self.vendor_to_canonical(&code)?.to_string())
    }

    /// Convert identity strings element-wise, preserving order.
    ///
    /// Fails as a whole on the first bad element, naming its index.
    pub fn identities_to_vendor_codes<S: AsRef<str>>(
        &self,
        identities: &[S],
    ) -> Result<Vec<String>, TranslateError> {
        batch(identities, |s| self.identity_to_vendor_code(s))
    }

    /// Convert vendor code strings element-wise, preserving order.
    pub fn vendor_codes_to_identities<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> Result<Vec<String>, TranslateError> {
        batch(codes, |s| self.vendor_code_to_identity(s))
    }
}

fn batch<S, T>(
    inputs: &[S],
    convert: impl Fn(&str) -> Result<T, TranslateError>,
) -> Result<Vec<T>, TranslateError>
where
    S: AsRef<str>,
{
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let input = input.as_ref();
            convert(input).map_err(|source| TranslateError::Batch {
                index,
                input: input.to_string(),
                source: Box::new(source),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> SymbolTranslator {
        SymbolTranslator::new().expect("built-in tables are complete")
    }

    #[test]
    fn parse_and_format_round_trip() {
        let t = translator();
        let sym = t.parse_canonical("700.SEHK").unwrap();
        assert_eq!(sym, CanonicalSymbol::new("700", Exchange::Sehk));
        assert_eq!(t.format_canonical(&sym), "700.SEHK");
    }

    #[test]
    fn canonical_round_trip_for_every_exchange() {
        let t = translator();
        for &exchange in Exchange::ALL {
            for symbol in ["700", "600000", "AAPL", "BRK.B"] {
                let sym = CanonicalSymbol::new(symbol, exchange);
                let code = t.canonical_to_vendor(&sym).unwrap();
                assert_eq!(t.vendor_to_canonical(&code).unwrap(), sym);
            }
        }
    }

    #[test]
    fn vendor_round_trip_for_every_market() {
        let t = translator();
        for &market in Market::ALL {
            for code in ["00700", "000001", "TSLA", "BRK.B"] {
                let v = VendorCode::new(market.name(), code);
                let sym = t.vendor_to_canonical(&v).unwrap();
                assert_eq!(t.canonical_to_vendor(&sym).unwrap(), v);
            }
        }
    }

    #[test]
    fn exchange_market_pairs() {
        let t = translator();
        assert_eq!(t.identity_to_vendor_code("700.SEHK").unwrap(), "HK.700");
        assert_eq!(t.identity_to_vendor_code("AAPL.US").unwrap(), "US.AAPL");
        assert_eq!(t.identity_to_vendor_code("600000.SSE").unwrap(), "SH.600000");
        assert_eq!(t.identity_to_vendor_code("000001.SZSE").unwrap(), "SZ.000001");
    }

    #[test]
    fn dotted_vendor_code_keeps_tail() {
        let t = translator();
        let sym = t.vendor_to_canonical(&VendorCode::parse("US.BRK.B").unwrap()).unwrap();
        assert_eq!(sym.symbol, "BRK.B");
        assert_eq!(sym.exchange, Exchange::Smart);
    }

    #[test]
    fn malformed_identities() {
        let t = translator();
        for bad in ["700", "A.B.SEHK", ".SEHK", "700.", "700.HKEX", "700.sehk"] {
            let err = t.parse_canonical(bad).unwrap_err();
            assert!(
                matches!(err, TranslateError::MalformedIdentity { .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn unknown_market_is_rejected() {
        let err = translator().vendor_code_to_identity("JP.7203").unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnsupportedMarket { market: "JP".into(), code: "JP.7203".into() }
        );
    }

    #[test]
    fn batch_preserves_order() {
        let t = translator();
        let codes = t.identities_to_vendor_codes(&["AAPL.US", "700.SEHK", "600000.SSE"]).unwrap();
        assert_eq!(codes, vec!["US.AAPL", "HK.700", "SH.600000"]);
        let back = t.vendor_codes_to_identities(&codes).unwrap();
        assert_eq!(back, vec!["AAPL.US", "700.SEHK", "600000.SSE"]);
    }

    #[test]
    fn batch_fails_atomically_and_names_element() {
        let err = translator().identities_to_vendor_codes(&["700.SEHK", "BADEX.ZZ"]).unwrap_err();
        let TranslateError::Batch { index, input, source } = err else {
            panic!("expected batch error, got {err:?}");
        };
        assert_eq!(index, 1);
        assert_eq!(input, "BADEX.ZZ");
        assert!(matches!(*source, TranslateError::MalformedIdentity { .. }));
    }
}
