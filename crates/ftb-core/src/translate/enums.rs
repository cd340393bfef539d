//! Validated canonical ↔ vendor enumeration tables.
//!
//! Every family has an explicit pair table below. [`EnumTranslator::new`]
//! loads each one into an [`EnumTable`], which refuses to build unless every
//! canonical member has exactly one entry and no vendor member is claimed
//! twice. A member added on one side without a counterpart therefore fails
//! at startup instead of on first use.

use std::fmt::Debug;
use std::hash::Hash;

use ahash::AHashMap;

use crate::error::TranslateError;
use crate::types::enums::{
    AccumulateField, EnumMember, Exchange, FinancialField, FinancialQuarter, IndicatorField,
    KlType, PatternField, RelativePosition, ScreenerField, SimpleField,
};
use crate::vendor::{
    FinancialQuarter as VendorFinancialQuarter, KlType as VendorKlType, Market,
    RelativePosition as VendorRelativePosition, StockField,
};

/// Pair each listed variant of `$canon` with the same-named variant of `$vendor`.
macro_rules! mirrored {
    ($canon:ident => $vendor:ident: $($v:ident),+ $(,)?) => {
        &[ $( ($canon::$v, $vendor::$v) ),+ ]
    };
    ($wrap:ident($canon:ident) => $vendor:ident: $($v:ident),+ $(,)?) => {
        &[ $( (ScreenerField::$wrap($canon::$v), $vendor::$v) ),+ ]
    };
}

// ---------------------------------------------------------------------------
// Pair tables
// ---------------------------------------------------------------------------

const EXCHANGE_MARKETS: &[(Exchange, Market)] = &[
    (Exchange::Smart, Market::Us),
    (Exchange::Sehk, Market::Hk),
    (Exchange::Sse, Market::Sh),
    (Exchange::Szse, Market::Sz),
];

const KL_TYPES: &[(KlType, VendorKlType)] = mirrored!(KlType => VendorKlType:
    None, K1m, K3m, K5m, K15m, K30m, K60m, Day, Week, Month, Quarter, Year,
);

const FINANCIAL_QUARTERS: &[(FinancialQuarter, VendorFinancialQuarter)] =
    mirrored!(FinancialQuarter => VendorFinancialQuarter:
        None, Annual, FirstQuarter, Interim, ThirdQuarter, MostRecentQuarter,
    );

const RELATIVE_POSITIONS: &[(RelativePosition, VendorRelativePosition)] =
    mirrored!(RelativePosition => VendorRelativePosition:
        None, More, Less, CrossUp, CrossDown,
    );

const SIMPLE_FIELDS: &[(ScreenerField, StockField)] = mirrored!(Simple(SimpleField) => StockField:
    CurPrice, CurPriceToHighest52WeeksRatio, CurPriceToLowest52WeeksRatio,
    HighPriceToHighest52WeeksRatio, LowPriceToLowest52WeeksRatio, VolumeRatio,
    BidAskRatio, LotPrice, MarketVal, PeAnnual, PeTtm, PbRate, ChangeRate5Min,
    ChangeRateBeginYear, PsTtm, PcfTtm, TotalShare, FloatShare, FloatMarketVal,
);

const ACCUMULATE_FIELDS: &[(ScreenerField, StockField)] = mirrored!(Accumulate(AccumulateField) => StockField:
    ChangeRate, Amplitude, Volume, Turnover, TurnoverRate,
);

const FINANCIAL_FIELDS: &[(ScreenerField, StockField)] = mirrored!(Financial(FinancialField) => StockField:
    NetProfit, NetProfixGrowth, SumOfBusiness, SumOfBusinessGrowth, NetProfitRate,
    GrossProfitRate, DebtAssetRate, ReturnOnEquityRate, Roic, RoaTtm, EbitTtm,
    Ebitda, OperatingMarginTtm, EbitMargin, EbitdaMargin, FinancialCostRate,
    OperatingProfitTtm, ShareholderNetProfitTtm, NetProfitCashCoverTtm,
    CurrentRatio, QuickRatio, CurrentAssetRatio, CurrentDebtRatio, EquityMultiplier,
    PropertyRatio, CashAndCashEquivalents, TotalAssetTurnover, FixedAssetTurnover,
    InventoryTurnover, OperatingCashFlowTtm, AccountsReceivable, EbitGrowthRate,
    OperatingProfitGrowthRate, TotalAssetsGrowthRate,
    ProfitToShareholdersGrowthRate, ProfitBeforeTaxGrowthRate, EpsGrowthRate,
    RoeGrowthRate, RoicGrowthRate, NocfGrowthRate, NocfPerShareGrowthRate,
    OperatingRevenueCashCover, OperatingProfitToTotalProfit, BasicEps, DilutedEps,
    NocfPerShare,
);

const PATTERN_FIELDS: &[(ScreenerField, StockField)] = mirrored!(Pattern(PatternField) => StockField:
    MaAlignmentLong, MaAlignmentShort, EmaAlignmentLong, EmaAlignmentShort,
    RsiGoldCrossLow, RsiDeathCrossHigh, RsiTopDivergence, RsiBottomDivergence,
    KdjGoldCrossLow, KdjDeathCrossHigh, KdjTopDivergence, KdjBottomDivergence,
    MacdGoldCrossLow, MacdDeathCrossHigh, MacdTopDivergence, MacdBottomDivergence,
    BollBreakUpper, BollBreakLower, BollCrossMiddleUp, BollCrossMiddleDown,
);

const INDICATOR_FIELDS: &[(ScreenerField, StockField)] = mirrored!(Indicator(IndicatorField) => StockField:
    Price, Ma5, Ma10, Ma20, Ma30, Ma60, Ma120, Ma250, Rsi, Ema5, Ema10, Ema20,
    Ema30, Ema60, Ema120, Ema250, Value, Ma, Ema, KdjK, KdjD, KdjJ, MacdDiff,
    MacdDea, Macd, BollUpper, BollMiddler, BollLower,
);

// ---------------------------------------------------------------------------
// EnumTable
// ---------------------------------------------------------------------------

/// How much of the vendor enumeration a table must claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Every vendor member has a canonical counterpart.
    Bijective,
    /// Vendor members may be left unclaimed (e.g. the screener's `NONE`).
    Injective,
}

/// One validated family: canonical → vendor and back, both O(1).
#[derive(Debug, Clone)]
pub struct EnumTable<C, V> {
    family: &'static str,
    forward: AHashMap<C, V>,
    reverse: AHashMap<V, C>,
}

impl<C, V> EnumTable<C, V>
where
    C: Copy + Eq + Hash + Debug,
    V: EnumMember,
{
    /// Build a table from explicit pairs, checking it against `domain`.
    pub fn build(
        family: &'static str,
        domain: impl IntoIterator<Item = C>,
        coverage: Coverage,
        pairs: impl IntoIterator<Item = (C, V)>,
    ) -> Result<Self, TranslateError> {
        let invalid = |reason: String| TranslateError::IncompleteMapping { family, reason };

        let mut forward = AHashMap::new();
        let mut reverse = AHashMap::new();
        for (canonical, vendor) in pairs {
            if forward.insert(canonical, vendor).is_some() {
                return Err(invalid(format!("{canonical:?} is mapped twice")));
            }
            if let Some(previous) = reverse.insert(vendor, canonical) {
                return Err(invalid(format!(
                    "{} is claimed by both {previous:?} and {canonical:?}",
                    vendor.name()
                )));
            }
        }

        let mut domain_len = 0;
        for member in domain {
            domain_len += 1;
            if !forward.contains_key(&member) {
                return Err(invalid(format!("{member:?} has no vendor entry")));
            }
        }
        if forward.len() != domain_len {
            return Err(invalid(format!(
                "{} entries for {domain_len} canonical members",
                forward.len()
            )));
        }

        if coverage == Coverage::Bijective
            && let Some(orphan) = V::ALL.iter().find(|v| !reverse.contains_key(*v))
        {
            return Err(invalid(format!("vendor member {} has no canonical entry", orphan.name())));
        }

        Ok(Self { family, forward, reverse })
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn to_vendor(&self, canonical: C) -> Result<V, TranslateError> {
        self.forward.get(&canonical).copied().ok_or_else(|| TranslateError::Unmapped {
            family: self.family,
            member: format!("{canonical:?}"),
        })
    }

    pub fn to_canonical(&self, vendor: V) -> Result<C, TranslateError> {
        self.reverse.get(&vendor).copied().ok_or_else(|| TranslateError::Unmapped {
            family: self.family,
            member: vendor.name().to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

// ---------------------------------------------------------------------------
// EnumTranslator
// ---------------------------------------------------------------------------

/// All enumeration families, validated once at construction.
///
/// Stateless after construction; every method is a pure lookup.
#[derive(Debug, Clone)]
pub struct EnumTranslator {
    markets: EnumTable<Exchange, Market>,
    kl_types: EnumTable<KlType, VendorKlType>,
    financial_quarters: EnumTable<FinancialQuarter, VendorFinancialQuarter>,
    relative_positions: EnumTable<RelativePosition, VendorRelativePosition>,
    stock_fields: EnumTable<ScreenerField, StockField>,
}

impl EnumTranslator {
    pub fn new() -> Result<Self, TranslateError> {
        let screener_pairs = SIMPLE_FIELDS
            .iter()
            .chain(ACCUMULATE_FIELDS)
            .chain(FINANCIAL_FIELDS)
            .chain(PATTERN_FIELDS)
            .chain(INDICATOR_FIELDS)
            .copied();

        Ok(Self {
            markets: EnumTable::build(
                "exchange",
                Exchange::ALL.iter().copied(),
                Coverage::Bijective,
                EXCHANGE_MARKETS.iter().copied(),
            )?,
            kl_types: EnumTable::build(
                "kl type",
                KlType::ALL.iter().copied(),
                Coverage::Bijective,
                KL_TYPES.iter().copied(),
            )?,
            financial_quarters: EnumTable::build(
                "financial quarter",
                FinancialQuarter::ALL.iter().copied(),
                Coverage::Bijective,
                FINANCIAL_QUARTERS.iter().copied(),
            )?,
            relative_positions: EnumTable::build(
                "relative position",
                RelativePosition::ALL.iter().copied(),
                Coverage::Bijective,
                RELATIVE_POSITIONS.iter().copied(),
            )?,
            stock_fields: EnumTable::build(
                "screener field",
                ScreenerField::all(),
                Coverage::Injective,
                screener_pairs,
            )?,
        })
    }

    pub fn exchange_to_market(&self, exchange: Exchange) -> Result<Market, TranslateError> {
        self.markets.to_vendor(exchange)
    }

    pub fn market_to_exchange(&self, market: Market) -> Result<Exchange, TranslateError> {
        self.markets.to_canonical(market)
    }

    pub fn kl_type_to_vendor(&self, kl_type: KlType) -> Result<VendorKlType, TranslateError> {
        self.kl_types.to_vendor(kl_type)
    }

    pub fn kl_type_to_canonical(&self, kl_type: VendorKlType) -> Result<KlType, TranslateError> {
        self.kl_types.to_canonical(kl_type)
    }

    pub fn financial_quarter_to_vendor(
        &self,
        quarter: FinancialQuarter,
    ) -> Result<VendorFinancialQuarter, TranslateError> {
        self.financial_quarters.to_vendor(quarter)
    }

    pub fn financial_quarter_to_canonical(
        &self,
        quarter: VendorFinancialQuarter,
    ) -> Result<FinancialQuarter, TranslateError> {
        self.financial_quarters.to_canonical(quarter)
    }

    pub fn relative_position_to_vendor(
        &self,
        position: RelativePosition,
    ) -> Result<VendorRelativePosition, TranslateError> {
        self.relative_positions.to_vendor(position)
    }

    pub fn relative_position_to_canonical(
        &self,
        position: VendorRelativePosition,
    ) -> Result<RelativePosition, TranslateError> {
        self.relative_positions.to_canonical(position)
    }

    /// Accepts any screener family member (`SimpleField::CurPrice`, ...).
    pub fn stock_field_to_vendor(
        &self,
        field: impl Into<ScreenerField>,
    ) -> Result<StockField, TranslateError> {
        self.stock_fields.to_vendor(field.into())
    }

    pub fn stock_field_to_canonical(&self, field: StockField) -> Result<ScreenerField, TranslateError> {
        self.stock_fields.to_canonical(field)
    }
}
