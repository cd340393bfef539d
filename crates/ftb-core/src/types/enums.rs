//! Canonical enumerations used throughout the futu bridge.
//!
//! These are the system's own identities, independent of any vendor. Each
//! closed family implements [`EnumMember`] so translation tables can be
//! validated against the full member list at construction time.
//!
//! [`Exchange`] and [`Product`] appear inside persisted contract records and
//! therefore also derive `rkyv::Archive` for the binary snapshot store.

use std::fmt;
use std::hash::Hash;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// A member of a closed enumeration family with a stable symbolic name.
pub trait EnumMember: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Symbolic name (e.g. `"K_DAY"`); shared by the canonical and vendor side.
    fn name(self) -> &'static str;

    /// Look a member up by its symbolic name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

/// Declare a closed, fieldless enum together with its [`EnumMember`] impl.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::types::enums::EnumMember for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::types::enums::EnumMember::name(*self))
            }
        }
    };
}

pub(crate) use closed_enum;

// ---------------------------------------------------------------------------
// Exchange identifiers
// ---------------------------------------------------------------------------

/// Supported exchanges.
///
/// The serialized form is the identity token used in canonical identity
/// strings (`700.SEHK`, `AAPL.US`). US listings route through `SMART`,
/// whose token is `US`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[repr(u8)]
pub enum Exchange {
    /// Shanghai Stock Exchange.
    #[serde(rename = "SSE")]
    Sse = 0,
    /// Shenzhen Stock Exchange.
    #[serde(rename = "SZSE")]
    Szse = 1,
    /// Stock Exchange of Hong Kong.
    #[serde(rename = "SEHK")]
    Sehk = 2,
    /// US smart routing.
    #[serde(rename = "US")]
    Smart = 3,
}

impl EnumMember for Exchange {
    const ALL: &'static [Self] = &[Self::Sse, Self::Szse, Self::Sehk, Self::Smart];

    fn name(self) -> &'static str {
        match self {
            Self::Sse => "SSE",
            Self::Szse => "SZSE",
            Self::Sehk => "SEHK",
            Self::Smart => "US",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

/// Product (instrument) category of a contract.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Product {
    #[default]
    Equity = 0,
    Futures = 1,
    #[serde(rename = "OPTION")]
    Options = 2,
    Index = 3,
    Forex = 4,
    Spot = 5,
    Etf = 6,
    Bond = 7,
    Warrant = 8,
    Spread = 9,
    Fund = 10,
}

// ---------------------------------------------------------------------------
// Bar interval, report period, comparison
// ---------------------------------------------------------------------------

closed_enum! {
    /// K-line (bar) interval.
    pub enum KlType {
        None => "NONE",
        K1m => "K_1M",
        K3m => "K_3M",
        K5m => "K_5M",
        K15m => "K_15M",
        K30m => "K_30M",
        K60m => "K_60M",
        Day => "K_DAY",
        Week => "K_WEEK",
        Month => "K_MON",
        Quarter => "K_QUARTER",
        Year => "K_YEAR",
    }
}

closed_enum! {
    /// Financial report period used by financial screener properties.
    pub enum FinancialQuarter {
        None => "NONE",
        /// Annual report.
        Annual => "ANNUAL",
        /// Q1 report.
        FirstQuarter => "FIRST_QUARTER",
        /// Half-year (interim) report.
        Interim => "INTERIM",
        /// Q3 report.
        ThirdQuarter => "THIRD_QUARTER",
        /// Most recent quarterly report.
        MostRecentQuarter => "MOST_RECENT_QUARTER",
    }
}

closed_enum! {
    /// Relative position of two indicator series.
    pub enum RelativePosition {
        None => "NONE",
        /// First series above the second.
        More => "MORE",
        /// First series below the second.
        Less => "LESS",
        /// First series crosses the second upwards.
        CrossUp => "CROSS_UP",
        /// First series crosses the second downwards.
        CrossDown => "CROSS_DOWN",
    }
}

// ---------------------------------------------------------------------------
// Screener fields
// ---------------------------------------------------------------------------

closed_enum! {
    /// Simple screener properties (price, valuation, share counts).
    pub enum SimpleField {
        CurPrice => "CUR_PRICE",
        CurPriceToHighest52WeeksRatio => "CUR_PRICE_TO_HIGHEST52_WEEKS_RATIO",
        CurPriceToLowest52WeeksRatio => "CUR_PRICE_TO_LOWEST52_WEEKS_RATIO",
        HighPriceToHighest52WeeksRatio => "HIGH_PRICE_TO_HIGHEST52_WEEKS_RATIO",
        LowPriceToLowest52WeeksRatio => "LOW_PRICE_TO_LOWEST52_WEEKS_RATIO",
        VolumeRatio => "VOLUME_RATIO",
        BidAskRatio => "BID_ASK_RATIO",
        LotPrice => "LOT_PRICE",
        MarketVal => "MARKET_VAL",
        PeAnnual => "PE_ANNUAL",
        PeTtm => "PE_TTM",
        PbRate => "PB_RATE",
        ChangeRate5Min => "CHANGE_RATE_5MIN",
        ChangeRateBeginYear => "CHANGE_RATE_BEGIN_YEAR",
        PsTtm => "PS_TTM",
        PcfTtm => "PCF_TTM",
        TotalShare => "TOTAL_SHARE",
        FloatShare => "FLOAT_SHARE",
        FloatMarketVal => "FLOAT_MARKET_VAL",
    }
}

closed_enum! {
    /// Screener properties accumulated over a trailing day range.
    pub enum AccumulateField {
        ChangeRate => "CHANGE_RATE",
        Amplitude => "AMPLITUDE",
        Volume => "VOLUME",
        Turnover => "TURNOVER",
        TurnoverRate => "TURNOVER_RATE",
    }
}

closed_enum! {
    /// Financial-statement screener properties, read per [`FinancialQuarter`].
    pub enum FinancialField {
        NetProfit => "NET_PROFIT",
        NetProfixGrowth => "NET_PROFIX_GROWTH",
        SumOfBusiness => "SUM_OF_BUSINESS",
        SumOfBusinessGrowth => "SUM_OF_BUSINESS_GROWTH",
        NetProfitRate => "NET_PROFIT_RATE",
        GrossProfitRate => "GROSS_PROFIT_RATE",
        DebtAssetRate => "DEBT_ASSET_RATE",
        ReturnOnEquityRate => "RETURN_ON_EQUITY_RATE",
        Roic => "ROIC",
        RoaTtm => "ROA_TTM",
        EbitTtm => "EBIT_TTM",
        Ebitda => "EBITDA",
        OperatingMarginTtm => "OPERATING_MARGIN_TTM",
        EbitMargin => "EBIT_MARGIN",
        EbitdaMargin => "EBITDA_MARGIN",
        FinancialCostRate => "FINANCIAL_COST_RATE",
        OperatingProfitTtm => "OPERATING_PROFIT_TTM",
        ShareholderNetProfitTtm => "SHAREHOLDER_NET_PROFIT_TTM",
        NetProfitCashCoverTtm => "NET_PROFIT_CASH_COVER_TTM",
        CurrentRatio => "CURRENT_RATIO",
        QuickRatio => "QUICK_RATIO",
        CurrentAssetRatio => "CURRENT_ASSET_RATIO",
        CurrentDebtRatio => "CURRENT_DEBT_RATIO",
        EquityMultiplier => "EQUITY_MULTIPLIER",
        PropertyRatio => "PROPERTY_RATIO",
        CashAndCashEquivalents => "CASH_AND_CASH_EQUIVALENTS",
        TotalAssetTurnover => "TOTAL_ASSET_TURNOVER",
        FixedAssetTurnover => "FIXED_ASSET_TURNOVER",
        InventoryTurnover => "INVENTORY_TURNOVER",
        OperatingCashFlowTtm => "OPERATING_CASH_FLOW_TTM",
        AccountsReceivable => "ACCOUNTS_RECEIVABLE",
        EbitGrowthRate => "EBIT_GROWTH_RATE",
        OperatingProfitGrowthRate => "OPERATING_PROFIT_GROWTH_RATE",
        TotalAssetsGrowthRate => "TOTAL_ASSETS_GROWTH_RATE",
        ProfitToShareholdersGrowthRate => "PROFIT_TO_SHAREHOLDERS_GROWTH_RATE",
        ProfitBeforeTaxGrowthRate => "PROFIT_BEFORE_TAX_GROWTH_RATE",
        EpsGrowthRate => "EPS_GROWTH_RATE",
        RoeGrowthRate => "ROE_GROWTH_RATE",
        RoicGrowthRate => "ROIC_GROWTH_RATE",
        NocfGrowthRate => "NOCF_GROWTH_RATE",
        NocfPerShareGrowthRate => "NOCF_PER_SHARE_GROWTH_RATE",
        OperatingRevenueCashCover => "OPERATING_REVENUE_CASH_COVER",
        OperatingProfitToTotalProfit => "OPERATING_PROFIT_TO_TOTAL_PROFIT",
        BasicEps => "BASIC_EPS",
        DilutedEps => "DILUTED_EPS",
        NocfPerShare => "NOCF_PER_SHARE",
    }
}

closed_enum! {
    /// Technical-pattern screener properties (alignments, crosses, divergences).
    pub enum PatternField {
        MaAlignmentLong => "MA_ALIGNMENT_LONG",
        MaAlignmentShort => "MA_ALIGNMENT_SHORT",
        EmaAlignmentLong => "EMA_ALIGNMENT_LONG",
        EmaAlignmentShort => "EMA_ALIGNMENT_SHORT",
        RsiGoldCrossLow => "RSI_GOLD_CROSS_LOW",
        RsiDeathCrossHigh => "RSI_DEATH_CROSS_HIGH",
        RsiTopDivergence => "RSI_TOP_DIVERGENCE",
        RsiBottomDivergence => "RSI_BOTTOM_DIVERGENCE",
        KdjGoldCrossLow => "KDJ_GOLD_CROSS_LOW",
        KdjDeathCrossHigh => "KDJ_DEATH_CROSS_HIGH",
        KdjTopDivergence => "KDJ_TOP_DIVERGENCE",
        KdjBottomDivergence => "KDJ_BOTTOM_DIVERGENCE",
        MacdGoldCrossLow => "MACD_GOLD_CROSS_LOW",
        MacdDeathCrossHigh => "MACD_DEATH_CROSS_HIGH",
        MacdTopDivergence => "MACD_TOP_DIVERGENCE",
        MacdBottomDivergence => "MACD_BOTTOM_DIVERGENCE",
        BollBreakUpper => "BOLL_BREAK_UPPER",
        BollBreakLower => "BOLL_BREAK_LOWER",
        BollCrossMiddleUp => "BOLL_CROSS_MIDDLE_UP",
        BollCrossMiddleDown => "BOLL_CROSS_MIDDLE_DOWN",
    }
}

closed_enum! {
    /// Technical-indicator screener properties compared by [`RelativePosition`].
    pub enum IndicatorField {
        Price => "PRICE",
        Ma5 => "MA5",
        Ma10 => "MA10",
        Ma20 => "MA20",
        Ma30 => "MA30",
        Ma60 => "MA60",
        Ma120 => "MA120",
        Ma250 => "MA250",
        Rsi => "RSI",
        Ema5 => "EMA5",
        Ema10 => "EMA10",
        Ema20 => "EMA20",
        Ema30 => "EMA30",
        Ema60 => "EMA60",
        Ema120 => "EMA120",
        Ema250 => "EMA250",
        Value => "VALUE",
        Ma => "MA",
        Ema => "EMA",
        KdjK => "KDJ_K",
        KdjD => "KDJ_D",
        KdjJ => "KDJ_J",
        MacdDiff => "MACD_DIFF",
        MacdDea => "MACD_DEA",
        Macd => "MACD",
        BollUpper => "BOLL_UPPER",
        BollMiddler => "BOLL_MIDDLER",
        BollLower => "BOLL_LOWER",
    }
}

/// Any screener property, tagged with the family it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenerField {
    Simple(SimpleField),
    Accumulate(AccumulateField),
    Financial(FinancialField),
    Pattern(PatternField),
    Indicator(IndicatorField),
}

impl ScreenerField {
    /// Every screener property across all families.
    pub fn all() -> impl Iterator<Item = ScreenerField> {
        let simple = SimpleField::ALL.iter().copied().map(Self::Simple);
        let accumulate = AccumulateField::ALL.iter().copied().map(Self::Accumulate);
        let financial = FinancialField::ALL.iter().copied().map(Self::Financial);
        let pattern = PatternField::ALL.iter().copied().map(Self::Pattern);
        let indicator = IndicatorField::ALL.iter().copied().map(Self::Indicator);
        simple.chain(accumulate).chain(financial).chain(pattern).chain(indicator)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Simple(f) => f.name(),
            Self::Accumulate(f) => f.name(),
            Self::Financial(f) => f.name(),
            Self::Pattern(f) => f.name(),
            Self::Indicator(f) => f.name(),
        }
    }

    /// Look a property up by name in any family.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|f| f.name() == name)
    }
}

impl fmt::Display for ScreenerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SimpleField> for ScreenerField {
    fn from(f: SimpleField) -> Self {
        Self::Simple(f)
    }
}

impl From<AccumulateField> for ScreenerField {
    fn from(f: AccumulateField) -> Self {
        Self::Accumulate(f)
    }
}

impl From<FinancialField> for ScreenerField {
    fn from(f: FinancialField) -> Self {
        Self::Financial(f)
    }
}

impl From<PatternField> for ScreenerField {
    fn from(f: PatternField) -> Self {
        Self::Pattern(f)
    }
}

impl From<IndicatorField> for ScreenerField {
    fn from(f: IndicatorField) -> Self {
        Self::Indicator(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_tokens() {
        assert_eq!(Exchange::Sehk.to_string(), "SEHK");
        assert_eq!(Exchange::Smart.to_string(), "US");
        assert_eq!(Exchange::from_name("SZSE"), Some(Exchange::Szse));
        assert_eq!(Exchange::from_name("SMART"), None);
    }

    #[test]
    fn exchange_serde_uses_identity_token() {
        let json = serde_json::to_string(&Exchange::Smart).unwrap();
        assert_eq!(json, "\"US\"");
        let back: Exchange = serde_json::from_str("\"SEHK\"").unwrap();
        assert_eq!(back, Exchange::Sehk);
    }

    #[test]
    fn kltype_names() {
        assert_eq!(KlType::Month.name(), "K_MON");
        assert_eq!(KlType::from_name("K_15M"), Some(KlType::K15m));
        assert_eq!(KlType::ALL.len(), 12);
    }

    #[test]
    fn screener_names_unique_across_families() {
        let mut names: Vec<&str> = ScreenerField::all().map(ScreenerField::name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(
            ScreenerField::from_name("MACD_GOLD_CROSS_LOW"),
            Some(ScreenerField::Pattern(PatternField::MacdGoldCrossLow))
        );
    }

    #[test]
    fn product_serde() {
        assert_eq!(serde_json::to_string(&Product::Etf).unwrap(), "\"ETF\"");
        assert_eq!(Product::default(), Product::Equity);
    }
}
