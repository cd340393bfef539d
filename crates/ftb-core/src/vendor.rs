//! Futu OpenAPI native enumerations.
//!
//! These mirror the vendor SDK's own identifiers. Each member's
//! [`EnumMember::name`] is the string the vendor expects on the wire
//! (`"HK"`, `"K_DAY"`, `"CUR_PRICE"`), so request builders can pass it
//! through untouched.

use crate::types::enums::{EnumMember, closed_enum};

closed_enum! {
    /// Futu market prefix of a security code (`HK.00700`).
    pub enum Market {
        Hk => "HK",
        Us => "US",
        Sh => "SH",
        Sz => "SZ",
    }
}

impl Market {
    /// `Qot_Common.QotMarket` protocol value for this market's securities.
    pub fn qot_market(self) -> i32 {
        match self {
            Self::Hk => 1,
            Self::Us => 11,
            Self::Sh => 21,
            Self::Sz => 22,
        }
    }

    /// Parse a market prefix as it appears inside a vendor code.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::from_name(prefix)
    }
}

closed_enum! {
    /// Futu `KLType`.
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
    /// Futu `FinancialQuarter`.
    pub enum FinancialQuarter {
        None => "NONE",
        Annual => "ANNUAL",
        FirstQuarter => "FIRST_QUARTER",
        Interim => "INTERIM",
        ThirdQuarter => "THIRD_QUARTER",
        MostRecentQuarter => "MOST_RECENT_QUARTER",
    }
}

closed_enum! {
    /// Futu `RelativePosition`.
    pub enum RelativePosition {
        None => "NONE",
        More => "MORE",
        Less => "LESS",
        CrossUp => "CROSS_UP",
        CrossDown => "CROSS_DOWN",
    }
}

closed_enum! {
    /// Futu `StockField`: every property the stock screener accepts.
    pub enum StockField {
        None => "NONE",
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
        ChangeRate => "CHANGE_RATE",
        Amplitude => "AMPLITUDE",
        Volume => "VOLUME",
        Turnover => "TURNOVER",
        TurnoverRate => "TURNOVER_RATE",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_prefix() {
        assert_eq!(Market::from_prefix("SH"), Some(Market::Sh));
        assert_eq!(Market::from_prefix("sh"), None);
        assert_eq!(Market::Us.qot_market(), 11);
    }

    #[test]
    fn stock_field_wire_names() {
        assert_eq!(StockField::CurPrice.name(), "CUR_PRICE");
        assert_eq!(StockField::from_name("BOLL_MIDDLER"), Some(StockField::BollMiddler));
        assert_eq!(StockField::None.to_string(), "NONE");
    }
}
