//! Typed security attributes
//!
//! Every attribute the tools report is declared exactly once in the
//! `security_attributes!` table below: its enum variant, the field on
//! [`SecurityInfo`], the value type and the provider's wire key. Group tables
//! refer to [`Attribute`] variants, so a misspelt attribute is a compile error
//! rather than a silently missing JSON field.

use serde_json::{Map, Value};

/// Conversion from a loosely typed provider value
pub trait AttributeValue: Sized {
    /// Read a value, or `None` when the JSON has the wrong shape
    fn from_json(value: &Value) -> Option<Self>;

    /// Render back to JSON
    fn to_json(&self) -> Value;
}

impl AttributeValue for f64 {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64().filter(|v| v.is_finite())
    }

    fn to_json(&self) -> Value {
        serde_json::Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl AttributeValue for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        // Counts sometimes arrive as floats (`1.5E10`)
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|v| v.is_finite() && v.abs() < 9.0e18)
                .map(|v| v.round() as i64)
        })
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl AttributeValue for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

macro_rules! security_attributes {
    (
        $( $(#[$doc:meta])* $variant:ident => $field:ident : $ty:ty = $key:literal ),+ $(,)?
    ) => {
        /// A reportable security attribute
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Attribute {
            $( $(#[$doc])* $variant, )+
        }

        impl Attribute {
            /// Every declared attribute
            pub const ALL: &'static [Attribute] = &[ $( Attribute::$variant, )+ ];

            /// Wire key used by the provider and in tool output
            pub fn key(self) -> &'static str {
                match self {
                    $( Attribute::$variant => $key, )+
                }
            }
        }

        /// Security attributes, typed
        ///
        /// Absent or malformed provider values are `None`.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct SecurityInfo {
            $( pub $field: Option<$ty>, )+
        }

        impl SecurityInfo {
            /// Build from the provider's flat attribute map
            pub fn from_attributes(map: &Map<String, Value>) -> Self {
                Self {
                    $( $field: map.get($key).and_then(<$ty as AttributeValue>::from_json), )+
                }
            }

            /// JSON value of one attribute, `null` when absent
            pub fn value(&self, attribute: Attribute) -> Value {
                match attribute {
                    $( Attribute::$variant => self
                        .$field
                        .as_ref()
                        .map_or(Value::Null, AttributeValue::to_json), )+
                }
            }
        }
    };
}

security_attributes! {
    /// Discriminant between funds and equities
    QuoteType => quote_type: String = "quoteType",
    Symbol => symbol: String = "symbol",
    ShortName => short_name: String = "shortName",
    LongName => long_name: String = "longName",
    LongBusinessSummary => long_business_summary: String = "longBusinessSummary",

    // Valuation
    CurrentPrice => current_price: f64 = "currentPrice",
    TargetMeanPrice => target_mean_price: f64 = "targetMeanPrice",
    TargetHighPrice => target_high_price: f64 = "targetHighPrice",
    TargetLowPrice => target_low_price: f64 = "targetLowPrice",
    MarketCap => market_cap: i64 = "marketCap",
    EnterpriseValue => enterprise_value: i64 = "enterpriseValue",
    TrailingPe => trailing_pe: f64 = "trailingPE",
    ForwardPe => forward_pe: f64 = "forwardPE",
    PriceToBook => price_to_book: f64 = "priceToBook",
    PriceToSalesTrailing12Months => price_to_sales_trailing_12_months: f64 = "priceToSalesTrailing12Months",
    TrailingPegRatio => trailing_peg_ratio: f64 = "trailingPegRatio",

    // Performance
    TotalRevenue => total_revenue: i64 = "totalRevenue",
    NetIncomeToCommon => net_income_to_common: i64 = "netIncomeToCommon",
    GrossProfits => gross_profits: i64 = "grossProfits",
    GrossMargins => gross_margins: f64 = "grossMargins",
    OperatingMargins => operating_margins: f64 = "operatingMargins",
    EbitdaMargins => ebitda_margins: f64 = "ebitdaMargins",
    ProfitMargins => profit_margins: f64 = "profitMargins",
    EarningsGrowth => earnings_growth: f64 = "earningsGrowth",
    RevenueGrowth => revenue_growth: f64 = "revenueGrowth",
    ReturnOnAssets => return_on_assets: f64 = "returnOnAssets",
    ReturnOnEquity => return_on_equity: f64 = "returnOnEquity",
    TrailingEps => trailing_eps: f64 = "trailingEps",
    ForwardEps => forward_eps: f64 = "forwardEps",
    EpsCurrentYear => eps_current_year: f64 = "epsCurrentYear",

    // Health
    TotalCash => total_cash: i64 = "totalCash",
    TotalCashPerShare => total_cash_per_share: f64 = "totalCashPerShare",
    TotalDebt => total_debt: i64 = "totalDebt",
    DebtToEquity => debt_to_equity: f64 = "debtToEquity",
    CurrentRatio => current_ratio: f64 = "currentRatio",
    QuickRatio => quick_ratio: f64 = "quickRatio",
    FreeCashflow => free_cashflow: i64 = "freeCashflow",
    OperatingCashflow => operating_cashflow: i64 = "operatingCashflow",

    // Trading
    Volume => volume: i64 = "volume",
    RegularMarketVolume => regular_market_volume: i64 = "regularMarketVolume",
    AverageVolume => average_volume: i64 = "averageVolume",
    AverageVolume10Days => average_volume_10_days: i64 = "averageVolume10days",
    AverageDailyVolume10Day => average_daily_volume_10_day: i64 = "averageDailyVolume10Day",
    AverageDailyVolume3Month => average_daily_volume_3_month: i64 = "averageDailyVolume3Month",
    Bid => bid: f64 = "bid",
    Ask => ask: f64 = "ask",
    BidSize => bid_size: i64 = "bidSize",
    AskSize => ask_size: i64 = "askSize",
    RegularMarketPrice => regular_market_price: f64 = "regularMarketPrice",
    NavPrice => nav_price: f64 = "navPrice",
    Beta => beta: f64 = "beta",
    FiftyTwoWeekLow => fifty_two_week_low: f64 = "fiftyTwoWeekLow",
    FiftyTwoWeekHigh => fifty_two_week_high: f64 = "fiftyTwoWeekHigh",
    FiftyTwoWeekRange => fifty_two_week_range: String = "fiftyTwoWeekRange",
    FiftyTwoWeekChange => fifty_two_week_change: f64 = "52WeekChange",
    FiftyTwoWeekChangePercent => fifty_two_week_change_percent: f64 = "fiftyTwoWeekChangePercent",
    FiftyDayAverage => fifty_day_average: f64 = "fiftyDayAverage",
    TwoHundredDayAverage => two_hundred_day_average: f64 = "twoHundredDayAverage",
    RegularMarketChange => regular_market_change: f64 = "regularMarketChange",
    RegularMarketChangePercent => regular_market_change_percent: f64 = "regularMarketChangePercent",
    RecommendationMean => recommendation_mean: f64 = "recommendationMean",
    RecommendationKey => recommendation_key: String = "recommendationKey",
    NumberOfAnalystOpinions => number_of_analyst_opinions: i64 = "numberOfAnalystOpinions",

    // Dividends
    DividendRate => dividend_rate: f64 = "dividendRate",
    DividendYield => dividend_yield: f64 = "dividendYield",
    PayoutRatio => payout_ratio: f64 = "payoutRatio",
    TrailingAnnualDividendRate => trailing_annual_dividend_rate: f64 = "trailingAnnualDividendRate",
    TrailingAnnualDividendYield => trailing_annual_dividend_yield: f64 = "trailingAnnualDividendYield",
    /// Unix seconds
    ExDividendDate => ex_dividend_date: i64 = "exDividendDate",

    // Funds
    TotalAssets => total_assets: i64 = "totalAssets",
    NetAssets => net_assets: i64 = "netAssets",
    NetExpenseRatio => net_expense_ratio: f64 = "netExpenseRatio",
    YtdReturn => ytd_return: f64 = "ytdReturn",
    ThreeYearAverageReturn => three_year_average_return: f64 = "threeYearAverageReturn",
    FiveYearAverageReturn => five_year_average_return: f64 = "fiveYearAverageReturn",
    TrailingThreeMonthReturns => trailing_three_month_returns: f64 = "trailingThreeMonthReturns",
    Beta3Year => beta_3_year: f64 = "beta3Year",
    Category => category: String = "category",
    FundFamily => fund_family: String = "fundFamily",
    /// Unix seconds
    FundInceptionDate => fund_inception_date: i64 = "fundInceptionDate",
}

impl SecurityInfo {
    /// Classify the security by its quote type
    pub fn kind(&self) -> SecurityKind {
        SecurityKind::from_quote_type(self.quote_type.as_deref())
    }
}

/// Broad security classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityKind {
    Equity,
    Etf,
    MutualFund,
}

impl SecurityKind {
    /// Classify from a provider quote type; anything unrecognised is an equity
    pub fn from_quote_type(quote_type: Option<&str>) -> Self {
        match quote_type.map(str::to_ascii_uppercase).as_deref() {
            Some("ETF") => SecurityKind::Etf,
            Some("MUTUALFUND") => SecurityKind::MutualFund,
            _ => SecurityKind::Equity,
        }
    }

    /// Funds are reported with fund groups, everything else with equity groups
    pub fn is_fund(self) -> bool {
        matches!(self, SecurityKind::Etf | SecurityKind::MutualFund)
    }

    /// Label reported as `stock_type`
    pub fn label(self) -> &'static str {
        match self {
            SecurityKind::Equity => "EQUITY",
            SecurityKind::Etf => "ETF",
            SecurityKind::MutualFund => "MUTUALFUND",
        }
    }
}

/// A named group of attributes reported together
#[derive(Debug, Clone, Copy)]
pub struct AttributeGroup {
    pub name: &'static str,
    pub attributes: &'static [Attribute],
}

impl AttributeGroup {
    /// Project `info` onto this group, keeping declaration order
    ///
    /// Absent attributes are reported as `null` so every group has a fixed
    /// shape.
    pub fn project(&self, info: &SecurityInfo) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|attribute| (attribute.key().to_string(), info.value(*attribute)))
            .collect()
    }
}
