//! Security information grouped by theme
//!
//! Funds and equities are reported with disjoint sets of groups. Equities also
//! carry statement excerpts and analyst targets; each of those is fetched on
//! its own and a failure only blanks that group.

use super::lookup::{lookup_symbol, no_symbols_message};
use super::news::project_news;
use crate::api::MarketDataProvider;
use crate::error::Result;
use crate::models::{
    AnalystPriceTargets, Attribute as A, AttributeGroup, FinancialStatement, NewsItem,
    SecurityInfo, StatementKind,
};
use finmcp_core::Context;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Attribute groups reported for equities
pub const EQUITY_GROUPS: &[AttributeGroup] = &[
    AttributeGroup {
        name: "core_valuation_metrics",
        attributes: &[
            A::CurrentPrice,
            A::TargetMeanPrice,
            A::TargetHighPrice,
            A::TargetLowPrice,
            A::MarketCap,
            A::EnterpriseValue,
            A::TrailingPe,
            A::ForwardPe,
            A::PriceToBook,
            A::PriceToSalesTrailing12Months,
            A::TrailingPegRatio,
        ],
    },
    AttributeGroup {
        name: "financial_performance",
        attributes: &[
            A::TotalRevenue,
            A::NetIncomeToCommon,
            A::GrossProfits,
            A::GrossMargins,
            A::OperatingMargins,
            A::EbitdaMargins,
            A::ProfitMargins,
            A::EarningsGrowth,
            A::RevenueGrowth,
            A::ReturnOnAssets,
            A::ReturnOnEquity,
            A::TrailingEps,
            A::ForwardEps,
            A::EpsCurrentYear,
        ],
    },
    AttributeGroup {
        name: "financial_health",
        attributes: &[
            A::TotalCash,
            A::TotalCashPerShare,
            A::TotalDebt,
            A::DebtToEquity,
            A::CurrentRatio,
            A::QuickRatio,
            A::FreeCashflow,
            A::OperatingCashflow,
        ],
    },
    AttributeGroup {
        name: "market_data_trading",
        attributes: &[
            A::Volume,
            A::AverageVolume,
            A::Beta,
            A::FiftyTwoWeekLow,
            A::FiftyTwoWeekHigh,
            A::FiftyTwoWeekChange,
            A::FiftyDayAverage,
            A::TwoHundredDayAverage,
            A::RecommendationMean,
            A::RecommendationKey,
            A::NumberOfAnalystOpinions,
        ],
    },
    AttributeGroup {
        name: "dividend_information",
        attributes: &[
            A::DividendRate,
            A::DividendYield,
            A::PayoutRatio,
            A::TrailingAnnualDividendRate,
            A::ExDividendDate,
        ],
    },
];

/// Attribute groups reported for ETFs and mutual funds
pub const FUND_GROUPS: &[AttributeGroup] = &[
    AttributeGroup {
        name: "etf_analysis",
        attributes: &[
            A::TotalAssets,
            A::NetAssets,
            A::NetExpenseRatio,
            A::YtdReturn,
            A::ThreeYearAverageReturn,
            A::FiveYearAverageReturn,
            A::TrailingThreeMonthReturns,
            A::Beta3Year,
            A::DividendYield,
            A::TrailingAnnualDividendYield,
            A::TrailingAnnualDividendRate,
        ],
    },
    AttributeGroup {
        name: "trading_valuation",
        attributes: &[
            A::RegularMarketPrice,
            A::NavPrice,
            A::Volume,
            A::RegularMarketVolume,
            A::AverageVolume,
            A::AverageVolume10Days,
            A::AverageDailyVolume10Day,
            A::AverageDailyVolume3Month,
            A::Bid,
            A::Ask,
            A::BidSize,
            A::AskSize,
        ],
    },
    AttributeGroup {
        name: "price_movement",
        attributes: &[
            A::FiftyTwoWeekLow,
            A::FiftyTwoWeekHigh,
            A::FiftyTwoWeekRange,
            A::FiftyTwoWeekChangePercent,
            A::FiftyDayAverage,
            A::TwoHundredDayAverage,
            A::RegularMarketChange,
            A::RegularMarketChangePercent,
        ],
    },
    AttributeGroup {
        name: "fund_information",
        attributes: &[
            A::Category,
            A::FundFamily,
            A::LongBusinessSummary,
            A::FundInceptionDate,
            A::ShortName,
            A::LongName,
            A::Symbol,
        ],
    },
];

/// Outcome of fetching one optional part of a report
#[derive(Debug, Clone, PartialEq)]
pub enum SubRecord<T> {
    Present(T),
    /// The provider has nothing for this symbol
    Absent,
    /// The fetch failed; the reason has been logged
    Failed(String),
}

impl<T> SubRecord<T> {
    /// Classify a fetch result, logging failures against `ctx`
    pub fn from_result(result: Result<Option<T>>, what: &str, symbol: &str, ctx: &Context) -> Self {
        match result {
            Ok(Some(value)) => SubRecord::Present(value),
            Ok(None) => SubRecord::Absent,
            Err(e) => {
                warn!(parent: ctx.span(), symbol, record = what, error = %e, "could not fetch");
                SubRecord::Failed(e.to_string())
            }
        }
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            SubRecord::Present(value) => Some(value),
            SubRecord::Absent | SubRecord::Failed(_) => None,
        }
    }
}

/// Optional equity records fetched next to the attributes
struct EquityRecords {
    balance_sheet: SubRecord<FinancialStatement>,
    cash_flow: SubRecord<FinancialStatement>,
    quarterly_income: SubRecord<FinancialStatement>,
    price_targets: SubRecord<AnalystPriceTargets>,
    financials: SubRecord<FinancialStatement>,
}

impl EquityRecords {
    async fn fetch(provider: &dyn MarketDataProvider, symbol: &str, ctx: &Context) -> Self {
        let statement = |kind: StatementKind| async move {
            SubRecord::from_result(
                provider.financial_statement(symbol, kind).await,
                &kind.to_string(),
                symbol,
                ctx,
            )
        };

        let balance_sheet = statement(StatementKind::BalanceSheet).await;
        let cash_flow = statement(StatementKind::CashFlow).await;
        let quarterly_income = statement(StatementKind::QuarterlyIncome).await;
        let price_targets = SubRecord::from_result(
            provider.analyst_price_targets(symbol).await,
            "analyst price targets",
            symbol,
            ctx,
        );
        let financials = statement(StatementKind::AnnualIncome).await;

        Self {
            balance_sheet,
            cash_flow,
            quarterly_income,
            price_targets,
            financials,
        }
    }
}

/// Grouped security information for `symbol` as compact JSON
///
/// When the provider knows nothing about `symbol` it is treated as a company
/// name: the best search match is tried once instead.
pub async fn security_info_report(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    news_count: usize,
    ctx: &Context,
) -> Result<String> {
    let (symbol, info) = match provider.security_info(symbol).await? {
        Some(info) => (symbol.to_string(), info),
        None => {
            warn!(parent: ctx.span(), symbol, "no info found, attempting symbol lookup");
            let corrected = match lookup_symbol(provider, symbol, ctx).await {
                Ok(Some(corrected)) => corrected,
                Ok(None) => return Ok(unable_to_find(symbol, &no_symbols_message(symbol))),
                Err(e) => {
                    return Ok(unable_to_find(symbol, &format!("Error looking up symbol: {e}")));
                }
            };
            match provider.security_info(&corrected).await? {
                Some(info) => {
                    info!(parent: ctx.span(), symbol = %corrected, "found corrected symbol");
                    ctx.record_symbol(&corrected);
                    (corrected, info)
                }
                None => return Ok(unable_to_find(symbol, &corrected)),
            }
        }
    };

    let kind = info.kind();
    let mut report = Map::new();
    report.insert("stock_type".to_string(), Value::from(kind.label()));

    if kind.is_fund() {
        insert_groups(&mut report, FUND_GROUPS, &info);
    } else {
        let records = EquityRecords::fetch(provider, &symbol, ctx).await;
        insert_groups(&mut report, EQUITY_GROUPS, &info);
        insert_statement(&mut report, "balance_sheet_essentials", &records.balance_sheet);
        insert_statement(&mut report, "income_statement_key_items", &records.financials);
        insert_statement(&mut report, "quarterly_income_key_items", &records.quarterly_income);
        insert_statement(&mut report, "cash_flow_highlights", &records.cash_flow);
        report.insert(
            "analyst_price_targets".to_string(),
            records
                .price_targets
                .present()
                .map(serde_json::to_value)
                .transpose()?
                .unwrap_or(Value::Null),
        );
    }

    let news = SubRecord::from_result(
        provider.news(&symbol, news_count).await.map(Some),
        "news",
        &symbol,
        ctx,
    );
    let news: Vec<NewsItem> = news
        .present()
        .map_or_else(Vec::new, |items| project_news(items));
    report.insert("stock_news".to_string(), serde_json::to_value(news)?);

    info!(parent: ctx.span(), symbol, stock_type = kind.label(), "retrieved stock info");
    Ok(serde_json::to_string(&Value::Object(report))?)
}

fn unable_to_find(symbol: &str, detail: &str) -> String {
    format!("Unable to find valid information for '{symbol}'. Symbol lookup returned: {detail}")
}

fn insert_groups(report: &mut Map<String, Value>, groups: &[AttributeGroup], info: &SecurityInfo) {
    for group in groups {
        report.insert(group.name.to_string(), Value::Object(group.project(info)));
    }
}

fn insert_statement(
    report: &mut Map<String, Value>,
    name: &str,
    statement: &SubRecord<FinancialStatement>,
) {
    let items = statement
        .present()
        .map(FinancialStatement::to_json)
        .unwrap_or_default();
    report.insert(name.to_string(), Value::Object(items));
}
