//! Financial statement line items

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A reported statement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItem {
    TotalAssets,
    StockholdersEquity,
    WorkingCapital,
    CashAndCashEquivalents,
    TotalDebt,
    NetPpe,
    OperatingCashFlow,
    FreeCashFlow,
    CapitalExpenditure,
    CashDividendsPaid,
    TotalRevenue,
    GrossProfit,
    OperatingIncome,
    NetIncome,
    CostOfRevenue,
    ResearchAndDevelopment,
}

impl LineItem {
    /// Field name in the fundamentals timeseries, without the period prefix
    pub fn timeseries_name(self) -> &'static str {
        match self {
            LineItem::TotalAssets => "TotalAssets",
            LineItem::StockholdersEquity => "StockholdersEquity",
            LineItem::WorkingCapital => "WorkingCapital",
            LineItem::CashAndCashEquivalents => "CashAndCashEquivalents",
            LineItem::TotalDebt => "TotalDebt",
            LineItem::NetPpe => "NetPPE",
            LineItem::OperatingCashFlow => "OperatingCashFlow",
            LineItem::FreeCashFlow => "FreeCashFlow",
            LineItem::CapitalExpenditure => "CapitalExpenditure",
            LineItem::CashDividendsPaid => "CashDividendsPaid",
            LineItem::TotalRevenue => "TotalRevenue",
            LineItem::GrossProfit => "GrossProfit",
            LineItem::OperatingIncome => "OperatingIncome",
            LineItem::NetIncome => "NetIncome",
            LineItem::CostOfRevenue => "CostOfRevenue",
            LineItem::ResearchAndDevelopment => "ResearchAndDevelopment",
        }
    }

    /// Human readable label used as the output key
    pub fn label(self) -> &'static str {
        match self {
            LineItem::TotalAssets => "Total Assets",
            LineItem::StockholdersEquity => "Stockholders Equity",
            LineItem::WorkingCapital => "Working Capital",
            LineItem::CashAndCashEquivalents => "Cash And Cash Equivalents",
            LineItem::TotalDebt => "Total Debt",
            LineItem::NetPpe => "Net PPE",
            LineItem::OperatingCashFlow => "Operating Cash Flow",
            LineItem::FreeCashFlow => "Free Cash Flow",
            LineItem::CapitalExpenditure => "Capital Expenditure",
            LineItem::CashDividendsPaid => "Cash Dividends Paid",
            LineItem::TotalRevenue => "Total Revenue",
            LineItem::GrossProfit => "Gross Profit",
            LineItem::OperatingIncome => "Operating Income",
            LineItem::NetIncome => "Net Income",
            LineItem::CostOfRevenue => "Cost Of Revenue",
            LineItem::ResearchAndDevelopment => "Research And Development",
        }
    }
}

/// Which statement to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Annual balance sheet
    BalanceSheet,
    /// Annual cash flow statement
    CashFlow,
    /// Quarterly income statement
    QuarterlyIncome,
    /// Annual income statement
    AnnualIncome,
}

const BALANCE_SHEET_ITEMS: &[LineItem] = &[
    LineItem::TotalAssets,
    LineItem::StockholdersEquity,
    LineItem::WorkingCapital,
    LineItem::CashAndCashEquivalents,
    LineItem::TotalDebt,
    LineItem::NetPpe,
];

const CASH_FLOW_ITEMS: &[LineItem] = &[
    LineItem::OperatingCashFlow,
    LineItem::FreeCashFlow,
    LineItem::CapitalExpenditure,
    LineItem::CashDividendsPaid,
];

const INCOME_ITEMS: &[LineItem] = &[
    LineItem::TotalRevenue,
    LineItem::GrossProfit,
    LineItem::OperatingIncome,
    LineItem::NetIncome,
    LineItem::CostOfRevenue,
    LineItem::ResearchAndDevelopment,
];

impl StatementKind {
    /// Line items reported for this statement, in output order
    pub fn line_items(self) -> &'static [LineItem] {
        match self {
            StatementKind::BalanceSheet => BALANCE_SHEET_ITEMS,
            StatementKind::CashFlow => CASH_FLOW_ITEMS,
            StatementKind::QuarterlyIncome | StatementKind::AnnualIncome => INCOME_ITEMS,
        }
    }

    /// Period prefix of the timeseries field names
    pub fn frequency(self) -> &'static str {
        match self {
            StatementKind::QuarterlyIncome => "quarterly",
            _ => "annual",
        }
    }

    /// Full timeseries field name for `item`
    pub fn series_name(self, item: LineItem) -> String {
        format!("{}{}", self.frequency(), item.timeseries_name())
    }

    /// Resolve a timeseries field name back to a line item of this statement
    pub fn line_item_for(self, series: &str) -> Option<LineItem> {
        let name = series.strip_prefix(self.frequency())?;
        self.line_items()
            .iter()
            .copied()
            .find(|item| item.timeseries_name() == name)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::BalanceSheet => "balance sheet",
            StatementKind::CashFlow => "cash flow",
            StatementKind::QuarterlyIncome => "quarterly income statement",
            StatementKind::AnnualIncome => "financials",
        })
    }
}

/// Reported values of one statement, keyed by line item then period end
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatement {
    kind: StatementKind,
    items: HashMap<LineItem, BTreeMap<NaiveDate, f64>>,
}

impl FinancialStatement {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            items: HashMap::new(),
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Record the value reported for `item` at period end `date`
    pub fn insert(&mut self, item: LineItem, date: NaiveDate, value: f64) {
        self.items.entry(item).or_default().insert(date, value);
    }

    /// Values for one line item, oldest period first
    pub fn get(&self, item: LineItem) -> Option<&BTreeMap<NaiveDate, f64>> {
        self.items.get(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(BTreeMap::is_empty)
    }

    /// Render the statement's line items as `{label: {date: value}}`
    ///
    /// Periods are listed newest first. Items the provider did not report
    /// are `null`.
    pub fn to_json(&self) -> Map<String, Value> {
        self.kind
            .line_items()
            .iter()
            .map(|item| {
                let value = self.get(*item).map_or(Value::Null, |periods| {
                    let by_date: Map<String, Value> = periods
                        .iter()
                        .rev()
                        .map(|(date, value)| {
                            let number = serde_json::Number::from_f64(*value)
                                .map_or(Value::Null, Value::Number);
                            (date.format("%Y-%m-%d").to_string(), number)
                        })
                        .collect();
                    Value::Object(by_date)
                });
                (item.label().to_string(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_series_names() {
        assert_eq!(
            StatementKind::BalanceSheet.series_name(LineItem::NetPpe),
            "annualNetPPE"
        );
        assert_eq!(
            StatementKind::QuarterlyIncome.series_name(LineItem::TotalRevenue),
            "quarterlyTotalRevenue"
        );
        assert_eq!(
            StatementKind::CashFlow.line_item_for("annualFreeCashFlow"),
            Some(LineItem::FreeCashFlow)
        );
        assert_eq!(StatementKind::CashFlow.line_item_for("annualTotalAssets"), None);
        assert_eq!(
            StatementKind::AnnualIncome.line_item_for("quarterlyNetIncome"),
            None
        );
    }

    #[test]
    fn test_statement_json_newest_first() {
        let mut statement = FinancialStatement::new(StatementKind::CashFlow);
        assert!(statement.is_empty());

        statement.insert(LineItem::FreeCashFlow, date("2022-09-30"), 111.0);
        statement.insert(LineItem::FreeCashFlow, date("2023-09-30"), 99.5);
        assert!(!statement.is_empty());

        let rendered = Value::Object(statement.to_json());
        assert_eq!(
            rendered["Free Cash Flow"],
            json!({"2023-09-30": 99.5, "2022-09-30": 111.0})
        );
        assert_eq!(rendered["Operating Cash Flow"], Value::Null);

        let first_date = rendered["Free Cash Flow"]
            .as_object()
            .and_then(|m| m.keys().next().cloned());
        assert_eq!(first_date.as_deref(), Some("2023-09-30"));
    }
}
