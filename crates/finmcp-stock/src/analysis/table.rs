//! Price table with derived columns and markdown rendering

use crate::error::{Result, StockError};
use crate::models::{Interval, PriceBar};
use comfy_table::Table;
use comfy_table::presets::ASCII_MARKDOWN;

/// Decimal places used for indicator values
pub const INDICATOR_PRECISION: usize = 4;
/// Decimal places used for prices
pub const PRICE_PRECISION: usize = 2;

/// A derived column aligned to the table's rows
///
/// `None` marks rows where the value is undefined (indicator warm-up).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub precision: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
            precision: INDICATOR_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Whether at least one row holds a finite value
    pub fn has_valid_value(&self) -> bool {
        self.values.iter().flatten().any(|v| v.is_finite())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Price bars plus joined columns, one row per bar
#[derive(Debug, Clone)]
pub struct PriceTable {
    bars: Vec<PriceBar>,
    columns: Vec<Column>,
    intraday: bool,
}

impl PriceTable {
    pub fn new(bars: Vec<PriceBar>, interval: Interval) -> Self {
        Self {
            bars,
            columns: Vec::new(),
            intraday: interval.is_intraday(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column
    ///
    /// Rows are never added, dropped or reordered: a column whose length
    /// differs from the table is rejected.
    pub fn join(&mut self, column: Column) -> Result<()> {
        if column.len() != self.bars.len() {
            return Err(StockError::IndicatorError(format!(
                "column {} has {} values for {} rows",
                column.name,
                column.len(),
                self.bars.len()
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Render as a markdown table
    pub fn to_markdown(&self) -> String {
        let mut header = vec!["Date", "Open", "High", "Low", "Close", "Volume"];
        header.extend(self.columns.iter().map(|c| c.name.as_str()));

        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN).set_header(header);

        let date_format = if self.intraday {
            "%Y-%m-%d %H:%M:%S%:z"
        } else {
            "%Y-%m-%d"
        };

        for (row, bar) in self.bars.iter().enumerate() {
            let mut cells = vec![
                bar.timestamp.format(date_format).to_string(),
                format_value(Some(bar.open), PRICE_PRECISION),
                format_value(Some(bar.high), PRICE_PRECISION),
                format_value(Some(bar.low), PRICE_PRECISION),
                format_value(Some(bar.close), PRICE_PRECISION),
                bar.volume.to_string(),
            ];
            cells.extend(
                self.columns
                    .iter()
                    .map(|c| format_value(c.values[row], c.precision)),
            );
            table.add_row(cells);
        }

        table.to_string()
    }
}

fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.precision$}"),
        _ => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    /// Daily bars with closes `base, base + 1, ...`
    pub(crate) fn daily_bars(count: usize, base: f64) -> Vec<PriceBar> {
        let start = DateTime::<Utc>::from_timestamp(1_704_153_600, 0).unwrap();
        (0..count)
            .map(|i| {
                let close = base + i as f64;
                PriceBar {
                    timestamp: (start + Duration::days(i as i64)).fixed_offset(),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000 + i as u64,
                }
            })
            .collect()
    }

    #[test]
    fn test_join_rejects_length_mismatch() {
        let mut table = PriceTable::new(daily_bars(3, 10.0), Interval::OneDay);
        let err = table
            .join(Column::new("X", vec![Some(1.0), None]))
            .unwrap_err();
        assert!(matches!(err, StockError::IndicatorError(_)));
        assert!(table.columns().is_empty());

        table
            .join(Column::new("X", vec![Some(1.0), None, Some(2.0)]))
            .unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.column("X").is_some());
    }

    #[test]
    fn test_markdown_shape() {
        let mut table = PriceTable::new(daily_bars(4, 100.0), Interval::OneDay);
        table
            .join(Column::new("RSI", vec![None, None, Some(55.123_456), Some(60.0)]))
            .unwrap();

        let markdown = table.to_markdown();
        let lines: Vec<&str> = markdown.lines().collect();

        // header, separator, one line per bar
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Date"));
        assert!(lines[0].contains("RSI"));
        assert!(lines[2].contains("2024-01-02"));
        assert!(lines[2].contains("100.00"));
        assert!(lines[4].contains("55.1235"));
        assert!(lines.iter().all(|l| l.starts_with('|')));
    }

    #[test]
    fn test_intraday_dates_include_time() {
        let table = PriceTable::new(daily_bars(1, 10.0), Interval::FiveMinutes);
        assert!(table.to_markdown().contains("2024-01-02 00:00:00+00:00"));
    }

    #[test]
    fn test_intraday_dates_keep_exchange_offset() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let mut bars = daily_bars(1, 10.0);
        // 2024-01-02 14:30 UTC is the New York open
        bars[0].timestamp = DateTime::<Utc>::from_timestamp(1_704_205_800, 0)
            .unwrap()
            .with_timezone(&eastern);

        let markdown = PriceTable::new(bars.clone(), Interval::FiveMinutes).to_markdown();
        assert!(markdown.contains("2024-01-02 09:30:00-05:00"));

        let daily = PriceTable::new(bars, Interval::OneDay).to_markdown();
        assert!(daily.contains("| 2024-01-02 "));
    }

    #[test]
    fn test_column_validity() {
        assert!(!Column::new("A", vec![None, Some(f64::NAN)]).has_valid_value());
        assert!(Column::new("B", vec![None, Some(1.0)]).has_valid_value());
    }
}
