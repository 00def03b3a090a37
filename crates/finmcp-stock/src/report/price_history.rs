//! Price history with indicator columns

use super::NO_DATA;
use crate::analysis::indicators::{
    self, BBANDS_PERIOD, BBANDS_STD_DEV, MACD_FAST, MACD_SIGNAL, MACD_SLOW, RSI_PERIOD,
};
use crate::analysis::rolling::{SUPPORT_RESISTANCE_WINDOW, support_resistance};
use crate::analysis::{Column, PriceTable};
use crate::api::MarketDataProvider;
use crate::error::Result;
use crate::models::{Interval, Period, PriceBar};
use finmcp_core::Context;
use tracing::{info, warn};

/// Fetch bars for `symbol` and render them with indicators as markdown
pub async fn price_history_report(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    period: Period,
    interval: Interval,
    ctx: &Context,
) -> Result<String> {
    let bars = provider.price_history(symbol, period, interval).await?;
    if bars.is_empty() {
        info!(parent: ctx.span(), symbol, "no price history data available");
        return Ok(NO_DATA.to_string());
    }

    let table = build_price_table(bars, interval, ctx);
    info!(
        parent: ctx.span(),
        symbol,
        %period,
        %interval,
        rows = table.len(),
        columns = table.columns().len(),
        "retrieved price history"
    );
    Ok(table.to_markdown())
}

/// Join RSI, MACD, Bollinger Bands and support/resistance onto `bars`
///
/// An indicator that cannot be computed is left out with a warning; the
/// others and the bars themselves are unaffected.
pub fn build_price_table(bars: Vec<PriceBar>, interval: Interval, ctx: &Context) -> PriceTable {
    let mut table = PriceTable::new(bars, interval);
    let closes = table.closes();

    join_indicator(&mut table, "RSI", indicators::rsi(&closes, RSI_PERIOD), ctx);
    join_indicator(
        &mut table,
        "MACD",
        indicators::macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        ctx,
    );
    join_indicator(
        &mut table,
        "Bollinger Bands",
        indicators::bollinger_bands(&closes, BBANDS_PERIOD, BBANDS_STD_DEV),
        ctx,
    );

    let levels = support_resistance(&closes, SUPPORT_RESISTANCE_WINDOW);
    join_indicator(&mut table, "Support/Resistance", Ok(levels.into()), ctx);

    table
}

fn join_indicator(
    table: &mut PriceTable,
    indicator: &str,
    computed: Result<Vec<Column>>,
    ctx: &Context,
) {
    let columns = match computed {
        Ok(columns) if columns.is_empty() => {
            warn!(
                parent: ctx.span(),
                indicator,
                rows = table.len(),
                "not enough data, indicator omitted"
            );
            return;
        }
        Ok(columns) => columns,
        Err(e) => {
            warn!(parent: ctx.span(), indicator, error = %e, "indicator failed, omitted");
            return;
        }
    };

    for column in columns {
        if !column.has_valid_value() {
            warn!(
                parent: ctx.span(),
                indicator,
                column = %column.name,
                "column has no valid values, omitted"
            );
            continue;
        }
        if let Err(e) = table.join(column) {
            warn!(parent: ctx.span(), indicator, error = %e, "column rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::table::tests::daily_bars;
    use crate::api::MockMarketDataProvider;
    use crate::error::StockError;

    fn provider_with(bars: Vec<PriceBar>) -> MockMarketDataProvider {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_history()
            .withf(|symbol, period, interval| {
                symbol == "AAPL" && *period == Period::OneWeek && *interval == Interval::OneDay
            })
            .times(1)
            .returning(move |_, _, _| Ok(bars.clone()));
        provider
    }

    fn column_names(table: &PriceTable) -> Vec<&str> {
        table.columns().iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_five_daily_bars() {
        let provider = provider_with(daily_bars(5, 100.0));
        let ctx = Context::detached();

        let markdown =
            price_history_report(&provider, "AAPL", Period::OneWeek, Interval::OneDay, &ctx)
                .await
                .unwrap();

        let lines: Vec<&str> = markdown.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(!lines[0].contains("RSI"));
        assert!(!lines[0].contains("MACD"));
        assert!(lines[0].contains("BBM_5_2.0"));
        assert!(lines[0].contains("Support"));
        assert!(lines[0].contains("Resistance"));
    }

    #[tokio::test]
    async fn test_empty_series_is_sentinel() {
        let provider = provider_with(Vec::new());
        let out = price_history_report(
            &provider,
            "AAPL",
            Period::OneWeek,
            Interval::OneDay,
            &Context::detached(),
        )
        .await
        .unwrap();
        assert_eq!(out, NO_DATA);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_history()
            .returning(|_, _, _| Err(StockError::ApiError("boom".to_string())));

        let result = price_history_report(
            &provider,
            "AAPL",
            Period::OneWeek,
            Interval::OneDay,
            &Context::detached(),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_full_column_order() {
        let table = build_price_table(daily_bars(40, 50.0), Interval::OneDay, &Context::detached());
        assert_eq!(
            column_names(&table),
            vec![
                "RSI",
                "MACD_12_26_9",
                "MACDh_12_26_9",
                "MACDs_12_26_9",
                "BBL_5_2.0",
                "BBM_5_2.0",
                "BBU_5_2.0",
                "Support",
                "Resistance",
            ]
        );
        assert_eq!(table.len(), 40);
    }

    #[test]
    fn test_short_series_omits_only_long_indicators() {
        let table = build_price_table(daily_bars(20, 10.0), Interval::OneDay, &Context::detached());
        assert_eq!(
            column_names(&table),
            vec!["RSI", "BBL_5_2.0", "BBM_5_2.0", "BBU_5_2.0", "Support", "Resistance"]
        );
    }

    #[test]
    fn test_joins_preserve_rows() {
        let bars = daily_bars(30, 75.0);
        let table = build_price_table(bars.clone(), Interval::OneDay, &Context::detached());

        assert_eq!(table.bars(), bars.as_slice());
        assert!(table.columns().iter().all(|c| c.len() == bars.len()));
        // MACD line only: signal needs 34 rows
        assert!(table.column("MACD_12_26_9").is_some());
        assert!(table.column("MACDs_12_26_9").is_none());
    }

    #[test]
    fn test_failed_indicator_leaves_other_columns() {
        let bars = daily_bars(10, 20.0);
        let mut table = PriceTable::new(bars.clone(), Interval::OneDay);
        let ctx = Context::detached();

        join_indicator(
            &mut table,
            "RSI",
            Err(StockError::IndicatorError("invalid period".to_string())),
            &ctx,
        );
        join_indicator(
            &mut table,
            "Broken",
            Ok(vec![Column::new("Short", vec![Some(1.0); 3])]),
            &ctx,
        );
        let bbands = indicators::bollinger_bands(&table.closes(), BBANDS_PERIOD, BBANDS_STD_DEV);
        join_indicator(&mut table, "Bollinger Bands", bbands, &ctx);

        assert_eq!(column_names(&table), vec!["BBL_5_2.0", "BBM_5_2.0", "BBU_5_2.0"]);
        assert_eq!(table.bars(), bars.as_slice());
        assert_eq!(table.to_markdown().lines().count(), 12);
    }

    #[test]
    fn test_support_resistance_populated_from_first_row() {
        let table = build_price_table(daily_bars(25, 10.0), Interval::OneDay, &Context::detached());
        let support = table.column("Support").unwrap();
        let resistance = table.column("Resistance").unwrap();

        assert!(support.values.iter().all(Option::is_some));
        assert!(resistance.values.iter().all(Option::is_some));
        assert_eq!(support.values[0], Some(10.0));
        // closes rise by 1 per bar: the 20 bar window trails by 19
        assert_eq!(support.values[24], Some(15.0));
        assert_eq!(resistance.values[24], Some(34.0));
    }
}
