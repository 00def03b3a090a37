//! Analyst recommendation trend as a markdown table

use crate::api::MarketDataProvider;
use crate::error::Result;
use comfy_table::Table;
use comfy_table::presets::ASCII_MARKDOWN;
use finmcp_core::Context;
use tracing::info;

pub async fn recommendations_report(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    limit: usize,
    ctx: &Context,
) -> Result<String> {
    let trend = provider.recommendations(symbol).await?;
    if trend.is_empty() {
        info!(parent: ctx.span(), symbol, "no recommendations found");
        return Ok(format!("No analyst recommendations available for {symbol}."));
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_header(vec!["period", "strongBuy", "buy", "hold", "sell", "strongSell"]);

    for row in trend.iter().take(limit) {
        table.add_row(vec![
            row.period.clone(),
            row.strong_buy.to_string(),
            row.buy.to_string(),
            row.hold.to_string(),
            row.sell.to_string(),
            row.strong_sell.to_string(),
        ]);
    }

    info!(parent: ctx.span(), symbol, periods = trend.len().min(limit), "retrieved recommendations");
    Ok(table.to_string())
}
