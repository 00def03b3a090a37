//! Command-line interface for finmcp
//!
//! `finmcp` (or `finmcp serve`) speaks MCP on stdin/stdout. The other
//! subcommands run a single tool and print its text answer.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use finmcp_core::Context;
use finmcp_server::{McpServer, PromptRegistry};
use finmcp_stock::{StockConfig, YahooFinanceClient, register_all};
use finmcp_tools::ToolRegistry;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finmcp", version)]
#[command(about = "Stock market data and technical analysis as MCP tools", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdio (default)
    Serve,
    /// Price history with RSI, MACD, Bollinger Bands and support/resistance
    PriceHistory {
        symbol: String,
        #[arg(long, default_value = "1wk")]
        period: String,
        #[arg(long, default_value = "1d")]
        interval: String,
    },
    /// Security info with financial statements for equities
    Info { symbol: String },
    /// Latest news for a symbol
    News { symbol: String },
    /// Resolve a company name to a ticker symbol
    Lookup { query: String },
    /// Search quotes and news
    Search {
        query: String,
        #[arg(long, default_value = "all")]
        search_type: String,
    },
    /// Analyst recommendation trend
    Recommendations { symbol: String },
    /// US market summary
    MarketSummary,
}

impl Command {
    /// Tool name and arguments for a one-shot run
    fn tool_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Command::Serve => return None,
            Command::PriceHistory {
                symbol,
                period,
                interval,
            } => (
                "get_price_history",
                json!({"symbol": symbol, "period": period, "interval": interval}),
            ),
            Command::Info { symbol } => ("get_stock_info", json!({"symbol": symbol})),
            Command::News { symbol } => ("get_stock_news", json!({"symbol": symbol})),
            Command::Lookup { query } => ("get_stock_symbol_lookup", json!({"query": query})),
            Command::Search { query, search_type } => (
                "search",
                json!({"query": query, "search_type": search_type}),
            ),
            Command::Recommendations { symbol } => {
                ("get_stock_recommendations", json!({"symbol": symbol}))
            }
            Command::MarketSummary => ("get_US_market_news", json!({})),
        };
        Some(call)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = finmcp_utils::load_dotenv();
    let config = finmcp_utils::Config::from_env().context("invalid process configuration")?;
    finmcp_utils::init_tracing(&config.logging)?;
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    let args = Args::parse();

    let stock_config = StockConfig::from_env().context("invalid stock configuration")?;
    let provider = YahooFinanceClient::new(&stock_config).context("failed to build Yahoo client")?;

    let registry = Arc::new(ToolRegistry::new());
    register_all(&registry, Arc::new(provider), Arc::new(stock_config));

    let command = args.command.unwrap_or(Command::Serve);
    match command.tool_call() {
        None => {
            info!(app = %config.app_name, env = %config.environment, "starting MCP server");
            let server = McpServer::new(
                config.app_name,
                env!("CARGO_PKG_VERSION"),
                registry,
                PromptRegistry::builtin(),
            );
            server.serve_stdio().await?;
        }
        Some((tool, params)) => {
            let ctx = Context::for_tool(tool);
            let text = registry.execute(tool, params, &ctx).await?;
            println!("{text}");
        }
    }

    Ok(())
}
