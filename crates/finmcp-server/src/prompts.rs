//! Prompt templates served through `prompts/list` and `prompts/get`
//!
//! Templates use Jinja syntax and are rendered with MiniJinja. Arguments
//! arrive as strings; a template marks the ones it cannot do without as
//! required and those are checked before rendering.

use crate::error::MCPError;
use crate::protocol::{Content, PromptArgument, PromptDefinition, PromptMessage, PromptResult};
use minijinja::Environment;
use serde_json::{Map, Value};

const STOCK_ANALYSIS: &str = "\
I need to analyze a stock for potential investment. Please help me with the following:

1. Look up the symbol for {{ company_name }}
2. Get the stock info. If `stock_type` is `ETF` or `MUTUALFUND` it only contains the fund groups, \
otherwise it also contains balance_sheet_essentials, income_statement_key_items, \
quarterly_income_key_items, cash_flow_highlights and analyst_price_targets.
3. Based on the stock info, price history, news, RSI, MACD, Bollinger Bands and analyst \
recommendations, provide a brief assessment of whether this might be a good investment opportunity

Please format your analysis in a clear, structured way with sections for each piece of information.";

const MARKET_OVERVIEW: &str = "\
Please provide a market overview with:

1. The current US market summary (use the get_US_market_news tool)
{%- if symbols %}
2. Price history and key information for: {{ symbols }}
3. Summarize the overall market sentiment based on the summary and these securities
{%- else %}
2. Summarize the overall market sentiment based on the summary
{%- endif %}";

/// One prompt template
#[derive(Debug, Clone)]
pub struct Prompt {
    name: &'static str,
    description: &'static str,
    arguments: &'static [(&'static str, &'static str, bool)],
    template: &'static str,
}

impl Prompt {
    pub fn name(&self) -> &str {
        self.name
    }

    /// Definition reported by `prompts/list`
    pub fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            arguments: self
                .arguments
                .iter()
                .map(|&(name, description, required)| PromptArgument {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    required,
                })
                .collect(),
        }
    }

    /// Render the template with `args` as a single user message
    pub fn render(&self, args: &Map<String, Value>) -> Result<PromptResult, MCPError> {
        for &(name, _, required) in self.arguments {
            let present = args
                .get(name)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if required && !present {
                return Err(MCPError::InvalidParams(format!(
                    "prompt '{}' requires argument '{name}'",
                    self.name
                )));
            }
        }

        let env = Environment::new();
        let text = env
            .render_str(self.template, minijinja::Value::from_serialize(args))
            .map_err(|e| MCPError::RenderError {
                name: self.name.to_string(),
                detail: e.to_string(),
            })?;

        Ok(PromptResult {
            description: Some(self.description.to_string()),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: Content::Text { text },
            }],
        })
    }
}

/// Prompts known to the server, in listing order
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    prompts: Vec<Prompt>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptRegistry {
    /// `stock_analysis` and `market_overview`
    pub fn builtin() -> Self {
        Self {
            prompts: vec![
                Prompt {
                    name: "stock_analysis",
                    description: "Analyze a stock from its info, price history, news and analyst recommendations",
                    arguments: &[("company_name", "Company name or ticker to analyze", true)],
                    template: STOCK_ANALYSIS,
                },
                Prompt {
                    name: "market_overview",
                    description: "Overview of the US market, optionally covering specific symbols",
                    arguments: &[("symbols", "Comma separated symbols to include", false)],
                    template: MARKET_OVERVIEW,
                },
            ],
        }
    }

    /// A registry with no prompts
    pub fn empty() -> Self {
        Self {
            prompts: Vec::new(),
        }
    }

    pub fn list(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(Prompt::definition).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// Look up `name` and render it
    pub fn render(&self, name: &str, args: &Map<String, Value>) -> Result<PromptResult, MCPError> {
        self.get(name)
            .ok_or_else(|| MCPError::PromptNotFound(name.to_string()))?
            .render(args)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
