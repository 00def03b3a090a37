//! Price bars and the period/interval vocabulary used to request them

use crate::error::StockError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time in the exchange's local offset
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Round the price fields to cents
    pub fn rounded(self) -> Self {
        Self {
            open: round2(self.open),
            high: round2(self.high),
            low: round2(self.low),
            close: round2(self.close),
            ..self
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every accepted value, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The string form accepted from callers
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = StockError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(StockError::InvalidArgument(format!(
                        "invalid {} '{}', expected one of: {}",
                        $kind,
                        other,
                        [$( $wire ),+].join(", ")
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// How far back a price history request reaches
    Period, "period" {
        OneDay => "1d",
        FiveDays => "5d",
        #[default]
        OneWeek => "1wk",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
        SixMonths => "6mo",
        OneYear => "1y",
        TwoYears => "2y",
        FiveYears => "5y",
        TenYears => "10y",
        YearToDate => "ytd",
        Max => "max",
    }
}

impl Period {
    /// The range string understood by the chart endpoint
    ///
    /// The chart API has no `1wk` range; five trading days covers it.
    pub fn provider_range(self) -> &'static str {
        match self {
            Period::OneWeek => "5d",
            other => other.as_str(),
        }
    }
}

wire_enum! {
    /// Bar width of a price history request
    Interval, "interval" {
        OneMinute => "1m",
        TwoMinutes => "2m",
        FiveMinutes => "5m",
        FifteenMinutes => "15m",
        ThirtyMinutes => "30m",
        SixtyMinutes => "60m",
        NinetyMinutes => "90m",
        OneHour => "1h",
        #[default]
        OneDay => "1d",
        FiveDays => "5d",
        OneWeek => "1wk",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
    }
}

impl Interval {
    /// Whether bars are narrower than one trading day
    pub fn is_intraday(self) -> bool {
        matches!(
            self,
            Interval::OneMinute
                | Interval::TwoMinutes
                | Interval::FiveMinutes
                | Interval::FifteenMinutes
                | Interval::ThirtyMinutes
                | Interval::SixtyMinutes
                | Interval::NinetyMinutes
                | Interval::OneHour
        )
    }
}
