//! Technical indicators over a close series
//!
//! Each function returns the columns it produces, or an empty vector when the
//! series is shorter than the indicator needs. Warm-up rows are `None`.

use crate::analysis::table::Column;
use crate::error::Result;
use ta::Next;
use ta::indicators::{BollingerBands, MovingAverageConvergenceDivergence, RelativeStrengthIndex};

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BBANDS_PERIOD: usize = 5;
pub const BBANDS_STD_DEV: f64 = 2.0;

/// Relative Strength Index, column `RSI`
///
/// Needs `period + 1` closes; the first `period` rows are undefined.
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<Column>> {
    if closes.len() <= period {
        return Ok(Vec::new());
    }

    let mut indicator = RelativeStrengthIndex::new(period)?;
    let values = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let value = indicator.next(close);
            (i >= period).then_some(value)
        })
        .collect();

    Ok(vec![Column::new("RSI", values)])
}

/// MACD line, histogram and signal
///
/// Needs `slow` closes. The line is undefined for the first `slow - 1` rows,
/// histogram and signal for the first `slow + signal - 2`.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Result<Vec<Column>> {
    if closes.len() < slow {
        return Ok(Vec::new());
    }

    let mut indicator = MovingAverageConvergenceDivergence::new(fast, slow, signal)?;
    let line_warmup = slow - 1;
    let signal_warmup = slow + signal - 2;

    let mut line = Vec::with_capacity(closes.len());
    let mut histogram = Vec::with_capacity(closes.len());
    let mut signal_line = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let out = indicator.next(close);
        line.push((i >= line_warmup).then_some(out.macd));
        histogram.push((i >= signal_warmup).then_some(out.histogram));
        signal_line.push((i >= signal_warmup).then_some(out.signal));
    }

    let suffix = format!("{fast}_{slow}_{signal}");
    Ok(vec![
        Column::new(format!("MACD_{suffix}"), line),
        Column::new(format!("MACDh_{suffix}"), histogram),
        Column::new(format!("MACDs_{suffix}"), signal_line),
    ])
}

/// Bollinger Bands: lower, middle and upper band
///
/// Needs `period` closes; the first `period - 1` rows are undefined.
pub fn bollinger_bands(closes: &[f64], period: usize, multiplier: f64) -> Result<Vec<Column>> {
    if closes.len() < period {
        return Ok(Vec::new());
    }

    let mut indicator = BollingerBands::new(period, multiplier)?;
    let warmup = period - 1;

    let mut lower = Vec::with_capacity(closes.len());
    let mut middle = Vec::with_capacity(closes.len());
    let mut upper = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let out = indicator.next(close);
        let ready = i >= warmup;
        lower.push(ready.then_some(out.lower));
        middle.push(ready.then_some(out.average));
        upper.push(ready.then_some(out.upper));
    }

    let suffix = format!("{period}_{multiplier:.1}");
    Ok(vec![
        Column::new(format!("BBL_{suffix}"), lower),
        Column::new(format!("BBM_{suffix}"), middle),
        Column::new(format!("BBU_{suffix}"), upper),
    ])
}
