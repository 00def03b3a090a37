//! Rolling window statistics

use crate::analysis::table::{Column, PRICE_PRECISION};

pub const SUPPORT_RESISTANCE_WINDOW: usize = 20;

/// Minimum over a trailing window
///
/// Rows with fewer than `window` predecessors use every value seen so far.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, f64::min)
}

/// Maximum over a trailing window, see [`rolling_min`]
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, f64::max)
}

fn rolling(values: &[f64], window: usize, pick: fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            values[start..=i].iter().copied().reduce(pick)
        })
        .collect()
}

/// `Support` and `Resistance` columns: rolling min and max of the closes
pub fn support_resistance(closes: &[f64], window: usize) -> [Column; 2] {
    [
        Column::new("Support", rolling_min(closes, window)).with_precision(PRICE_PRECISION),
        Column::new("Resistance", rolling_max(closes, window)).with_precision(PRICE_PRECISION),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_windows() {
        let values = [5.0, 3.0, 4.0, 1.0, 6.0];
        assert_eq!(
            rolling_min(&values, 3),
            vec![Some(5.0), Some(3.0), Some(3.0), Some(1.0), Some(1.0)]
        );
        assert_eq!(
            rolling_max(&values, 3),
            vec![Some(5.0), Some(5.0), Some(5.0), Some(4.0), Some(6.0)]
        );
    }

    #[test]
    fn test_support_resistance_fully_populated() {
        let closes: Vec<f64> = (0..25).map(|i| 50.0 + f64::from(i % 7)).collect();
        let [support, resistance] = support_resistance(&closes, SUPPORT_RESISTANCE_WINDOW);

        assert_eq!(support.len(), 25);
        assert!(support.values.iter().all(Option::is_some));
        assert!(resistance.values.iter().all(Option::is_some));
        assert_eq!(support.values[0], Some(50.0));
        assert_eq!(resistance.values[0], Some(50.0));

        for (s, r) in support.values.iter().zip(&resistance.values) {
            assert!(s.unwrap() <= r.unwrap());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(rolling_min(&[], 20).is_empty());
    }
}
