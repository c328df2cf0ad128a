//! Average True Range (ATR) indicator.

use super::series::{true_range, wilder};
use super::Indicator;
use crate::types::Candle;

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by calculating the average of true ranges:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// The first value is the mean of the first `period` true ranges, later
/// values use Wilder's smoothing. Stops and targets are sized in ATR units.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Atr {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        "atr"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let mut result = vec![None; candles.len()];
        if candles.len() < 2 {
            return result;
        }

        let true_ranges: Vec<f64> = candles
            .windows(2)
            .map(|pair| true_range(&pair[1], &pair[0]))
            .collect();

        for (j, atr) in wilder(&true_ranges, self.period).into_iter().enumerate() {
            result[j + 1] = atr;
        }

        result
    }
}
