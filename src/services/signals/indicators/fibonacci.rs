//! Fibonacci retracement and extension levels.

use super::Indicator;
use crate::types::{Candle, FibLevel, FibonacciLevels};

pub const RETRACEMENT_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];
pub const EXTENSION_RATIOS: [f64; 3] = [1.272, 1.618, 2.618];

/// Fibonacci levels over the trailing swing window.
///
/// The swing high/low is taken over the last `lookback` bars. When the last
/// close sits at or above the swing midpoint the market is treated as an
/// uptrend and retracements are measured down from the high; otherwise they
/// are measured up from the low. Extensions project past the swing extreme
/// in the trend direction.
pub struct Fibonacci {
    lookback: usize,
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self { lookback: 100 }
    }
}

fn level(ratio: f64, price: f64) -> FibLevel {
    FibLevel {
        ratio,
        price,
        label: format!("{}%", (ratio * 1000.0).round() / 10.0),
    }
}

impl Indicator for Fibonacci {
    type Output = Option<FibonacciLevels>;

    fn id(&self) -> &str {
        "fibonacci"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, candles: &[Candle]) -> Option<FibonacciLevels> {
        if candles.len() < self.min_periods() || self.lookback == 0 {
            return None;
        }

        let window = &candles[candles.len().saturating_sub(self.lookback)..];
        let swing_high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let swing_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let range = swing_high - swing_low;
        if range.is_nan() || range <= 0.0 {
            return None;
        }

        let last_close = window[window.len() - 1].close;
        let uptrend = last_close >= (swing_high + swing_low) / 2.0;

        let retracements = RETRACEMENT_RATIOS
            .iter()
            .map(|&ratio| {
                let price = if uptrend {
                    swing_high - ratio * range
                } else {
                    swing_low + ratio * range
                };
                level(ratio, price)
            })
            .collect();

        let extensions = EXTENSION_RATIOS
            .iter()
            .map(|&ratio| {
                let price = if uptrend {
                    swing_low + ratio * range
                } else {
                    swing_high - ratio * range
                };
                level(ratio, price)
            })
            .collect();

        Some(FibonacciLevels {
            swing_high,
            swing_low,
            uptrend,
            retracements,
            extensions,
        })
    }
}
