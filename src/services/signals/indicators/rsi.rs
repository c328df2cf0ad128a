//! Relative Strength Index (RSI) indicator.

use super::series::wilder;
use super::Indicator;
use crate::types::Candle;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI from smoothed average gain and loss.
    ///
    /// An average loss of zero reads as 100, flat series included.
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

impl Indicator for Rsi {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let mut result = vec![None; candles.len()];
        if self.period == 0 || candles.len() < self.min_periods() {
            return result;
        }

        let mut gains = Vec::with_capacity(candles.len() - 1);
        let mut losses = Vec::with_capacity(candles.len() - 1);

        for i in 1..candles.len() {
            let change = candles[i].close - candles[i - 1].close;
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        // Deltas start at candle 1, so delta index j belongs to candle j + 1
        let avg_gains = wilder(&gains, self.period);
        let avg_losses = wilder(&losses, self.period);

        for (j, (gain, loss)) in avg_gains.iter().zip(avg_losses.iter()).enumerate() {
            if let (Some(gain), Some(loss)) = (gain, loss) {
                result[j + 1] = Some(Self::from_averages(*gain, *loss));
            }
        }

        result
    }
}
