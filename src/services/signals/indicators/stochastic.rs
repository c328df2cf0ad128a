//! Stochastic Oscillator indicator.

use super::series::{crossed_above, crossed_below, latest, previous, sma};
use super::Indicator;
use crate::types::{Candle, StochasticState};

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
/// %D = SMA(3) of %K
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Stochastic {
    /// %K series aligned with the candles.
    pub fn k_series(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let mut k_values = vec![None; candles.len()];
        if self.k_period == 0 || candles.len() < self.k_period {
            return k_values;
        }

        for i in (self.k_period - 1)..candles.len() {
            let window = &candles[(i + 1 - self.k_period)..=i];

            let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
            let highest_high = window
                .iter()
                .map(|c| c.high)
                .fold(f64::NEG_INFINITY, f64::max);

            let k = if highest_high != lowest_low {
                ((candles[i].close - lowest_low) / (highest_high - lowest_low)) * 100.0
            } else {
                50.0
            };

            k_values[i] = Some(k);
        }

        k_values
    }
}

impl Indicator for Stochastic {
    type Output = StochasticState;

    fn id(&self) -> &str {
        "stochastic"
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn calculate(&self, candles: &[Candle]) -> StochasticState {
        let k_values = self.k_series(candles);

        // %D only exists over the defined tail of %K
        let start = self.k_period.saturating_sub(1).min(candles.len());
        let defined: Vec<f64> = k_values[start..].iter().flatten().copied().collect();
        let mut d_values = vec![None; start];
        d_values.extend(sma(&defined, self.d_period));

        StochasticState {
            k: latest(&k_values),
            d: latest(&d_values),
            prev_k: previous(&k_values),
            prev_d: previous(&d_values),
            bullish_cross: crossed_above(&k_values, &d_values),
            bearish_cross: crossed_below(&k_values, &d_values),
        }
    }
}
