//! MACD (Moving Average Convergence Divergence) indicator.

use super::series::{
    approx_eq, crossed_above, crossed_below, ema, ema_defined, latest, previous,
};
use super::Indicator;
use crate::types::{Candle, MacdState};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// Buy signal: MACD crosses above signal line
/// Sell signal: MACD crosses below signal line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Full MACD series, aligned with the input candles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

impl MacdSeries {
    /// Latest values and cross flags.
    pub fn state(&self) -> MacdState {
        MacdState {
            line: latest(&self.line),
            signal: latest(&self.signal),
            histogram: latest(&self.histogram),
            prev_histogram: previous(&self.histogram),
            bullish_cross: crossed_above(&self.line, &self.signal),
            bearish_cross: crossed_below(&self.line, &self.signal),
        }
    }
}

impl Indicator for Macd {
    type Output = MacdSeries;

    fn id(&self) -> &str {
        "macd"
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn calculate(&self, candles: &[Candle]) -> MacdSeries {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let fast_ema = ema(&closes, self.fast_period);
        let slow_ema = ema(&closes, self.slow_period);

        // MACD line exists once the slow EMA is seeded; EMAs equal within
        // rounding give an exact zero line
        let line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) if approx_eq(*f, *s) => Some(0.0),
                (Some(f), Some(s)) => Some(f - s),
                _ => None,
            })
            .collect();

        let signal = ema_defined(&line, self.signal_period);

        let histogram = line
            .iter()
            .zip(signal.iter())
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m - s),
                _ => None,
            })
            .collect();

        MacdSeries {
            line,
            signal,
            histogram,
        }
    }
}
