//! Bollinger Bands indicator.

use super::series::{approx_eq, std_dev};
use super::Indicator;
use crate::types::{BollingerState, Candle};

/// Bandwidth below this is a squeeze.
pub const SQUEEZE_BANDWIDTH: f64 = 0.02;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Signals:
/// - Price near lower band = oversold (bullish)
/// - Price near upper band = overbought (bearish)
/// - Band squeeze = low volatility, potential breakout
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerState;

    fn id(&self) -> &str {
        "bollinger"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, candles: &[Candle]) -> BollingerState {
        if self.period == 0 || candles.len() < self.period {
            return BollingerState::default();
        }

        let closes: Vec<f64> = candles
            .iter()
            .rev()
            .take(self.period)
            .map(|c| c.close)
            .collect();

        let middle = closes.iter().sum::<f64>() / self.period as f64;
        let std_dev = std_dev(&closes, middle);

        let upper = middle + self.std_dev_multiplier * std_dev;
        let lower = middle - self.std_dev_multiplier * std_dev;
        let band_width = upper - lower;

        let current_price = candles[candles.len() - 1].close;

        // %B = (Price - Lower) / (Upper - Lower)
        // %B > 1: above upper band (overbought)
        // %B < 0: below lower band (oversold)
        // Collapsed bands (equal within rounding) leave %B and bandwidth undefined
        let open = band_width > 0.0 && !approx_eq(upper, lower);
        let percent_b = open.then(|| (current_price - lower) / band_width);
        let bandwidth = (open && middle != 0.0).then(|| band_width / middle);

        BollingerState {
            upper: Some(upper),
            middle: Some(middle),
            lower: Some(lower),
            percent_b,
            bandwidth,
            squeeze: bandwidth.map_or(true, |bw| bw < SQUEEZE_BANDWIDTH),
        }
    }
}
