//! On-Balance Volume (OBV) indicator.

use super::Indicator;
use crate::types::{Candle, ObvState, ObvTrend};

/// OBV (On-Balance Volume) indicator.
///
/// Running total of volume signed by close direction:
/// - Close up: add volume
/// - Close down: subtract volume
///
/// Trend compares the latest OBV with the value `lookback` bars earlier.
pub struct Obv {
    lookback: usize,
}

impl Default for Obv {
    fn default() -> Self {
        Self { lookback: 5 }
    }
}

impl Obv {
    /// OBV series aligned with the candles, starting at 0.
    pub fn series(candles: &[Candle]) -> Vec<f64> {
        let mut obv = 0.0;
        let mut result = Vec::with_capacity(candles.len());

        for (i, candle) in candles.iter().enumerate() {
            if i > 0 {
                let prev_close = candles[i - 1].close;
                if candle.close > prev_close {
                    obv += candle.volume;
                } else if candle.close < prev_close {
                    obv -= candle.volume;
                }
            }
            result.push(obv);
        }

        result
    }
}

impl Indicator for Obv {
    type Output = ObvState;

    fn id(&self) -> &str {
        "obv"
    }

    fn min_periods(&self) -> usize {
        self.lookback + 1
    }

    fn calculate(&self, candles: &[Candle]) -> ObvState {
        let series = Self::series(candles);
        let value = series.last().copied();

        let trend = if series.len() >= self.min_periods() {
            let current = series[series.len() - 1];
            let past = series[series.len() - 1 - self.lookback];
            Some(if current > past {
                ObvTrend::Rising
            } else if current < past {
                ObvTrend::Falling
            } else {
                ObvTrend::Flat
            })
        } else {
            None
        };

        ObvState { value, trend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| Candle {
                time: i as i64,
                open: *close,
                high: close + 1.0,
                low: close - 1.0,
                close: *close,
                volume: 100.0,
            })
            .collect()
    }

    #[test]
    fn test_obv_series() {
        let series = Obv::series(&create_candles(&[10.0, 11.0, 10.5, 10.5, 12.0]));
        assert_eq!(series, vec![0.0, 100.0, 0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_obv_trend() {
        let obv = Obv::default();
        let rising = obv.calculate(&create_candles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));
        assert_eq!(rising.trend, Some(ObvTrend::Rising));

        let falling = obv.calculate(&create_candles(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0]));
        assert_eq!(falling.trend, Some(ObvTrend::Falling));

        let flat = obv.calculate(&create_candles(&[5.0; 8]));
        assert_eq!(flat.trend, Some(ObvTrend::Flat));
    }

    #[test]
    fn test_obv_insufficient_data() {
        let state = Obv::default().calculate(&create_candles(&[1.0, 2.0, 3.0]));
        assert_eq!(state.value, Some(200.0));
        assert_eq!(state.trend, None);
    }
}
