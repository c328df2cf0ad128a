//! Volume Weighted Average Price (VWAP) indicator.

use super::Indicator;
use crate::types::Candle;

/// VWAP (Volume Weighted Average Price) indicator.
///
/// Average price weighted by volume, accumulated from the start of the
/// series (no session reset):
/// VWAP = Cumulative(TP * Volume) / Cumulative(Volume)
///
/// Signals:
/// - Price above VWAP = bullish (institutional buying)
/// - Price below VWAP = bearish (institutional selling)
#[derive(Default)]
pub struct Vwap;

impl Indicator for Vwap {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        "vwap"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let mut cum_tp_vol = 0.0;
        let mut cum_vol = 0.0;

        candles
            .iter()
            .map(|candle| {
                cum_tp_vol += candle.typical_price() * candle.volume;
                cum_vol += candle.volume;
                (cum_vol > 0.0).then(|| cum_tp_vol / cum_vol)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
        Candle {
            time,
            open: close,
            high,
            low,
            close,
            volume,
        }
    }

    #[test]
    fn test_vwap_cumulative() {
        let candles = vec![
            candle(0, 12.0, 9.0, 9.0, 100.0), // tp 10
            candle(1, 22.0, 19.0, 19.0, 300.0), // tp 20
        ];
        let result = Vwap.calculate(&candles);
        assert_eq!(result[0], Some(10.0));
        assert_eq!(result[1], Some(17.5));
    }

    #[test]
    fn test_vwap_zero_volume_is_undefined() {
        let candles = vec![candle(0, 11.0, 9.0, 10.0, 0.0), candle(1, 11.0, 9.0, 10.0, 5.0)];
        let result = Vwap.calculate(&candles);
        assert_eq!(result[0], None);
        assert_eq!(result[1], Some(10.0));
    }
}
