//! Moving average crossovers: EMA9/EMA21 and SMA50/SMA200.

use std::cmp::Ordering;

use super::series::{compare, crossed_above, crossed_below, ema, latest, sma};
use super::Indicator;
use crate::types::{Candle, MovingAverageState};

/// Fast/slow EMA pair plus the long-term SMA trend filter.
///
/// - EMA9 above EMA21 = short-term bullish
/// - Price above SMA200 = long-term bullish
/// - SMA50 crossing SMA200 = golden / death cross
pub struct MovingAverages {
    fast_ema: usize,
    slow_ema: usize,
    mid_sma: usize,
    long_sma: usize,
}

impl Default for MovingAverages {
    fn default() -> Self {
        Self {
            fast_ema: 9,
            slow_ema: 21,
            mid_sma: 50,
            long_sma: 200,
        }
    }
}

impl Indicator for MovingAverages {
    type Output = MovingAverageState;

    fn id(&self) -> &str {
        "moving_averages"
    }

    fn min_periods(&self) -> usize {
        self.long_sma
    }

    fn calculate(&self, candles: &[Candle]) -> MovingAverageState {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let price = closes.last().copied().unwrap_or(0.0);

        let ema9 = ema(&closes, self.fast_ema);
        let ema21 = ema(&closes, self.slow_ema);
        let sma50 = sma(&closes, self.mid_sma);
        let sma200 = sma(&closes, self.long_sma);

        let fast = latest(&ema9);
        let slow = latest(&ema21);
        let mid = latest(&sma50);
        let long = latest(&sma200);

        MovingAverageState {
            ema9: fast,
            ema21: slow,
            sma50: mid,
            sma200: long,
            ema9_above_ema21: matches!(
                (fast, slow),
                (Some(f), Some(s)) if compare(f, s) == Ordering::Greater
            ),
            price_above_sma50: mid.is_some_and(|m| compare(price, m) == Ordering::Greater),
            price_above_sma200: long.is_some_and(|l| compare(price, l) == Ordering::Greater),
            ema_bullish_cross: crossed_above(&ema9, &ema21),
            ema_bearish_cross: crossed_below(&ema9, &ema21),
            golden_cross: crossed_above(&sma50, &sma200),
            death_cross: crossed_below(&sma50, &sma200),
        }
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
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn test_uptrend_relationships() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let state = MovingAverages::default().calculate(&create_candles(&closes));
        assert!(state.ema9_above_ema21);
        assert!(state.price_above_sma50);
        assert!(!state.price_above_sma200);
        assert_eq!(state.sma200, None);
        assert!(!state.ema_bullish_cross);
    }

    #[test]
    fn test_fresh_ema_cross() {
        let mut closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        let mut crossed = false;
        for i in 1..=20 {
            closes.push(161.0 + i as f64 * 3.0);
            let state = MovingAverages::default().calculate(&create_candles(&closes));
            if state.ema_bullish_cross {
                assert!(state.ema9_above_ema21);
                crossed = true;
                break;
            }
        }
        assert!(crossed);
    }

    #[test]
    fn test_inexact_constant_has_no_direction() {
        let state = MovingAverages::default().calculate(&create_candles(&[123.45; 60]));
        assert!(!state.ema9_above_ema21);
        assert!(!state.price_above_sma50);
        assert!(!state.ema_bullish_cross);
        assert!(!state.ema_bearish_cross);
    }

    #[test]
    fn test_long_history_defines_sma200() {
        let closes: Vec<f64> = (0..220).map(|i| 100.0 + (i as f64 * 0.1).sin()).collect();
        let state = MovingAverages::default().calculate(&create_candles(&closes));
        assert!(state.sma200.is_some());
        assert!(state.sma50.is_some());
    }
}
