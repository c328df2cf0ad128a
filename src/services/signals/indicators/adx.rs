//! Average Directional Index (ADX) indicator.

use super::series::{latest, true_range, wilder, wilder_defined};
use super::Indicator;
use crate::types::{AdxState, Candle};

/// ADX above this marks a strong trend.
pub const STRONG_TREND: f64 = 25.0;

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-40: Trending
/// - Above 40: Strong trend
///
/// Combined with +DI and -DI for direction.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Aligned ADX, +DI and -DI series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdxSeries {
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
}

impl AdxSeries {
    pub fn state(&self) -> AdxState {
        let adx = latest(&self.adx);
        let plus_di = latest(&self.plus_di);
        let minus_di = latest(&self.minus_di);
        AdxState {
            adx,
            plus_di,
            minus_di,
            strong_trend: adx.is_some_and(|a| a > STRONG_TREND),
            bullish: matches!((plus_di, minus_di), (Some(p), Some(m)) if p > m),
        }
    }
}

impl Indicator for Adx {
    type Output = AdxSeries;

    fn id(&self) -> &str {
        "adx"
    }

    fn min_periods(&self) -> usize {
        self.period * 2 + 1
    }

    fn calculate(&self, candles: &[Candle]) -> AdxSeries {
        let n = candles.len();
        let mut series = AdxSeries {
            adx: vec![None; n],
            plus_di: vec![None; n],
            minus_di: vec![None; n],
        };
        if self.period == 0 || n < self.period + 1 {
            return series;
        }

        let mut plus_dm = Vec::with_capacity(n - 1);
        let mut minus_dm = Vec::with_capacity(n - 1);
        let mut tr = Vec::with_capacity(n - 1);

        // Calculate DM and TR
        for i in 1..n {
            let current = &candles[i];
            let previous = &candles[i - 1];

            let up_move = current.high - previous.high;
            let down_move = previous.low - current.low;

            plus_dm.push(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            minus_dm.push(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });

            tr.push(true_range(current, previous));
        }

        let smoothed_plus_dm = wilder(&plus_dm, self.period);
        let smoothed_minus_dm = wilder(&minus_dm, self.period);
        let smoothed_tr = wilder(&tr, self.period);

        // Index j of the smoothed series belongs to candle j + 1
        let mut dx = vec![None; n];
        for j in 0..smoothed_tr.len() {
            let (Some(atr), Some(pdm), Some(mdm)) =
                (smoothed_tr[j], smoothed_plus_dm[j], smoothed_minus_dm[j])
            else {
                continue;
            };

            let (plus_di, minus_di) = if atr > 0.0 {
                (pdm / atr * 100.0, mdm / atr * 100.0)
            } else {
                (0.0, 0.0)
            };
            series.plus_di[j + 1] = Some(plus_di);
            series.minus_di[j + 1] = Some(minus_di);

            let di_sum = plus_di + minus_di;
            dx[j + 1] = Some(if di_sum > 0.0 {
                (plus_di - minus_di).abs() / di_sum * 100.0
            } else {
                0.0
            });
        }

        // The first DX sits on the unsmoothed seed bar, so ADX averages from
        // the next one and first appears at index 2 * period.
        if let Some(first) = dx.iter().position(Option::is_some) {
            dx[first] = None;
        }
        series.adx = wilder_defined(&dx, self.period);

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Candle {
                    time: 1000000 + i as i64 * 60000,
                    open: base,
                    high: base + 2.0,
                    low: base - 1.0,
                    close: base + 1.0,
                    volume: 1000.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_adx_min_periods() {
        let adx = Adx::default();
        assert_eq!(adx.id(), "adx");
        assert_eq!(adx.min_periods(), 29); // period * 2 + 1
    }

    #[test]
    fn test_adx_warmup_boundary() {
        let adx = Adx::default();
        assert_eq!(adx.calculate(&create_uptrend_candles(28)).state().adx, None);
        assert!(adx.calculate(&create_uptrend_candles(29)).state().adx.is_some());
    }

    #[test]
    fn test_adx_uptrend_is_strong_and_bullish() {
        let state = Adx::default().calculate(&create_uptrend_candles(50)).state();
        let adx = state.adx.unwrap();
        assert!((0.0..=100.0).contains(&adx));
        assert!(state.strong_trend, "ADX should flag a strong trend, got {}", adx);
        assert!(state.bullish);
        assert!(state.plus_di.unwrap() > state.minus_di.unwrap());
    }

    #[test]
    fn test_adx_flat_market_is_zero() {
        let candles: Vec<Candle> = (0..40)
            .map(|i| Candle {
                time: i,
                open: 50.0,
                high: 50.0,
                low: 50.0,
                close: 50.0,
                volume: 10.0,
            })
            .collect();
        let state = Adx::default().calculate(&candles).state();
        assert_eq!(state.adx, Some(0.0));
        assert!(!state.strong_trend);
        assert!(!state.bullish);
    }
}
