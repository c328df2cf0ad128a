//! Builds the immutable indicator snapshot for one analysis pass.

use tracing::debug;

use super::indicators::series::{latest, previous};
use super::indicators::{
    Adx, Atr, BollingerBands, DivergenceDetector, Fibonacci, Indicator, Macd, MovingAverages,
    Obv, Rsi, Stochastic, Vwap,
};
use crate::error::{AppError, Result};
use crate::types::{Candle, DivergenceState, IndicatorSeries, IndicatorSnapshot};

/// Run every indicator family over `candles`.
///
/// Fails only on an empty series; short series leave fields undefined.
pub fn build_snapshot(candles: &[Candle]) -> Result<IndicatorSnapshot> {
    let last = candles.last().ok_or(AppError::EmptySeries)?;

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let rsi = Rsi::default().calculate(candles);
    let macd = Macd::default().calculate(candles);

    let detector = DivergenceDetector::default();
    let divergence = DivergenceState {
        rsi: detector.rsi(&closes, &rsi),
        macd: detector.macd(&closes, &macd.histogram),
    };

    let snapshot = IndicatorSnapshot {
        time: last.time,
        price: last.close,
        candle_count: candles.len(),
        rsi: latest(&rsi),
        prev_rsi: previous(&rsi),
        stochastic: Stochastic::default().calculate(candles),
        macd: macd.state(),
        moving_averages: MovingAverages::default().calculate(candles),
        adx: Adx::default().calculate(candles).state(),
        bollinger: BollingerBands::default().calculate(candles),
        atr: latest(&Atr::default().calculate(candles)),
        vwap: latest(&Vwap.calculate(candles)),
        obv: Obv::default().calculate(candles),
        fibonacci: Fibonacci::default().calculate(candles),
        divergence,
        series: IndicatorSeries {
            closes,
            rsi,
            macd_histogram: macd.histogram,
        },
    };

    debug!(
        "Built snapshot over {} candles: price={} rsi={:?} adx={:?} atr={:?}",
        snapshot.candle_count, snapshot.price, snapshot.rsi, snapshot.adx.adx, snapshot.atr
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.05;
                Candle {
                    time: 1000000 + i as i64 * 60000,
                    open: close - 0.2,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 500.0 + (i % 7) as f64 * 50.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert!(matches!(build_snapshot(&[]), Err(AppError::EmptySeries)));
    }

    #[test]
    fn test_single_candle_is_mostly_undefined() {
        let snapshot = build_snapshot(&create_candles(1)).unwrap();
        assert_eq!(snapshot.candle_count, 1);
        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.macd.histogram, None);
        assert_eq!(snapshot.adx.adx, None);
        assert_eq!(snapshot.atr, None);
        assert!(snapshot.vwap.is_some());
        assert!(snapshot.fibonacci.is_none());
    }

    #[test]
    fn test_full_history_defines_everything() {
        let snapshot = build_snapshot(&create_candles(250)).unwrap();
        assert!(snapshot.rsi.is_some());
        assert!(snapshot.prev_rsi.is_some());
        assert!(snapshot.stochastic.k.is_some());
        assert!(snapshot.stochastic.d.is_some());
        assert!(snapshot.macd.histogram.is_some());
        assert!(snapshot.moving_averages.sma200.is_some());
        assert!(snapshot.adx.adx.is_some());
        assert!(snapshot.bollinger.percent_b.is_some());
        assert!(snapshot.atr.is_some());
        assert!(snapshot.obv.trend.is_some());
        assert!(snapshot.fibonacci.is_some());
        assert_eq!(snapshot.series.closes.len(), 250);
        assert_eq!(snapshot.series.rsi.len(), 250);
    }
}
