//! End-to-end tests for the analysis pipeline.

use confluence::types::*;
use confluence::{analyze, AppError};

// ============================================================================
// Helpers
// ============================================================================

/// Steady 1% per bar rise with constant volume.
fn create_rising_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 100.0 * 1.01f64.powi(i as i32);
            let open = if i == 0 { close } else { close / 1.01 };
            Candle {
                time: 1_700_000_000_000 + i as i64 * 3_600_000,
                open,
                high: close * 1.005,
                low: open * 0.995,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

fn create_flat_candles(count: usize) -> Vec<Candle> {
    create_constant_candles(count, 50.0)
}

fn create_constant_candles(count: usize, price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| Candle {
            time: 1_700_000_000_000 + i as i64 * 3_600_000,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 250.0,
        })
        .collect()
}

fn create_wave_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 200.0 + (i as f64 * 0.25).sin() * 8.0 + (i as f64 * 0.07).cos() * 3.0;
            Candle {
                time: 1_700_000_000_000 + i as i64 * 900_000,
                open: close - 0.5,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 800.0 + (i % 11) as f64 * 40.0,
            }
        })
        .collect()
}

fn assert_finite(value: Option<f64>, name: &str) {
    if let Some(v) = value {
        assert!(v.is_finite(), "{} is not finite: {}", name, v);
    }
}

// ============================================================================
// Rising market
// ============================================================================

#[test]
fn test_rising_series_is_bullish() {
    let candles = create_rising_candles(60);
    let analysis = analyze(&candles, &AnalysisConfig::default()).unwrap();
    let snapshot = &analysis.snapshot;

    assert!((snapshot.rsi.unwrap() - 100.0).abs() < 1e-9);
    assert!(snapshot.moving_averages.ema9.unwrap() > snapshot.moving_averages.ema21.unwrap());
    assert!(snapshot.adx.strong_trend);
    assert_eq!(snapshot.obv.trend, Some(ObvTrend::Rising));

    assert!(analysis.confluence.action.is_buy());
    assert!(analysis.confluence.score >= 30);
    assert!(!analysis.confluence.forced);
}

#[test]
fn test_rising_series_targets_and_plan() {
    let candles = create_rising_candles(60);
    let analysis = analyze(&candles, &AnalysisConfig::default()).unwrap();

    let price = analysis.snapshot.price;
    let targets = &analysis.targets;
    assert_eq!(targets.entry, Some(price));
    assert!(targets.stop_loss.unwrap() < price);
    assert!(!targets.take_profits.is_empty());
    assert!(targets.take_profits.iter().all(|tp| tp.price > price));
    assert!(targets.risk_reward.unwrap() >= 0.0);

    let plan = &analysis.plan;
    assert_eq!(plan.hold_time.as_deref(), Some("~6 hours"));
    assert!(plan.expected_move.unwrap() > 0.0);
    assert!(plan.summary.contains("→ SELL @"));
    assert!(plan.reasons.len() <= 5);
    assert!(plan.reasons.iter().any(|r| r == "EMA9 above EMA21"));
}

#[test]
fn test_risk_reward_matches_levels() {
    let analysis = analyze(&create_rising_candles(60), &AnalysisConfig::default()).unwrap();
    let targets = &analysis.targets;
    let entry = targets.entry.unwrap();
    let stop = targets.stop_loss.unwrap();
    let tp = targets.take_profits[0].price;

    let expected = (tp - entry).abs() / (entry - stop).abs();
    assert!((targets.risk_reward.unwrap() - expected).abs() <= 0.005);
}

// ============================================================================
// Flat market
// ============================================================================

#[test]
fn test_flat_series_is_neutral() {
    let analysis = analyze(&create_flat_candles(60), &AnalysisConfig::default()).unwrap();
    let snapshot = &analysis.snapshot;

    // No losses reads as RSI 100, the only non-zero vote
    assert_eq!(snapshot.rsi, Some(100.0));
    assert_eq!(snapshot.bollinger.percent_b, None);
    assert_eq!(snapshot.bollinger.upper, snapshot.bollinger.lower);
    assert!(snapshot.bollinger.squeeze);
    assert_eq!(snapshot.obv.trend, Some(ObvTrend::Flat));

    assert_eq!(analysis.confluence.score, -15);
    assert_eq!(analysis.confluence.action, Action::Neutral);
    assert_eq!(analysis.targets, Targets::default());
    assert!(analysis.plan.entry.is_none());
    assert!(analysis.plan.summary.starts_with("NEUTRAL"));
}

#[test]
fn test_inexact_constant_prices_are_neutral() {
    for price in [123.45, 0.1, 2.675] {
        let analysis = analyze(&create_constant_candles(60, price), &AnalysisConfig::default())
            .unwrap();
        let snapshot = &analysis.snapshot;

        assert_eq!(snapshot.bollinger.percent_b, None, "price {}", price);
        assert_eq!(snapshot.macd.histogram, Some(0.0), "price {}", price);
        assert!(!snapshot.moving_averages.ema9_above_ema21, "price {}", price);
        assert_eq!(snapshot.above_vwap(), None, "price {}", price);

        let ema = analysis
            .confluence
            .breakdown
            .iter()
            .find(|b| b.key == IndicatorKey::EmaCross)
            .unwrap();
        assert_eq!(ema.contribution, 0.0, "price {}", price);

        let reasons = &analysis.plan.reasons;
        assert!(!reasons.iter().any(|r| r.starts_with("EMA9")), "price {}", price);
        assert!(!reasons.iter().any(|r| r.contains("VWAP")), "price {}", price);

        assert_eq!(analysis.confluence.score, -15, "price {}", price);
        assert_eq!(analysis.confluence.action, Action::Neutral);
        assert!(analysis.plan.support < price && price < analysis.plan.resistance);
    }
}

#[test]
fn test_flat_series_has_no_nan() {
    let analysis = analyze(&create_flat_candles(60), &AnalysisConfig::default()).unwrap();
    let s = &analysis.snapshot;

    for (value, name) in [
        (s.rsi, "rsi"),
        (s.stochastic.k, "stoch k"),
        (s.stochastic.d, "stoch d"),
        (s.macd.line, "macd line"),
        (s.macd.histogram, "macd histogram"),
        (s.moving_averages.ema9, "ema9"),
        (s.moving_averages.ema21, "ema21"),
        (s.adx.adx, "adx"),
        (s.bollinger.upper, "bb upper"),
        (s.bollinger.lower, "bb lower"),
        (s.atr, "atr"),
        (s.vwap, "vwap"),
        (s.obv.value, "obv"),
    ] {
        assert_finite(value, name);
    }
    for entry in &analysis.confluence.breakdown {
        assert!(entry.contribution.is_finite());
    }
    assert!(analysis.plan.support.is_finite());
    assert!(analysis.plan.resistance.is_finite());
}

// ============================================================================
// General properties
// ============================================================================

#[test]
fn test_empty_series_fails() {
    assert!(matches!(
        analyze(&[], &AnalysisConfig::default()),
        Err(AppError::EmptySeries)
    ));
}

#[test]
fn test_short_series_degrades_gracefully() {
    let analysis = analyze(&create_wave_candles(10), &AnalysisConfig::default()).unwrap();
    assert!(analysis.snapshot.rsi.is_none());
    assert!(analysis.snapshot.macd.histogram.is_none());
    assert!((-100..=100).contains(&analysis.confluence.score));
}

#[test]
fn test_analysis_is_idempotent() {
    let candles = create_wave_candles(250);
    let config = AnalysisConfig {
        timeframe: Timeframe::FifteenMinutes,
        forced_bias: false,
    };
    let first = analyze(&candles, &config).unwrap();
    let second = analyze(&candles, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rsi_stays_in_range() {
    let candles = create_wave_candles(250);
    let analysis = analyze(&candles, &AnalysisConfig::default()).unwrap();
    for rsi in analysis.snapshot.series.rsi.iter().flatten() {
        assert!((0.0..=100.0).contains(rsi));
    }
}

#[test]
fn test_breakdown_ranked_by_contribution() {
    let analysis = analyze(&create_wave_candles(250), &AnalysisConfig::default()).unwrap();
    let breakdown = &analysis.confluence.breakdown;
    assert_eq!(breakdown.len(), IndicatorKey::ALL.len());
    for pair in breakdown.windows(2) {
        assert!(pair[0].contribution.abs() >= pair[1].contribution.abs());
    }
    let total: f64 = breakdown.iter().map(|b| b.contribution).sum();
    assert!((total - analysis.confluence.score as f64).abs() <= 0.5 + 1e-9);
}

#[test]
fn test_forced_bias_never_neutral() {
    let config = AnalysisConfig {
        timeframe: Timeframe::OneHour,
        forced_bias: true,
    };
    let analysis = analyze(&create_flat_candles(60), &config).unwrap();
    assert!(analysis.confluence.forced);
    assert_eq!(analysis.confluence.score, -15);
    assert_ne!(analysis.confluence.action, Action::Neutral);
    assert!(analysis.targets.entry.is_some());
}

#[test]
fn test_forced_bias_follows_rising_market() {
    let config = AnalysisConfig {
        timeframe: Timeframe::OneHour,
        forced_bias: true,
    };
    let analysis = analyze(&create_rising_candles(60), &config).unwrap();
    assert!(analysis.confluence.action.is_buy());
}
