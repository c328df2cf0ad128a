//! Signal history and monitor tests

use confluence::services::signals::history::HISTORY_CAPACITY;
use confluence::types::*;
use confluence::{analyze, SignalHistory, SignalMonitor};

fn create_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| Candle {
            time: i as i64 * 60_000,
            open: *close,
            high: close * 1.002,
            low: close * 0.998,
            close: *close,
            volume: 100.0,
        })
        .collect()
}

#[test]
fn test_history_records_only_material_changes() {
    let mut history = SignalHistory::new();
    let steps = [
        (Action::Neutral, 5, true),
        (Action::Neutral, 8, false),
        (Action::Neutral, 15, true),
        (Action::Buy, 31, true),
        (Action::Buy, 35, false),
        (Action::Buy, 26, false),
        (Action::Neutral, 26, true),
    ];

    for (i, (action, score, expected)) in steps.iter().enumerate() {
        let appended = history.record(*action, *score, 100.0, i as i64);
        assert_eq!(appended, *expected, "step {}", i);
    }
    assert_eq!(history.len(), 4);
}

#[test]
fn test_history_never_exceeds_capacity() {
    let mut history = SignalHistory::new();
    for i in 0..100 {
        history.record(Action::Neutral, if i % 2 == 0 { -20 } else { 20 }, 100.0, i);
        assert!(history.len() <= HISTORY_CAPACITY);
    }
    assert_eq!(history.len(), HISTORY_CAPACITY);
    let timestamps: Vec<i64> = history.entries().map(|e| e.timestamp).collect();
    assert_eq!(timestamps.first(), Some(&80));
    assert_eq!(timestamps.last(), Some(&99));
}

#[test]
fn test_history_from_analysis() {
    let mut history = SignalHistory::with_capacity(3);
    let flat = create_candles(&[100.0; 40]);
    let analysis = analyze(&flat, &AnalysisConfig::default()).unwrap();

    let confluence = &analysis.confluence;
    assert!(history.record(confluence.action, confluence.score, analysis.snapshot.price, 1));
    assert!(!history.record(confluence.action, confluence.score, analysis.snapshot.price, 2));

    let latest = history.latest().unwrap();
    assert_eq!(latest.action, Action::Neutral);
    assert_eq!(latest.color_tag, ColorTag::Neutral);
}

#[test]
fn test_monitor_alerts_on_regime_change() {
    let monitor = SignalMonitor::new();
    let config = AnalysisConfig::default();

    let flat = create_candles(&[100.0; 60]);
    let rising: Vec<f64> = (0..60).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let rising = create_candles(&rising);

    let (_, alert) = monitor.evaluate("BTC", &flat, &config).unwrap();
    assert!(alert);
    let (_, alert) = monitor.evaluate("BTC", &flat, &config).unwrap();
    assert!(!alert);
    let (analysis, alert) = monitor.evaluate("BTC", &rising, &config).unwrap();
    assert!(alert);

    let history = monitor.history("btc", Timeframe::OneHour);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].action, analysis.confluence.action);
    assert_eq!(history[1].score, analysis.confluence.score);
}
