//! Confluence scoring: per-indicator sub-signals, weighting and action.
//!
//! Each indicator family has one evaluator implementing [`SubSignal`].
//! Thresholds live in ordered band tables so the cut-offs can be read and
//! tested apart from the evaluation logic.

use std::cmp::Ordering;

use tracing::debug;

use super::indicators::series::compare;
use crate::types::{
    Action, BreakdownEntry, ConfluenceResult, DivergenceKind, IndicatorKey, IndicatorSnapshot,
    ObvTrend, SignalVector,
};

/// Boundary of a threshold band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Below(f64),
    AtMost(f64),
    Above(f64),
    AtLeast(f64),
}

impl Edge {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Edge::Below(limit) => value < limit,
            Edge::AtMost(limit) => value <= limit,
            Edge::Above(limit) => value > limit,
            Edge::AtLeast(limit) => value >= limit,
        }
    }
}

/// A threshold band and the signal it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub edge: Edge,
    pub signal: f64,
}

const fn band(edge: Edge, signal: f64) -> Band {
    Band { edge, signal }
}

/// Signal of the first matching band; 0 when none matches.
pub fn evaluate_bands(bands: &[Band], value: f64) -> f64 {
    bands
        .iter()
        .find(|b| b.edge.matches(value))
        .map_or(0.0, |b| b.signal)
}

pub const RSI_BANDS: [Band; 6] = [
    band(Edge::Below(20.0), 1.0),
    band(Edge::Below(30.0), 0.7),
    band(Edge::Below(40.0), 0.3),
    band(Edge::Above(80.0), -1.0),
    band(Edge::Above(70.0), -0.7),
    band(Edge::Above(60.0), -0.3),
];

/// Strong uptrend: only dips count, overbought readings are trend strength.
pub const RSI_UPTREND_BANDS: [Band; 3] = [
    band(Edge::Below(30.0), 1.0),
    band(Edge::Below(40.0), 0.7),
    band(Edge::Below(50.0), 0.3),
];

/// Strong downtrend: only rallies count.
pub const RSI_DOWNTREND_BANDS: [Band; 3] = [
    band(Edge::Above(70.0), -1.0),
    band(Edge::Above(60.0), -0.7),
    band(Edge::Above(50.0), -0.3),
];

/// Bollinger %B.
pub const BOLLINGER_BANDS: [Band; 6] = [
    band(Edge::AtMost(0.0), 1.0),
    band(Edge::Below(0.05), 0.8),
    band(Edge::Below(0.2), 0.4),
    band(Edge::AtLeast(1.0), -1.0),
    band(Edge::Above(0.95), -0.8),
    band(Edge::Above(0.8), -0.4),
];

/// Stochastic %K zones.
pub const STOCHASTIC_BANDS: [Band; 2] = [
    band(Edge::Below(20.0), 0.6),
    band(Edge::Above(80.0), -0.6),
];

/// ADX strength, signed later by DI direction.
pub const ADX_BANDS: [Band; 3] = [
    band(Edge::AtLeast(40.0), 1.0),
    band(Edge::Above(25.0), 0.7),
    band(Edge::Above(20.0), 0.3),
];

/// Trend regime from ADX and the directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendRegime {
    Up,
    Down,
    Ranging,
}

impl TrendRegime {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        let adx = &snapshot.adx;
        match (adx.strong_trend, adx.plus_di, adx.minus_di) {
            (true, Some(plus), Some(minus)) if plus > minus => TrendRegime::Up,
            (true, Some(plus), Some(minus)) if minus > plus => TrendRegime::Down,
            _ => TrendRegime::Ranging,
        }
    }

    /// Zero out mean-reversion signals that fight a strong trend.
    pub fn filter(&self, signal: f64) -> f64 {
        match self {
            TrendRegime::Up if signal < 0.0 => 0.0,
            TrendRegime::Down if signal > 0.0 => 0.0,
            _ => signal,
        }
    }
}

/// One indicator family's contribution to the confluence score.
pub trait SubSignal: Send + Sync {
    fn key(&self) -> IndicatorKey;

    /// Signed opinion in [-1, 1]; 0 when the indicator is undefined.
    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64;
}

pub struct RsiSignal;

impl SubSignal for RsiSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Rsi
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let Some(rsi) = snapshot.rsi else {
            return 0.0;
        };
        let bands: &[Band] = match TrendRegime::from_snapshot(snapshot) {
            TrendRegime::Up => &RSI_UPTREND_BANDS,
            TrendRegime::Down => &RSI_DOWNTREND_BANDS,
            TrendRegime::Ranging => &RSI_BANDS,
        };
        evaluate_bands(bands, rsi)
    }
}

pub struct MacdCrossSignal;

impl SubSignal for MacdCrossSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::MacdCross
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let macd = &snapshot.macd;
        if macd.bullish_cross {
            return 1.0;
        }
        if macd.bearish_cross {
            return -1.0;
        }

        // No fresh cross: histogram momentum
        match (macd.histogram, macd.prev_histogram) {
            (Some(h), Some(prev)) if h > 0.0 && h > prev => 0.5,
            (Some(h), _) if h > 0.0 => 0.2,
            (Some(h), Some(prev)) if h < 0.0 && h < prev => -0.5,
            (Some(h), _) if h < 0.0 => -0.2,
            _ => 0.0,
        }
    }
}

pub struct DivergenceSignal;

impl SubSignal for DivergenceSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::MacdDivergence
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let divergence = &snapshot.divergence;
        let (d, magnitude) = if let Some(d) = &divergence.macd {
            (d, 0.5 + d.strength / 200.0)
        } else if let Some(d) = &divergence.rsi {
            (d, 0.4 + d.strength / 250.0)
        } else {
            return 0.0;
        };

        match d.kind {
            DivergenceKind::Bullish => magnitude.min(1.0),
            DivergenceKind::Bearish => -magnitude.min(1.0),
        }
    }
}

pub struct BollingerSignal;

impl SubSignal for BollingerSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::BollingerBands
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let Some(percent_b) = snapshot.bollinger.percent_b else {
            return 0.0;
        };
        TrendRegime::from_snapshot(snapshot).filter(evaluate_bands(&BOLLINGER_BANDS, percent_b))
    }
}

pub struct StochasticSignal;

impl SubSignal for StochasticSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::Stochastic
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let stoch = &snapshot.stochastic;
        let Some(k) = stoch.k else {
            return 0.0;
        };

        let zone = evaluate_bands(&STOCHASTIC_BANDS, k);
        let signal = if zone > 0.0 && stoch.bullish_cross {
            1.0
        } else if zone < 0.0 && stoch.bearish_cross {
            -1.0
        } else if zone != 0.0 {
            zone
        } else if stoch.bullish_cross {
            0.3
        } else if stoch.bearish_cross {
            -0.3
        } else {
            0.0
        };

        TrendRegime::from_snapshot(snapshot).filter(signal)
    }
}

pub struct EmaCrossSignal;

impl SubSignal for EmaCrossSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::EmaCross
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let ma = &snapshot.moving_averages;
        let (Some(fast), Some(slow)) = (ma.ema9, ma.ema21) else {
            return 0.0;
        };

        let base: f64 = if ma.ema_bullish_cross {
            0.8
        } else if ma.ema_bearish_cross {
            -0.8
        } else {
            match compare(fast, slow) {
                Ordering::Greater => 0.5,
                Ordering::Less => -0.5,
                Ordering::Equal => 0.0,
            }
        };

        // Long-term filter: SMA200, or SMA50 while SMA200 warms up
        let side = ma.sma200.or(ma.sma50).map(|filter| compare(snapshot.price, filter));
        match side {
            Some(Ordering::Greater) if base > 0.0 => (base + 0.2).min(1.0),
            Some(Ordering::Less) if base < 0.0 => (base - 0.2).max(-1.0),
            _ => base,
        }
    }
}

pub struct AdxTrendSignal;

impl SubSignal for AdxTrendSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::AdxTrend
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let adx = &snapshot.adx;
        let (Some(value), Some(plus), Some(minus)) = (adx.adx, adx.plus_di, adx.minus_di) else {
            return 0.0;
        };

        let direction = if plus > minus {
            1.0
        } else if minus > plus {
            -1.0
        } else {
            0.0
        };
        evaluate_bands(&ADX_BANDS, value) * direction
    }
}

pub struct VolumeSignal;

impl SubSignal for VolumeSignal {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::VolumeObv
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let base: f64 = match snapshot.obv.trend {
            Some(ObvTrend::Rising) => 0.5,
            Some(ObvTrend::Falling) => -0.5,
            _ => return 0.0,
        };

        // VWAP side agreeing with OBV flow
        match snapshot.above_vwap() {
            Some(true) if base > 0.0 => (base + 0.3).min(1.0),
            Some(false) if base < 0.0 => (base - 0.3).max(-1.0),
            _ => base,
        }
    }
}

/// Get all sub-signal evaluators.
pub fn all_signals() -> Vec<Box<dyn SubSignal>> {
    vec![
        Box::new(RsiSignal),
        Box::new(MacdCrossSignal),
        Box::new(DivergenceSignal),
        Box::new(BollingerSignal),
        Box::new(StochasticSignal),
        Box::new(EmaCrossSignal),
        Box::new(AdxTrendSignal),
        Box::new(VolumeSignal),
    ]
}

/// Round and clamp a value to the score range.
pub fn clamp_score(value: f64) -> i8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(-100.0, 100.0) as i8
}

/// Weighted score: sum of signal * weight over all keys (weights sum to 100).
pub fn weighted_score(signals: &SignalVector) -> i8 {
    let total: f64 = signals.iter().map(|(key, signal)| signal * key.weight()).sum();
    clamp_score(total)
}

/// Breakdown rows ranked by absolute contribution; ties keep key order.
pub fn breakdown(signals: &SignalVector) -> Vec<BreakdownEntry> {
    let mut rows: Vec<BreakdownEntry> = signals
        .iter()
        .map(|(key, signal)| BreakdownEntry {
            key,
            name: key.name().to_string(),
            signal,
            weight: key.weight(),
            contribution: signal * key.weight(),
        })
        .collect();

    rows.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    rows
}

/// Composes the sub-signal evaluators into a confluence result.
pub struct ConfluenceScorer {
    signals: Vec<Box<dyn SubSignal>>,
}

impl Default for ConfluenceScorer {
    fn default() -> Self {
        Self {
            signals: all_signals(),
        }
    }
}

impl ConfluenceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every sub-signal. Keys without an evaluator stay neutral.
    pub fn signal_vector(&self, snapshot: &IndicatorSnapshot) -> SignalVector {
        let mut vector = SignalVector::new();
        for signal in &self.signals {
            vector.set(signal.key(), signal.evaluate(snapshot));
        }
        vector
    }

    pub fn score(&self, snapshot: &IndicatorSnapshot) -> ConfluenceResult {
        let signals = self.signal_vector(snapshot);
        let score = weighted_score(&signals);
        let action = Action::from_score(score);

        debug!("Confluence score {} -> {}", score, action.label());

        ConfluenceResult {
            score,
            action,
            forced: false,
            breakdown: breakdown(&signals),
            signals,
        }
    }
}
