//! Forced directional bias.
//!
//! Replaces the score-based action with an up/down call that blends the
//! confluence score with short-term price momentum.

use tracing::debug;

use crate::types::{Action, ConfluenceResult, IndicatorSnapshot};

/// Number of trailing close deltas in the momentum window.
pub const MOMENTUM_WINDOW: usize = 5;

/// Bias magnitude for a strong call.
pub const STRONG_BIAS: f64 = 0.6;

/// Linearly weighted momentum of the last five close deltas, most recent
/// heaviest, in ATR units and clamped to [-1, 1].
pub fn momentum(snapshot: &IndicatorSnapshot) -> f64 {
    let closes = &snapshot.series.closes;
    if closes.len() < 2 {
        return 0.0;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let window = &deltas[deltas.len().saturating_sub(MOMENTUM_WINDOW)..];

    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    for (i, delta) in window.iter().enumerate() {
        let weight = (i + 1) as f64;
        weighted += delta * weight;
        weight_sum += weight;
    }

    let atr = snapshot.atr_or_fallback();
    if weight_sum == 0.0 || atr <= 0.0 {
        return 0.0;
    }

    let value = weighted / (weight_sum * atr);
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Blend of score and momentum, in [-1, 1].
pub fn bias(snapshot: &IndicatorSnapshot, score: i8) -> f64 {
    0.5 * score as f64 / 100.0 + 0.5 * momentum(snapshot)
}

/// Action for a bias value. Never neutral.
pub fn bias_action(bias: f64) -> Action {
    if bias >= STRONG_BIAS {
        Action::StrongBuy
    } else if bias >= 0.0 {
        Action::Buy
    } else if bias <= -STRONG_BIAS {
        Action::StrongSell
    } else {
        Action::Sell
    }
}

/// Override the action on `result`; the score is left unchanged.
pub fn apply(snapshot: &IndicatorSnapshot, result: &mut ConfluenceResult) {
    let value = bias(snapshot, result.score);
    let action = bias_action(value);

    debug!(
        "Forced bias {:.3}: {} -> {}",
        value,
        result.action.label(),
        action.label()
    );

    result.action = action;
    result.forced = true;
}
