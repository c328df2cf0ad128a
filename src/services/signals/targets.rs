//! Entry, stop-loss and take-profit levels.

use crate::types::{Action, IndicatorSnapshot, TakeProfit, Targets};

/// Stop distance in ATRs.
pub const STOP_ATR_MULTIPLE: f64 = 1.5;

/// Fallback take-profit distances in ATRs.
pub const TAKE_PROFIT_ATR_MULTIPLES: [f64; 2] = [2.0, 3.0];

/// Maximum number of take-profit levels.
pub const MAX_TAKE_PROFITS: usize = 2;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reward / risk to the first take-profit, rounded to two decimals.
pub fn risk_reward(entry: f64, stop_loss: f64, take_profit: f64) -> Option<f64> {
    let risk = (entry - stop_loss).abs();
    if risk == 0.0 || !risk.is_finite() {
        return None;
    }
    Some(round2((take_profit - entry).abs() / risk))
}

/// Compute trade levels for `action`. Neutral actions get empty targets.
pub fn calculate(snapshot: &IndicatorSnapshot, action: Action) -> Targets {
    let direction = action.direction();
    if direction == 0.0 {
        return Targets::default();
    }

    let entry = snapshot.price;
    let atr = snapshot.atr_or_fallback();
    let stop_loss = entry - direction * STOP_ATR_MULTIPLE * atr;

    let mut take_profits = fibonacci_targets(snapshot, entry, direction);
    if take_profits.is_empty() {
        take_profits = TAKE_PROFIT_ATR_MULTIPLES
            .iter()
            .map(|multiple| TakeProfit {
                price: entry + direction * multiple * atr,
                label: format!("{}x ATR", multiple),
            })
            .collect();
    }

    let risk_reward = take_profits
        .first()
        .and_then(|tp| risk_reward(entry, stop_loss, tp.price));

    Targets {
        entry: Some(entry),
        stop_loss: Some(stop_loss),
        take_profits,
        risk_reward,
    }
}

/// Nearest retracement levels strictly beyond `entry` in the trade direction.
fn fibonacci_targets(snapshot: &IndicatorSnapshot, entry: f64, direction: f64) -> Vec<TakeProfit> {
    let Some(fib) = &snapshot.fibonacci else {
        return Vec::new();
    };

    let mut levels: Vec<_> = fib
        .retracements
        .iter()
        .filter(|level| (level.price - entry) * direction > 0.0)
        .collect();
    levels.sort_by(|a, b| (a.price - entry).abs().total_cmp(&(b.price - entry).abs()));

    levels
        .into_iter()
        .take(MAX_TAKE_PROFITS)
        .map(|level| TakeProfit {
            price: level.price,
            label: format!("Fib {}", level.label),
        })
        .collect()
}
