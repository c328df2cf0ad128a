//! Human-oriented trade plan built from the snapshot, score and targets.

use std::cmp::Ordering;

use super::indicators::series::{approx_eq, compare};
use crate::types::{
    Action, AnalysisConfig, DivergenceKind, IndicatorSnapshot, PriceRange, Targets, TradePlan,
};

/// Reasons kept in a plan.
pub const MAX_REASONS: usize = 5;

/// Envelope half-width in ATRs when Bollinger bands are unavailable.
pub const ENVELOPE_ATR_MULTIPLE: f64 = 2.0;

/// Format a price with precision suited to its magnitude.
pub fn format_price(price: f64) -> String {
    let abs = price.abs();
    if abs >= 100.0 {
        format!("{:.2}", price)
    } else if abs >= 1.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.6}", price)
    }
}

/// Format a duration in minutes as "~N min", "~N hours" or "~N days".
pub fn format_hold_time(minutes: u32) -> String {
    fn unit(value: f64, singular: &str, plural: &str) -> String {
        let rounded = (value * 10.0).round() / 10.0;
        let name = if rounded == 1.0 { singular } else { plural };
        format!("~{} {}", rounded, name)
    }

    if minutes < 60 {
        format!("~{} min", minutes)
    } else if minutes < 1440 {
        unit(minutes as f64 / 60.0, "hour", "hours")
    } else {
        unit(minutes as f64 / 1440.0, "day", "days")
    }
}

/// Bollinger envelope, or price +/- 2 ATR when the bands are undefined or
/// collapsed.
pub fn envelope(snapshot: &IndicatorSnapshot) -> PriceRange {
    match (snapshot.bollinger.lower, snapshot.bollinger.upper) {
        (Some(low), Some(high)) if high > low && !approx_eq(low, high) => {
            PriceRange { low, high }
        }
        _ => {
            let width = ENVELOPE_ATR_MULTIPLE * snapshot.atr_or_fallback();
            PriceRange {
                low: snapshot.price - width,
                high: snapshot.price + width,
            }
        }
    }
}

/// Reasons in fixed priority order, first five that hold.
pub fn reasons(snapshot: &IndicatorSnapshot) -> Vec<String> {
    let mut reasons = Vec::new();

    match snapshot.rsi {
        Some(rsi) if rsi < 30.0 => reasons.push(format!("RSI oversold ({:.1})", rsi)),
        Some(rsi) if rsi > 70.0 => reasons.push(format!("RSI overbought ({:.1})", rsi)),
        _ => {}
    }

    if snapshot.macd.bullish_cross {
        reasons.push("MACD bullish crossover".to_string());
    } else if snapshot.macd.bearish_cross {
        reasons.push("MACD bearish crossover".to_string());
    }

    match snapshot.stochastic.k {
        Some(k) if k < 20.0 => reasons.push(format!("Stochastic oversold ({:.1})", k)),
        Some(k) if k > 80.0 => reasons.push(format!("Stochastic overbought ({:.1})", k)),
        _ => {}
    }

    let ma = &snapshot.moving_averages;
    if let (Some(fast), Some(slow)) = (ma.ema9, ma.ema21) {
        match compare(fast, slow) {
            Ordering::Greater => reasons.push("EMA9 above EMA21".to_string()),
            Ordering::Less => reasons.push("EMA9 below EMA21".to_string()),
            Ordering::Equal => {}
        }
    }

    match snapshot.bollinger.percent_b {
        Some(b) if b <= 0.05 => reasons.push("Price at lower Bollinger band".to_string()),
        Some(b) if b >= 0.95 => reasons.push("Price at upper Bollinger band".to_string()),
        _ => {}
    }

    if let Some(adx) = snapshot.adx.adx.filter(|adx| *adx > 25.0) {
        reasons.push(format!("Strong trend (ADX {:.1})", adx));
    }

    match snapshot.above_vwap() {
        Some(true) => reasons.push("Price above VWAP".to_string()),
        Some(false) => reasons.push("Price below VWAP".to_string()),
        None => {}
    }

    let divergence = &snapshot.divergence;
    let active = divergence
        .macd
        .map(|d| (d, "MACD"))
        .or(divergence.rsi.map(|d| (d, "RSI")));
    if let Some((d, source)) = active {
        let kind = match d.kind {
            DivergenceKind::Bullish => "Bullish",
            DivergenceKind::Bearish => "Bearish",
        };
        reasons.push(format!("{} {} divergence", kind, source));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// Build the trade plan for `action`.
pub fn build(
    snapshot: &IndicatorSnapshot,
    action: Action,
    targets: &Targets,
    config: &AnalysisConfig,
) -> TradePlan {
    let range = envelope(snapshot);
    let reasons = reasons(snapshot);

    let direction = action.direction();
    if direction == 0.0 {
        return TradePlan {
            action,
            summary: format!(
                "NEUTRAL: wait for a clearer signal between {} and {}",
                format_price(range.low),
                format_price(range.high)
            ),
            entry: None,
            exit: None,
            stop_loss: None,
            hold_time: None,
            expected_move: None,
            expected_move_pct: None,
            support: range.low,
            resistance: range.high,
            vwap_zone: snapshot.vwap,
            reasons,
            most_possible_range: range,
        };
    }

    let timeframe = config.timeframe;
    let swing = timeframe.swing_candles();
    let expected_move = snapshot.atr_or_fallback() * (swing as f64).sqrt();
    let expected_move_pct = if snapshot.price != 0.0 {
        Some(expected_move / snapshot.price.abs() * 100.0)
    } else {
        None
    };

    let entry = targets.entry.unwrap_or(snapshot.price);
    let exit = targets
        .take_profits
        .first()
        .map(|tp| tp.price)
        .unwrap_or(entry + direction * expected_move);

    TradePlan {
        action,
        summary: format!(
            "{} @ {} → {} @ {}",
            action.label(),
            format_price(entry),
            action.exit_action().label(),
            format_price(exit)
        ),
        entry: Some(entry),
        exit: Some(exit),
        stop_loss: targets.stop_loss,
        hold_time: Some(format_hold_time(swing * timeframe.candle_minutes())),
        expected_move: Some(expected_move),
        expected_move_pct,
        support: range.low,
        resistance: range.high,
        vwap_zone: snapshot.vwap,
        reasons,
        most_possible_range: range,
    }
}
