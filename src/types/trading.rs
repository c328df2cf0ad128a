use serde::{Deserialize, Serialize};

use super::{Action, ConfluenceResult, IndicatorSnapshot};

/// A take-profit level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfit {
    pub price: f64,
    /// Where the level came from, e.g. "Fib 61.8%" or "2x ATR".
    pub label: String,
}

/// Entry, stop and take-profit levels. Empty for neutral actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profits: Vec<TakeProfit>,
    /// Reward / risk to the first take-profit, two decimals.
    pub risk_reward: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Human-oriented trade plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    pub action: Action,
    pub summary: String,
    pub entry: Option<f64>,
    pub exit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub hold_time: Option<String>,
    pub expected_move: Option<f64>,
    pub expected_move_pct: Option<f64>,
    pub support: f64,
    pub resistance: f64,
    pub vwap_zone: Option<f64>,
    /// At most five, in fixed priority order.
    pub reasons: Vec<String>,
    /// Most possible outcome band.
    pub most_possible_range: PriceRange,
}

/// Everything one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub snapshot: IndicatorSnapshot,
    pub confluence: ConfluenceResult,
    pub targets: Targets,
    pub plan: TradePlan,
}
