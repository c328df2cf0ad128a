use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Timeframe;

/// Recommended action derived from the confluence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Action {
    /// Classify a score (-100 to +100).
    ///
    /// The neutral band is exclusive on both sides: 30 is a buy, -30 a sell.
    pub fn from_score(score: i8) -> Self {
        match score {
            s if s >= 60 => Action::StrongBuy,
            s if s >= 30 => Action::Buy,
            s if s > -30 => Action::Neutral,
            s if s > -60 => Action::Sell,
            _ => Action::StrongSell,
        }
    }

    /// Upper-case label used in summaries, e.g. "STRONG_BUY".
    pub fn label(&self) -> &'static str {
        match self {
            Action::StrongBuy => "STRONG_BUY",
            Action::Buy => "BUY",
            Action::Neutral => "NEUTRAL",
            Action::Sell => "SELL",
            Action::StrongSell => "STRONG_SELL",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Action::StrongBuy | Action::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Action::StrongSell | Action::Sell)
    }

    /// +1 for buys, -1 for sells, 0 for neutral.
    pub fn direction(&self) -> f64 {
        if self.is_buy() {
            1.0
        } else if self.is_sell() {
            -1.0
        } else {
            0.0
        }
    }

    /// Action that closes a position opened by this one.
    pub fn exit_action(&self) -> Action {
        if self.is_buy() {
            Action::Sell
        } else if self.is_sell() {
            Action::Buy
        } else {
            Action::Neutral
        }
    }

    pub fn color_tag(&self) -> ColorTag {
        match self {
            Action::StrongBuy => ColorTag::StrongBullish,
            Action::Buy => ColorTag::Bullish,
            Action::Neutral => ColorTag::Neutral,
            Action::Sell => ColorTag::Bearish,
            Action::StrongSell => ColorTag::StrongBearish,
        }
    }
}

/// Color hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

/// Sub-signals that feed the confluence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    #[serde(rename = "rsi")]
    Rsi,
    #[serde(rename = "macdCross")]
    MacdCross,
    #[serde(rename = "macdDivergence")]
    MacdDivergence,
    #[serde(rename = "bollingerBands")]
    BollingerBands,
    #[serde(rename = "stochastic")]
    Stochastic,
    #[serde(rename = "emaCross")]
    EmaCross,
    #[serde(rename = "adxTrend")]
    AdxTrend,
    #[serde(rename = "volumeOBV")]
    VolumeObv,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 8] = [
        IndicatorKey::Rsi,
        IndicatorKey::MacdCross,
        IndicatorKey::MacdDivergence,
        IndicatorKey::BollingerBands,
        IndicatorKey::Stochastic,
        IndicatorKey::EmaCross,
        IndicatorKey::AdxTrend,
        IndicatorKey::VolumeObv,
    ];

    /// Weight in the confluence score. Weights sum to 100.
    pub fn weight(&self) -> f64 {
        match self {
            IndicatorKey::Rsi => 15.0,
            IndicatorKey::MacdCross => 20.0,
            IndicatorKey::MacdDivergence => 15.0,
            IndicatorKey::BollingerBands => 10.0,
            IndicatorKey::Stochastic => 10.0,
            IndicatorKey::EmaCross => 15.0,
            IndicatorKey::AdxTrend => 10.0,
            IndicatorKey::VolumeObv => 5.0,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKey::Rsi => "RSI (14)",
            IndicatorKey::MacdCross => "MACD Cross",
            IndicatorKey::MacdDivergence => "MACD Divergence",
            IndicatorKey::BollingerBands => "Bollinger Bands",
            IndicatorKey::Stochastic => "Stochastic",
            IndicatorKey::EmaCross => "EMA Cross",
            IndicatorKey::AdxTrend => "ADX Trend",
            IndicatorKey::VolumeObv => "Volume / OBV",
        }
    }
}

/// Signed sub-signal per indicator, each in [-1, 1].
///
/// Every key is always present; unset keys read as 0 (neutral).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalVector(BTreeMap<IndicatorKey, f64>);

impl Default for SignalVector {
    fn default() -> Self {
        Self(IndicatorKey::ALL.iter().map(|k| (*k, 0.0)).collect())
    }
}

impl SignalVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a sub-signal, clamped to [-1, 1]. Non-finite values read as neutral.
    pub fn set(&mut self, key: IndicatorKey, signal: f64) {
        let value = if signal.is_finite() {
            signal.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.0.insert(key, value);
    }

    pub fn get(&self, key: IndicatorKey) -> f64 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// One row of the score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub key: IndicatorKey,
    pub name: String,
    pub signal: f64,
    pub weight: f64,
    /// signal * weight, in score points.
    pub contribution: f64,
}

/// Aggregated confluence score and action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfluenceResult {
    /// Weighted score from -100 (strong sell) to +100 (strong buy).
    pub score: i8,
    pub action: Action,
    /// Whether the action came from the forced-bias override.
    pub forced: bool,
    pub signals: SignalVector,
    /// Ranked by absolute contribution, largest first.
    pub breakdown: Vec<BreakdownEntry>,
}

/// Entry in the signal history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub action: Action,
    pub score: i8,
    pub price: f64,
    /// Unix timestamp (milliseconds).
    pub timestamp: i64,
    pub color_tag: ColorTag,
}

/// Options for a single analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub timeframe: Timeframe,
    /// Replace the score-based action with a momentum-weighted up/down call.
    #[serde(default)]
    pub forced_bias: bool,
}
