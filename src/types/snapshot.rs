use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::services::signals::indicators::series::compare;

/// MACD (12, 26, 9) state at the latest bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdState {
    pub line: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    pub prev_histogram: Option<f64>,
    /// MACD line crossed above the signal line on the latest bar.
    pub bullish_cross: bool,
    /// MACD line crossed below the signal line on the latest bar.
    pub bearish_cross: bool,
}

/// Stochastic (14, 3) state at the latest bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StochasticState {
    pub k: Option<f64>,
    pub d: Option<f64>,
    pub prev_k: Option<f64>,
    pub prev_d: Option<f64>,
    pub bullish_cross: bool,
    pub bearish_cross: bool,
}

/// EMA9 / EMA21 / SMA50 / SMA200 relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageState {
    pub ema9: Option<f64>,
    pub ema21: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub ema9_above_ema21: bool,
    pub price_above_sma50: bool,
    pub price_above_sma200: bool,
    /// EMA9 crossed above EMA21 on the latest bar.
    pub ema_bullish_cross: bool,
    /// EMA9 crossed below EMA21 on the latest bar.
    pub ema_bearish_cross: bool,
    /// SMA50 crossed above SMA200 on the latest bar.
    pub golden_cross: bool,
    /// SMA50 crossed below SMA200 on the latest bar.
    pub death_cross: bool,
}

/// ADX (14) with directional indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdxState {
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    /// ADX above 25.
    pub strong_trend: bool,
    /// +DI above -DI.
    pub bullish: bool,
}

/// Bollinger Bands (20, 2) at the latest bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerState {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    /// (close - lower) / (upper - lower). None when the bands collapse.
    pub percent_b: Option<f64>,
    /// (upper - lower) / middle. None when the bands collapse.
    pub bandwidth: Option<f64>,
    pub squeeze: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObvTrend {
    Rising,
    Falling,
    Flat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObvState {
    pub value: Option<f64>,
    pub trend: Option<ObvTrend>,
}

/// A single Fibonacci level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibLevel {
    pub ratio: f64,
    pub price: f64,
    /// Percentage label, e.g. "61.8%".
    pub label: String,
}

/// Fibonacci levels from the trailing swing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    pub swing_high: f64,
    pub swing_low: f64,
    pub uptrend: bool,
    pub retracements: Vec<FibLevel>,
    pub extensions: Vec<FibLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    Bullish,
    Bearish,
}

/// Price/oscillator divergence between the two most recent pivots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divergence {
    pub kind: DivergenceKind,
    /// 0 to 100.
    pub strength: f64,
    pub first_index: usize,
    pub second_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceState {
    pub rsi: Option<Divergence>,
    pub macd: Option<Divergence>,
}

impl DivergenceState {
    /// MACD divergence when present, otherwise RSI divergence.
    pub fn active(&self) -> Option<&Divergence> {
        self.macd.as_ref().or(self.rsi.as_ref())
    }
}

/// Full computed series kept for history-aware consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    pub closes: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
}

/// Latest value of every indicator family. Built fresh on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub time: i64,
    pub price: f64,
    pub candle_count: usize,
    pub rsi: Option<f64>,
    pub prev_rsi: Option<f64>,
    pub stochastic: StochasticState,
    pub macd: MacdState,
    pub moving_averages: MovingAverageState,
    pub adx: AdxState,
    pub bollinger: BollingerState,
    pub atr: Option<f64>,
    pub vwap: Option<f64>,
    pub obv: ObvState,
    pub fibonacci: Option<FibonacciLevels>,
    pub divergence: DivergenceState,
    #[serde(skip)]
    pub series: IndicatorSeries,
}

impl IndicatorSnapshot {
    /// ATR, or 1% of price when ATR is undefined or zero.
    pub fn atr_or_fallback(&self) -> f64 {
        match self.atr {
            Some(atr) if atr > 0.0 => atr,
            _ => self.price * 0.01,
        }
    }

    /// Whether the price is above VWAP. None when VWAP is undefined or equal
    /// within rounding.
    pub fn above_vwap(&self) -> Option<bool> {
        match compare(self.price, self.vwap?) {
            Ordering::Greater => Some(true),
            Ordering::Less => Some(false),
            Ordering::Equal => None,
        }
    }
}
