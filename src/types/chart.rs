use serde::{Deserialize, Serialize};

/// OHLCV candle. Series are ordered by ascending `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Typical price: (high + low + close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Candle timeframe the series was sampled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    /// Get the timeframe from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1m" => Some(Timeframe::OneMinute),
            "5m" => Some(Timeframe::FiveMinutes),
            "15m" => Some(Timeframe::FifteenMinutes),
            "1h" | "60m" => Some(Timeframe::OneHour),
            "4h" => Some(Timeframe::FourHours),
            "1d" | "24h" => Some(Timeframe::OneDay),
            _ => None,
        }
    }

    /// Short label, as accepted by `from_str`.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
        }
    }

    /// Minutes covered by one candle.
    pub fn candle_minutes(&self) -> u32 {
        match self {
            Timeframe::OneMinute => 1,
            Timeframe::FiveMinutes => 5,
            Timeframe::FifteenMinutes => 15,
            Timeframe::OneHour => 60,
            Timeframe::FourHours => 240,
            Timeframe::OneDay => 1440,
        }
    }

    /// Typical number of candles a swing lasts on this timeframe.
    /// Scales both hold time and expected move.
    pub fn swing_candles(&self) -> u32 {
        match self {
            Timeframe::OneMinute => 15, // ~15 minutes
            Timeframe::FiveMinutes => 12, // ~1 hour
            Timeframe::FifteenMinutes => 8, // ~2 hours
            Timeframe::OneHour => 6, // ~6 hours
            Timeframe::FourHours => 6, // ~1 day
            Timeframe::OneDay => 5, // ~1 week of sessions
        }
    }
}
