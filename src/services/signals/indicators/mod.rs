//! Technical indicator implementations.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod divergence;
pub mod fibonacci;
pub mod macd;
pub mod moving_average;
pub mod obv;
pub mod rsi;
pub mod series;
pub mod stochastic;
pub mod vwap;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use divergence::DivergenceDetector;
pub use fibonacci::Fibonacci;
pub use macd::Macd;
pub use moving_average::MovingAverages;
pub use obv::Obv;
pub use rsi::Rsi;
pub use stochastic::Stochastic;
pub use vwap::Vwap;

use crate::types::Candle;

/// Trait for technical indicators computed over a candle series.
pub trait Indicator {
    /// What the indicator produces: a full series or a latest-bar state.
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Minimum number of candles before the indicator is defined.
    fn min_periods(&self) -> usize;

    /// Calculate from OHLCV candles. Too few candles yield undefined
    /// (`None`) values, never an error.
    fn calculate(&self, candles: &[Candle]) -> Self::Output;
}
