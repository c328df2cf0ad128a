//! Pivot-based price/oscillator divergence.

use crate::types::{Divergence, DivergenceKind};

/// Strength points per RSI point of divergence.
pub const RSI_STRENGTH_SCALE: f64 = 3.0;

/// Strength points per percent-of-price of MACD histogram divergence.
pub const MACD_STRENGTH_SCALE: f64 = 50.0;

/// Divergence detector over a trailing window.
///
/// A bar is a pivot low when its close is below the previous close and not
/// above the next one (highs mirror this). Only the two most recent pivots
/// of each kind are compared:
/// - Bullish: price makes a lower low while the oscillator makes a higher low
/// - Bearish: price makes a higher high while the oscillator makes a lower high
pub struct DivergenceDetector {
    lookback: usize,
}

impl Default for DivergenceDetector {
    fn default() -> Self {
        Self { lookback: 30 }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PivotKind {
    Low,
    High,
}

impl DivergenceDetector {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    /// RSI divergence; strength is the RSI delta times 3, capped at 100.
    pub fn rsi(&self, closes: &[f64], rsi: &[Option<f64>]) -> Option<Divergence> {
        self.detect(closes, rsi, RSI_STRENGTH_SCALE)
    }

    /// MACD histogram divergence; the histogram delta is measured in percent
    /// of the latest close so strength is independent of price scale.
    pub fn macd(&self, closes: &[f64], histogram: &[Option<f64>]) -> Option<Divergence> {
        let price = closes.last().copied().filter(|p| *p != 0.0)?;
        let scale = MACD_STRENGTH_SCALE * 100.0 / price.abs();
        self.detect(closes, histogram, scale)
    }

    /// Compare the two most recent pivots of each kind.
    ///
    /// When both kinds diverge, the one with the more recent pivot wins, and
    /// the stronger one on a tie.
    pub fn detect(
        &self,
        closes: &[f64],
        oscillator: &[Option<f64>],
        scale: f64,
    ) -> Option<Divergence> {
        let bullish = self.check(closes, oscillator, PivotKind::Low, scale);
        let bearish = self.check(closes, oscillator, PivotKind::High, scale);

        match (bullish, bearish) {
            (Some(bull), Some(bear)) => {
                if bull.second_index != bear.second_index {
                    Some(if bull.second_index > bear.second_index { bull } else { bear })
                } else if bull.strength >= bear.strength {
                    Some(bull)
                } else {
                    Some(bear)
                }
            }
            (bull, bear) => bull.or(bear),
        }
    }

    fn check(
        &self,
        closes: &[f64],
        oscillator: &[Option<f64>],
        kind: PivotKind,
        scale: f64,
    ) -> Option<Divergence> {
        let pivots = self.pivots(closes, oscillator, kind);
        let [.., first, second] = pivots.as_slice() else {
            return None;
        };
        let (first, second) = (*first, *second);

        let osc_first = oscillator[first]?;
        let osc_second = oscillator[second]?;

        let (price_diverges, osc_delta, divergence_kind) = match kind {
            PivotKind::Low => (
                closes[second] < closes[first] && osc_second > osc_first,
                osc_second - osc_first,
                DivergenceKind::Bullish,
            ),
            PivotKind::High => (
                closes[second] > closes[first] && osc_second < osc_first,
                osc_first - osc_second,
                DivergenceKind::Bearish,
            ),
        };

        if !price_diverges {
            return None;
        }

        Some(Divergence {
            kind: divergence_kind,
            strength: (osc_delta * scale).min(100.0),
            first_index: first,
            second_index: second,
        })
    }

    /// Pivot indices in the trailing window with a defined oscillator value.
    fn pivots(&self, closes: &[f64], oscillator: &[Option<f64>], kind: PivotKind) -> Vec<usize> {
        let n = closes.len().min(oscillator.len());
        if n < 3 {
            return Vec::new();
        }

        let start = n.saturating_sub(self.lookback).max(1);
        (start..n - 1)
            .filter(|&i| oscillator[i].is_some())
            .filter(|&i| match kind {
                PivotKind::Low => closes[i] < closes[i - 1] && closes[i] <= closes[i + 1],
                PivotKind::High => closes[i] > closes[i - 1] && closes[i] >= closes[i + 1],
            })
            .collect()
    }
}
