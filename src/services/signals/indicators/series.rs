//! Smoothing primitives shared by every indicator.
//!
//! Series helpers return a vector aligned with their input: index `i` of the
//! output belongs to index `i` of the input, and is `None` until the
//! warm-up period has elapsed.

use std::cmp::Ordering;

use crate::types::Candle;

/// Relative tolerance under which two values count as equal.
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// Simple moving average of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let mut sum: f64 = values.iter().take(period).sum();
    result[period - 1] = Some(sum / period as f64);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        result[i] = Some(sum / period as f64);
    }

    result
}

/// Exponential moving average seeded with the SMA of the first `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let mut ema = values.iter().take(period).sum::<f64>() / period as f64;
    result[period - 1] = Some(ema);

    for i in period..values.len() {
        ema = (values[i] - ema) * multiplier + ema;
        result[i] = Some(ema);
    }

    result
}

/// EMA over the defined portion of an optional series, realigned to the
/// original indices. The defined portion must be contiguous.
pub fn ema_defined(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    realign(series, |values| ema(values, period))
}

/// Wilder smoothing: seed with the mean of the first `period` values, then
/// `(prev * (period - 1) + value) / period`.
pub fn wilder(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let mut smoothed = values.iter().take(period).sum::<f64>() / period as f64;
    result[period - 1] = Some(smoothed);

    for i in period..values.len() {
        smoothed = (smoothed * (period - 1) as f64 + values[i]) / period as f64;
        result[i] = Some(smoothed);
    }

    result
}

/// Wilder smoothing over the defined portion of an optional series.
pub fn wilder_defined(series: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    realign(series, |values| wilder(values, period))
}

fn realign<F>(series: &[Option<f64>], transform: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Vec<Option<f64>>,
{
    let mut result = vec![None; series.len()];
    let start = match series.iter().position(Option::is_some) {
        Some(start) => start,
        None => return result,
    };

    let defined: Vec<f64> = series[start..].iter().map_while(|v| *v).collect();
    for (offset, value) in transform(&defined).into_iter().enumerate() {
        result[start + offset] = value;
    }

    result
}

/// Population standard deviation around `mean`.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance: f64 =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// True Range: max(high - low, |high - prev close|, |low - prev close|).
pub fn true_range(current: &Candle, previous: &Candle) -> f64 {
    let hl = current.high - current.low;
    let hc = (current.high - previous.close).abs();
    let lc = (current.low - previous.close).abs();
    hl.max(hc).max(lc)
}

/// Value at the last index.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Value at the second-to-last index.
pub fn previous(series: &[Option<f64>]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    series[series.len() - 2]
}

/// Equal within rounding: `|a - b| <= 1e-9 * max(|a|, |b|)`.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_EPSILON * a.abs().max(b.abs())
}

/// Ordering that treats values equal within rounding as equal.
pub fn compare(a: f64, b: f64) -> Ordering {
    if approx_eq(a, b) {
        Ordering::Equal
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Whether `a` crossed above `b` between the previous and the latest bar.
pub fn crossed_above(a: &[Option<f64>], b: &[Option<f64>]) -> bool {
    match (previous(a), previous(b), latest(a), latest(b)) {
        (Some(pa), Some(pb), Some(ca), Some(cb)) => {
            compare(pa, pb) != Ordering::Greater && compare(ca, cb) == Ordering::Greater
        }
        _ => false,
    }
}

/// Whether `a` crossed below `b` between the previous and the latest bar.
pub fn crossed_below(a: &[Option<f64>], b: &[Option<f64>]) -> bool {
    match (previous(a), previous(b), latest(a), latest(b)) {
        (Some(pa), Some(pb), Some(ca), Some(cb)) => {
            compare(pa, pb) != Ordering::Less && compare(ca, cb) == Ordering::Less
        }
        _ => false,
    }
}
