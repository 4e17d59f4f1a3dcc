//! Relative Strength Index (RSI) with a simple rolling average.
//!
//! The RSI is a momentum oscillator bounded to [0, 100]. Readings above 70 are
//! conventionally read as overbought and below 30 as oversold.
//!
//! # Algorithm
//!
//! 1. Day-over-day deltas `close[i] − close[i−1]` for `i ≥ 1`
//! 2. Gains `max(delta, 0)` and losses `max(−delta, 0)`
//! 3. Trailing simple mean of gains and of losses over `window` deltas
//! 4. `RS = avg_gain / avg_loss`, `RSI = 100 − 100 / (1 + RS)`
//!
//! Index 0 has no delta, so the first defined RSI is at index `window`. Earlier
//! points are `None`, never zero.
//!
//! # Boundary Conditions
//!
//! - **No losses in the window**: RSI = 100
//! - **No gains in the window**: RSI = 0
//! - **No movement at all**: the ratio is 0/0. [`FlatRsi`] selects the
//!   convention; the default reports 50.
//!
//! # Example
//!
//! ```
//! use signal_ta::indicators::rsi::rsi;
//!
//! let data = vec![44.0_f64, 44.5, 45.0, 44.5, 44.0, 44.5, 45.0];
//! let result = rsi(&data, 3).unwrap();
//!
//! assert_eq!(result.len(), 7);
//! assert_eq!(result.get(2), None);
//! assert!(result.get(3).is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kernels::RollingMean;
use crate::series::PriceSeries;
use crate::traits::{validate_window, SeriesElement};

/// Default RSI window.
pub const DEFAULT_RSI_WINDOW: usize = 14;

/// How a window with neither gains nor losses is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatRsi {
    /// Report the neutral midpoint, 50.
    #[default]
    Neutral,
    /// Report the point as undefined.
    Undefined,
}

/// RSI values aligned index-for-index with the input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiSeries<T> {
    window: usize,
    values: Vec<Option<T>>,
}

impl<T: SeriesElement> RsiSeries<T> {
    /// The window the series was computed with.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Number of points (equal to the input length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All points, `None` where undefined.
    #[must_use]
    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }

    /// The RSI at `index`, `None` if undefined or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined point.
    #[must_use]
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Iterates over `(index, value)` for defined points only.
    pub fn defined(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }
}

/// Number of leading undefined points for `window`.
///
/// ```
/// use signal_ta::indicators::rsi::rsi_lookback;
///
/// assert_eq!(rsi_lookback(14), 14);
/// ```
#[inline]
#[must_use]
pub const fn rsi_lookback(window: usize) -> usize {
    window
}

/// Computes the RSI with the default flat-window convention ([`FlatRsi::Neutral`]).
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `window` is zero.
pub fn rsi<T: SeriesElement>(data: &[T], window: usize) -> Result<RsiSeries<T>> {
    rsi_with(data, window, FlatRsi::default())
}

/// Computes the RSI with an explicit flat-window convention.
///
/// The output always has `data.len()` points; empty input yields an empty
/// series.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `window` is zero.
pub fn rsi_with<T: SeriesElement>(data: &[T], window: usize, flat: FlatRsi) -> Result<RsiSeries<T>> {
    validate_window("rsi_window", window)?;

    let hundred = T::from_usize(100)?;
    let mut gains = RollingMean::new(window)?;
    let mut losses = RollingMean::new(window)?;

    let mut values = Vec::with_capacity(data.len());
    if !data.is_empty() {
        values.push(None);
    }

    for i in 1..data.len() {
        let (gain, loss) = split_delta(data[i] - data[i - 1]);
        // The delta leaving the window; delta indices start at 1.
        let evicted = i
            .checked_sub(window)
            .filter(|&j| j >= 1)
            .map(|j| split_delta(data[j] - data[j - 1]));

        gains.update(gain, evicted.map(|(g, _)| g));
        losses.update(loss, evicted.map(|(_, l)| l));

        let value = match (gains.mean(), losses.mean()) {
            (Some(avg_gain), Some(avg_loss)) => rsi_value(avg_gain, avg_loss, flat, hundred),
            _ => None,
        };
        values.push(value);
    }

    Ok(RsiSeries { window, values })
}

#[inline]
fn split_delta<T: SeriesElement>(delta: T) -> (T, T) {
    if delta > T::zero() {
        (delta, T::zero())
    } else if delta < T::zero() {
        (T::zero(), -delta)
    } else {
        (T::zero(), T::zero())
    }
}

#[inline]
fn rsi_value<T: SeriesElement>(avg_gain: T, avg_loss: T, flat: FlatRsi, hundred: T) -> Option<T> {
    let zero = T::zero();

    if avg_loss == zero {
        if avg_gain == zero {
            return match flat {
                FlatRsi::Neutral => Some(hundred / T::two()),
                FlatRsi::Undefined => None,
            };
        }
        return Some(hundred);
    }

    let rs = avg_gain / avg_loss;
    let value = hundred - hundred / (T::one() + rs);
    // Rolling-sum drift can push a near-zero average slightly negative.
    Some(value.max(zero).min(hundred))
}

/// RSI configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use signal_ta::indicators::rsi::{FlatRsi, Rsi};
///
/// let prices = vec![10.0_f64, 10.0, 10.0, 10.0];
///
/// let neutral = Rsi::new().window(2).compute_slice(&prices).unwrap();
/// assert_eq!(neutral.get(2), Some(50.0));
///
/// let undefined = Rsi::new().window(2).flat(FlatRsi::Undefined).compute_slice(&prices).unwrap();
/// assert_eq!(undefined.get(2), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    window: usize,
    flat: FlatRsi,
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            window: DEFAULT_RSI_WINDOW,
            flat: FlatRsi::default(),
        }
    }
}

impl Rsi {
    /// Creates a configuration with the standard window (14).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window. Default: 14
    #[must_use]
    pub const fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the flat-window convention. Default: [`FlatRsi::Neutral`]
    #[must_use]
    pub const fn flat(mut self, flat: FlatRsi) -> Self {
        self.flat = flat;
        self
    }

    /// Returns the window.
    #[must_use]
    pub const fn get_window(&self) -> usize {
        self.window
    }

    /// Computes the RSI of a price series.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the window is zero.
    pub fn compute<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<RsiSeries<T>> {
        self.compute_slice(series.closes())
    }

    /// Computes the RSI of raw closes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the window is zero.
    pub fn compute_slice<T: SeriesElement>(&self, data: &[T]) -> Result<RsiSeries<T>> {
        rsi_with(data, self.window, self.flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const RSI_EPSILON: f64 = 1e-9;

    #[test]
    fn test_rsi_warm_up_is_undefined() {
        let data = vec![40.0_f64, 41.0, 40.5, 42.0, 41.0, 43.0];
        let result = rsi(&data, 3).unwrap();

        assert_eq!(result.len(), 6);
        assert_eq!(&result.values()[..3], &[None, None, None]);
        assert_eq!(result.first_defined(), Some(3));
        assert_eq!(result.window(), 3);
    }

    #[test]
    fn test_rsi_known_value() {
        // deltas over the window at index 3: +1.0, -0.5, +1.5
        // avg_gain = 2.5/3, avg_loss = 0.5/3, rs = 5, rsi = 100 - 100/6
        let data = vec![40.0_f64, 41.0, 40.5, 42.0];
        let result = rsi(&data, 3).unwrap();
        let expected = 100.0 - 100.0 / 6.0;
        assert!((result.get(3).unwrap() - expected).abs() < RSI_EPSILON);
    }

    #[test]
    fn test_rsi_window_slides() {
        // index 4 drops the +1.0 delta and adds -1.0
        // gains: 1.5, losses: 0.5 + 1.0, rs = 1, rsi = 50
        let data = vec![40.0_f64, 41.0, 40.5, 42.0, 41.0];
        let result = rsi(&data, 3).unwrap();
        assert!((result.get(4).unwrap() - 50.0).abs() < RSI_EPSILON);
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let data: Vec<f64> = (10..=20).map(f64::from).collect();
        let result = rsi(&data, 5).unwrap();

        for i in 5..result.len() {
            assert_eq!(result.get(i), Some(100.0), "index {i}");
        }
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let data: Vec<f64> = (10..=20).rev().map(f64::from).collect();
        let result = rsi(&data, 4).unwrap();

        for i in 4..result.len() {
            assert_eq!(result.get(i), Some(0.0), "index {i}");
        }
    }

    #[test]
    fn test_rsi_losses_leave_window_exactly() {
        // A single loss followed by gains: once the loss leaves the window
        // the RSI must be exactly 100, not 99.999...
        let data = vec![10.0_f64, 9.7, 10.1, 10.3, 10.6, 10.9];
        let result = rsi(&data, 3).unwrap();
        assert!(result.get(3).unwrap() < 100.0);
        assert_eq!(result.get(4), Some(100.0));
        assert_eq!(result.get(5), Some(100.0));
    }

    #[test]
    fn test_rsi_recovers_after_large_swings() {
        // Swings of ~5000 followed by moves of 1e-9: the small gains and
        // losses must not be swamped by what the large deltas left behind.
        let mut data = vec![1.0_f64, 5000.0, 1.0, 5000.0, 1.0, 5000.0, 1.0];
        let mut price = 1.0;
        for k in 0..10 {
            price += if k % 3 == 2 { -1e-9 } else { 1e-9 };
            data.push(price);
        }
        let window = 3;
        let result = rsi(&data, window).unwrap();

        for i in (window + 2)..data.len() {
            let (mut gain, mut loss) = (0.0, 0.0);
            for j in (i + 1 - window)..=i {
                let delta = data[j] - data[j - 1];
                if delta > 0.0 {
                    gain += delta;
                } else {
                    loss -= delta;
                }
            }
            let expected = 100.0 - 100.0 / (1.0 + gain / loss);
            let actual = result.get(i).unwrap();
            assert!((actual - expected).abs() < 1e-6, "index {i}: {actual} vs {expected}");
        }
        assert!((result.get(9).unwrap() - 200.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_rsi_flat_window_neutral_by_default() {
        let data = vec![100.0_f64; 6];
        let result = rsi(&data, 3).unwrap();
        assert_eq!(result.get(3), Some(50.0));
        assert_eq!(result.get(5), Some(50.0));
    }

    #[test]
    fn test_rsi_flat_window_undefined_convention() {
        let data = vec![100.0_f64; 6];
        let result = rsi_with(&data, 3, FlatRsi::Undefined).unwrap();
        assert!(result.values().iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_short_series_all_undefined() {
        let result = rsi(&[100.0_f64, 100.0, 100.0], 14).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.values().iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_empty_and_single() {
        assert!(rsi::<f64>(&[], 14).unwrap().is_empty());
        assert_eq!(rsi(&[5.0_f64], 1).unwrap().values(), &[None]);
    }

    #[test]
    fn test_rsi_window_one() {
        let data = vec![40.0_f64, 41.0, 42.0, 41.0, 41.0];
        let result = rsi(&data, 1).unwrap();
        assert_eq!(
            result.values(),
            &[None, Some(100.0), Some(100.0), Some(0.0), Some(50.0)]
        );
    }

    #[test]
    fn test_rsi_zero_window() {
        let result = rsi(&[1.0_f64, 2.0, 3.0], 0);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "rsi_window",
                value: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_rsi_f32() {
        let data = vec![40.0_f32, 41.0, 42.0, 43.0, 44.0];
        let result = rsi(&data, 3).unwrap();
        assert_eq!(result.get(3), Some(100.0_f32));
    }

    #[test]
    fn test_rsi_defined_iterator() {
        let data = vec![1.0_f64, 2.0, 3.0, 2.0];
        let defined: Vec<_> = rsi(&data, 2).unwrap().defined().map(|(i, _)| i).collect();
        assert_eq!(defined, vec![2, 3]);
    }

    #[test]
    fn test_builder_defaults() {
        let cfg = Rsi::new();
        assert_eq!(cfg.get_window(), DEFAULT_RSI_WINDOW);
        assert_eq!(cfg, Rsi::default().flat(FlatRsi::Neutral));
    }
}
