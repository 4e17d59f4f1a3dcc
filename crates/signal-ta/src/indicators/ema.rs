//! Exponential Moving Average (EMA), seeded with the first observation.
//!
//! # Formula
//!
//! ```text
//! α      = 2 / (window + 1)
//! EMA[0] = x[0]
//! EMA[i] = α × x[i] + (1 − α) × EMA[i−1]
//!        = EMA[i−1] + α × (x[i] − EMA[i−1])
//! ```
//!
//! The second form is the one evaluated. It leaves a constant input exactly
//! constant, so a flat series yields a MACD line of exact zeros.
//!
//! Unlike an SMA-seeded EMA there is no warm-up: every index from 0 onward
//! carries a value. Only the previous smoothed value is retained between
//! steps, exposed as the [`EmaState`] recurrence.
//!
//! # Example
//!
//! ```
//! use signal_ta::indicators::ema::ema;
//!
//! let result = ema(&[10.0_f64, 13.0, 16.0], 2).unwrap();
//!
//! // α = 2/3
//! assert_eq!(result[0], 10.0);
//! assert!((result[1] - 12.0).abs() < 1e-12);
//! assert!((result[2] - 44.0 / 3.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::traits::{validate_window, SeriesElement};

/// Computes the standard smoothing factor `α = 2 / (window + 1)`.
///
/// # Errors
///
/// Returns `Error::NumericConversion` if `window + 1` cannot be represented.
#[inline]
pub fn standard_alpha<T: SeriesElement>(window: usize) -> Result<T> {
    Ok(T::two() / T::from_usize(window.saturating_add(1))?)
}

/// The O(1)-state EMA recurrence.
///
/// # Example
///
/// ```
/// use signal_ta::indicators::ema::EmaState;
///
/// let mut state = EmaState::<f64>::new(9).unwrap();
/// assert_eq!(state.value(), None);
/// assert_eq!(state.next(4.0), 4.0);
/// assert!((state.next(14.0) - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmaState<T> {
    alpha: T,
    value: Option<T>,
}

impl<T: SeriesElement> EmaState<T> {
    /// Creates an unseeded state for `window`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if `window` is zero
    /// - `Error::NumericConversion` if the smoothing factor cannot be computed
    pub fn new(window: usize) -> Result<Self> {
        validate_window("window", window)?;
        Ok(Self {
            alpha: standard_alpha::<T>(window)?,
            value: None,
        })
    }

    /// Feeds the next raw value and returns the new smoothed value.
    ///
    /// The first value fed becomes the seed unchanged.
    #[inline]
    pub fn next(&mut self, x: T) -> T {
        let smoothed = match self.value {
            None => x,
            Some(prev) => prev + self.alpha * (x - prev),
        };
        self.value = Some(smoothed);
        smoothed
    }

    /// The current smoothed value, `None` before the first observation.
    #[must_use]
    pub const fn value(&self) -> Option<T> {
        self.value
    }

    /// The smoothing factor.
    #[must_use]
    pub const fn alpha(&self) -> T {
        self.alpha
    }
}

/// Computes the first-value-seeded EMA of `data`.
///
/// The output has the same length as the input; empty input yields an empty
/// vector.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `window` is zero.
pub fn ema<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    let mut state = EmaState::new(window)?;
    Ok(data.iter().map(|&x| state.next(x)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_ema_seed_is_first_value() {
        let result = ema(&[42.0_f64, 1.0, 1.0], 12).unwrap();
        assert_eq!(result[0], 42.0);
    }

    #[test]
    fn test_ema_output_length() {
        let data: Vec<f64> = (1..=30).map(f64::from).collect();
        assert_eq!(ema(&data, 26).unwrap().len(), 30);
        assert!(ema::<f64>(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_ema_window_one_tracks_input() {
        // α = 1: no smoothing.
        let data = vec![3.0_f64, 9.0, 1.0];
        for (got, want) in ema(&data, 1).unwrap().iter().zip(&data) {
            assert!((got - want).abs() < EPSILON);
        }
    }

    #[test]
    fn test_ema_constant_input_is_exact() {
        let result = ema(&[7.3_f64; 20], 9).unwrap();
        assert!(result.iter().all(|&v| v == 7.3));
    }

    #[test]
    fn test_ema_known_values() {
        // α = 2/(3+1) = 0.5
        let result = ema(&[2.0_f64, 4.0, 8.0, 0.0], 3).unwrap();
        let expected = [2.0, 3.0, 5.5, 2.75];
        for (got, want) in result.iter().zip(expected) {
            assert!((got - want).abs() < EPSILON, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_ema_f32() {
        let result = ema(&[1.0_f32, 2.0, 3.0], 3).unwrap();
        assert!((result[2] - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_ema_zero_window() {
        assert!(matches!(
            ema(&[1.0_f64], 0),
            Err(Error::InvalidParameter { value: 0, .. })
        ));
    }

    #[test]
    fn test_state_matches_batch() {
        let data = [5.0_f64, 6.0, 4.0, 8.0, 7.0];
        let batch = ema(&data, 4).unwrap();
        let mut state = EmaState::new(4).unwrap();
        for (i, &x) in data.iter().enumerate() {
            assert_eq!(state.next(x), batch[i]);
        }
        assert_eq!(state.value(), batch.last().copied());
        assert!((state.alpha() - 0.4).abs() < EPSILON);
    }
}
