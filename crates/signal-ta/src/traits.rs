//! Core numeric traits for signal-ta.
//!
//! [`SeriesElement`] abstracts the indicator math over `f32` and `f64`, and
//! [`validate_window`] is the single place window parameters are checked.
//!
//! # Example
//!
//! ```
//! use signal_ta::traits::{validate_window, SeriesElement};
//!
//! fn mean_of_first<T: SeriesElement>(data: &[T], window: usize) -> signal_ta::Result<T> {
//!     validate_window("window", window)?;
//!     let sum = data.iter().take(window).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / T::from_usize(window)?)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! assert!((mean_of_first(&data, 3).unwrap() - 2.0).abs() < 1e-12);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A numeric type usable as an element of a price or indicator series.
///
/// Blanket-implemented for every `Float + NumCast` type, which in practice
/// means `f32` and `f64`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Converts a `usize` (a window length) into this type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Converts an `f64` into this type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2, used by the EMA smoothing factor `2 / (n + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates a window parameter.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` naming `name` if `window` is zero.
#[inline]
pub const fn validate_window(name: &'static str, window: usize) -> Result<()> {
    if window == 0 {
        Err(Error::InvalidParameter {
            name,
            value: window,
            reason: "window must be at least 1",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_element_from_usize() {
        let val: f64 = SeriesElement::from_usize(42).unwrap();
        assert!((val - 42.0).abs() < 1e-10);

        let val_f32: f32 = SeriesElement::from_usize(100).unwrap();
        assert!((val_f32 - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_series_element_from_f64() {
        let val: f32 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn test_series_element_two() {
        assert_eq!(<f64 as SeriesElement>::two(), 2.0);
        assert_eq!(<f32 as SeriesElement>::two(), 2.0);
    }

    #[test]
    fn test_validate_window_success() {
        assert!(validate_window("rsi_window", 1).is_ok());
        assert!(validate_window("rsi_window", 14).is_ok());
    }

    #[test]
    fn test_validate_window_zero() {
        match validate_window("macd_long", 0) {
            Err(Error::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "macd_long");
                assert_eq!(value, 0);
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}
