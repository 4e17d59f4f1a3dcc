//! Fixed-window running mean.
//!
//! [`RollingMean`] keeps a running sum updated with one add and one remove per
//! step, so each update is O(1). The caller supplies the value leaving the
//! window, the same contract as a rolling statistic over a borrowed slice.
//!
//! The sum is kept with Neumaier compensated summation. A plain add/remove
//! sum loses the low bits of small values while a large value is in the window,
//! and that error stays after the large value leaves. The compensation term
//! carries those bits, so the mean tracks the window's true sum.
//!
//! The kernel also counts non-zero members of the window and reports an exact
//! zero whenever that count is zero. RSI relies on this to tell a window with
//! no losses apart from one with a tiny loss.

use crate::error::Result;
use crate::traits::SeriesElement;

/// A running mean over the last `window` values.
///
/// # Example
///
/// ```
/// use signal_ta::kernels::RollingMean;
///
/// let data = [1.0_f64, 2.0, 3.0, 4.0];
/// let mut mean = RollingMean::new(3).unwrap();
///
/// let mut out = Vec::new();
/// for (i, &x) in data.iter().enumerate() {
///     let evicted = i.checked_sub(3).map(|j| data[j]);
///     mean.update(x, evicted);
///     out.push(mean.mean());
/// }
///
/// assert_eq!(out[1], None);
/// assert_eq!(out[2], Some(2.0));
/// assert_eq!(out[3], Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct RollingMean<T> {
    window: usize,
    window_t: T,
    sum: T,
    compensation: T,
    count: usize,
    nonzero: usize,
}

impl<T: SeriesElement> RollingMean<T> {
    /// Creates an empty rolling mean.
    ///
    /// The window is not validated here; callers validate it with
    /// [`validate_window`](crate::traits::validate_window) so the error names
    /// the right parameter.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `window` is not representable in `T`.
    pub fn new(window: usize) -> Result<Self> {
        Ok(Self {
            window,
            window_t: T::from_usize(window)?,
            sum: T::zero(),
            compensation: T::zero(),
            count: 0,
            nonzero: 0,
        })
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Number of values currently in the window.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns true once `window` values have been pushed.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.count >= self.window
    }

    /// Adds `new_value` and removes `old_value`, the value leaving the window.
    ///
    /// Pass `None` while the window is still filling.
    pub fn update(&mut self, new_value: T, old_value: Option<T>) {
        if let Some(old) = old_value {
            self.accumulate(-old);
            if old != T::zero() {
                self.nonzero = self.nonzero.saturating_sub(1);
            }
        } else {
            self.count += 1;
        }

        self.accumulate(new_value);
        if new_value != T::zero() {
            self.nonzero += 1;
        }
    }

    fn accumulate(&mut self, x: T) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation = self.compensation + ((self.sum - t) + x);
        } else {
            self.compensation = self.compensation + ((x - t) + self.sum);
        }
        self.sum = t;
    }

    /// The mean of the current window, or `None` during warm-up.
    #[must_use]
    pub fn mean(&self) -> Option<T> {
        if !self.is_full() {
            return None;
        }
        if self.nonzero == 0 {
            return Some(T::zero());
        }
        Some((self.sum + self.compensation) / self.window_t)
    }
}
