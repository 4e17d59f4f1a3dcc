//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! The MACD is a trend-following momentum indicator built from three aligned
//! series:
//!
//! - **MACD Line**: short EMA − long EMA
//! - **Signal Line**: EMA of the MACD line
//! - **Histogram**: MACD line − signal line
//!
//! # Formula
//!
//! ```text
//! MACD Line[i] = EMA(short)[i] − EMA(long)[i]
//! Signal[i]    = EMA(MACD Line, signal)[i]
//! Histogram[i] = MACD Line[i] − Signal[i]
//! ```
//!
//! Every EMA here is seeded with its first input (see
//! [`ema`](crate::indicators::ema)), so all three series are defined from
//! index 0 onward.
//!
//! # Preconditions
//!
//! `short < long` is expected but not enforced. Swapping them inverts the sign
//! of the MACD line; that is a caller error, not a runtime fault.
//!
//! # Example
//!
//! ```
//! use signal_ta::indicators::macd::macd;
//!
//! let data: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i) * 0.5).collect();
//! let result = macd(&data, 12, 26, 9).unwrap();
//!
//! assert_eq!(result.len(), 40);
//! assert_eq!(result.macd_line[0], 0.0);
//! assert!(result.macd_line[39] > 0.0);
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::indicators::ema::EmaState;
use crate::series::PriceSeries;
use crate::traits::{validate_window, SeriesElement};

/// Default short EMA window.
pub const DEFAULT_MACD_SHORT: usize = 12;
/// Default long EMA window.
pub const DEFAULT_MACD_LONG: usize = 26;
/// Default signal EMA window.
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// The output of a MACD calculation.
///
/// All three vectors have the length of the input series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput<T> {
    /// Short EMA − long EMA.
    pub macd_line: Vec<T>,
    /// EMA of the MACD line.
    pub signal_line: Vec<T>,
    /// MACD line − signal line.
    pub histogram: Vec<T>,
}

impl<T: SeriesElement> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// Computes the MACD line, signal line and histogram.
///
/// Runs three [`EmaState`] recurrences side by side in a single pass; no
/// intermediate EMA vectors are materialized.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if any window is zero.
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    short_window: usize,
    long_window: usize,
    signal_window: usize,
) -> Result<MacdOutput<T>> {
    validate_window("macd_short", short_window)?;
    validate_window("macd_long", long_window)?;
    validate_window("macd_signal", signal_window)?;

    let mut short_ema = EmaState::new(short_window)?;
    let mut long_ema = EmaState::new(long_window)?;
    let mut signal_ema = EmaState::new(signal_window)?;

    let n = data.len();
    let mut macd_line = Vec::with_capacity(n);
    let mut signal_line = Vec::with_capacity(n);
    let mut histogram = Vec::with_capacity(n);

    for &close in data {
        let line = short_ema.next(close) - long_ema.next(close);
        let signal = signal_ema.next(line);
        macd_line.push(line);
        signal_line.push(signal);
        histogram.push(line - signal);
    }

    Ok(MacdOutput {
        macd_line,
        signal_line,
        histogram,
    })
}

/// MACD configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use signal_ta::indicators::macd::Macd;
///
/// let prices: Vec<f64> = (0..30).map(|i| 50.0 + f64::from(i)).collect();
///
/// // Use defaults (12, 26, 9)
/// let standard = Macd::default().compute_slice(&prices).unwrap();
///
/// // Or customize
/// let fast = Macd::new().short(3).long(6).signal(2).compute_slice(&prices).unwrap();
/// assert_eq!(standard.len(), fast.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    short: usize,
    long: usize,
    signal: usize,
}

impl Default for Macd {
    /// Standard parameters (12, 26, 9).
    fn default() -> Self {
        Self {
            short: DEFAULT_MACD_SHORT,
            long: DEFAULT_MACD_LONG,
            signal: DEFAULT_MACD_SIGNAL,
        }
    }
}

impl Macd {
    /// Creates a configuration with standard parameters (12, 26, 9).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the short EMA window. Default: 12
    #[must_use]
    pub const fn short(mut self, window: usize) -> Self {
        self.short = window;
        self
    }

    /// Sets the long EMA window. Default: 26
    #[must_use]
    pub const fn long(mut self, window: usize) -> Self {
        self.long = window;
        self
    }

    /// Sets the signal EMA window. Default: 9
    #[must_use]
    pub const fn signal(mut self, window: usize) -> Self {
        self.signal = window;
        self
    }

    /// Returns `(short, long, signal)`.
    #[must_use]
    pub const fn windows(&self) -> (usize, usize, usize) {
        (self.short, self.long, self.signal)
    }

    /// Computes the MACD of a price series.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if any window is zero.
    pub fn compute<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<MacdOutput<T>> {
        self.compute_slice(series.closes())
    }

    /// Computes the MACD of raw closes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if any window is zero.
    pub fn compute_slice<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd(data, self.short, self.long, self.signal)
    }
}
