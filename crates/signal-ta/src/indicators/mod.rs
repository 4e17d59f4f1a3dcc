//! Technical analysis indicators.
//!
//! All indicators in this module:
//!
//! - are generic over `f32` and `f64` via [`SeriesElement`](crate::traits::SeriesElement)
//! - run in O(n) time with O(1) state per recurrence
//! - return output aligned index-for-index with the input
//! - never fail on short input; warm-up points are reported as undefined
//!
//! # Indicators
//!
//! - [`ema`]: first-value-seeded Exponential Moving Average
//! - [`rsi`]: Relative Strength Index over a simple rolling mean
//! - [`macd`]: MACD line, signal line and histogram
//!
//! # Example
//!
//! ```
//! use signal_ta::indicators::{macd, rsi};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let rsi_result = rsi(&prices, 5).unwrap();
//! let macd_result = macd(&prices, 3, 6, 2).unwrap();
//!
//! assert_eq!(rsi_result.len(), macd_result.len());
//! ```

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::{ema, EmaState};
pub use macd::{macd, Macd, MacdOutput};
pub use rsi::{rsi, rsi_lookback, rsi_with, FlatRsi, Rsi, RsiSeries};
