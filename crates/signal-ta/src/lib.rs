//! signal-ta: RSI and MACD indicators with MACD crossover signals
//!
//! This crate turns a daily close-price series into an immutable analysis
//! report: a Relative Strength Index series, the MACD line, signal line and
//! histogram, and the Buy/Sell events where the MACD line crosses its signal
//! line.
//!
//! # Features
//!
//! - **Single pass**: every indicator runs in O(n) with O(1) recurrence state
//! - **Generics**: works with both `f32` and `f64` data types
//! - **Pure**: no I/O, no global state; analysis is deterministic and
//!   idempotent
//! - **Batches**: optional rayon-backed batch analysis (`parallel` feature)
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use signal_ta::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let closes = [10.0_f64, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0];
//! let series = PriceSeries::daily(start, &closes).unwrap();
//!
//! let report = IndicatorEngine::new(IndicatorConfig::default())
//!     .analyze(&series)
//!     .unwrap();
//!
//! // Fewer than 15 points: no RSI value can be formed with the default window.
//! assert!(report.rsi().values().iter().all(Option::is_none));
//! // A steady rise keeps the MACD line above zero after the first point.
//! assert!(report.macd().macd_line[1..].iter().all(|&v| v > 0.0));
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]:
//!
//! ```
//! use signal_ta::prelude::*;
//!
//! let empty = PriceSeries::<f64>::default();
//! let result = IndicatorEngine::default().analyze(&empty);
//! assert!(matches!(result, Err(Error::InsufficientData { .. })));
//!
//! let bad = IndicatorConfig { rsi_window: 0, ..IndicatorConfig::default() };
//! assert!(matches!(bad.validate(), Err(Error::InvalidParameter { .. })));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod prelude;
pub mod series;
pub mod signals;
pub mod traits;

pub use engine::{analyze, IndicatorConfig, IndicatorEngine, IndicatorReport, ReportRow};
pub use error::{Error, Result};
pub use series::{PricePoint, PriceSeries};
pub use signals::{SignalEvent, SignalKind};
pub use traits::SeriesElement;
