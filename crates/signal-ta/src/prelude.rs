//! Commonly used types and functions.
//!
//! ```
//! use signal_ta::prelude::*;
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let rsi_values = rsi(&prices, 5).unwrap();
//! let lines = macd(&prices, 3, 6, 2).unwrap();
//! let events = detect_crossovers(&lines.macd_line, &lines.signal_line).unwrap();
//!
//! assert_eq!(rsi_values.len(), prices.len());
//! assert!(events.iter().all(|e| e.index > 0));
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::SeriesElement;

// Data
pub use crate::series::{PricePoint, PriceSeries};

// Indicators
pub use crate::indicators::{ema, macd, rsi, rsi_lookback, rsi_with, FlatRsi, Macd, MacdOutput, Rsi, RsiSeries};

// Signals
pub use crate::signals::{detect_crossovers, CrossoverDetector, SignalEvent, SignalKind};

// Engine
pub use crate::batch::{analyze_batch, BatchProcessor};
pub use crate::engine::{analyze, IndicatorConfig, IndicatorEngine, IndicatorReport, ReportRow};
