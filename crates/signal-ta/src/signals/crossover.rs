//! MACD crossover detection.
//!
//! With `d[i] = macd_line[i] − signal_line[i]`, a single pass over `i ≥ 1`
//! emits:
//!
//! ```text
//! d[i−1] ≤ 0 and d[i] > 0  →  Buy  at i
//! d[i−1] ≥ 0 and d[i] < 0  →  Sell at i
//! ```
//!
//! A prior difference of exactly zero counts as "not above" for a Buy and
//! "not below" for a Sell, so a line resting on the signal line and then
//! leaving it produces one event. A current difference of zero emits nothing.
//! The two conditions are mutually exclusive, so no index carries two events.
//!
//! # Example
//!
//! ```
//! use signal_ta::signals::{detect_crossovers, SignalEvent, SignalKind};
//!
//! let macd = [-1.0_f64, 0.5, 0.2, -0.3];
//! let signal = [0.0_f64, 0.0, 0.0, 0.0];
//!
//! let events = detect_crossovers(&macd, &signal).unwrap();
//! assert_eq!(
//!     events,
//!     vec![
//!         SignalEvent { index: 1, kind: SignalKind::Buy },
//!         SignalEvent { index: 3, kind: SignalKind::Sell },
//!     ]
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indicators::macd::MacdOutput;
use crate::traits::SeriesElement;

/// Direction of a crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// MACD line crossed above the signal line.
    Buy,
    /// MACD line crossed below the signal line.
    Sell,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

/// A crossover at a position of the analyzed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalEvent {
    /// Index into the price series.
    pub index: usize,
    /// Buy or Sell.
    pub kind: SignalKind,
}

/// Classifies the transition from `prev` to `curr`.
#[inline]
fn classify<T: SeriesElement>(prev: T, curr: T) -> Option<SignalKind> {
    let zero = T::zero();
    if prev <= zero && curr > zero {
        Some(SignalKind::Buy)
    } else if prev >= zero && curr < zero {
        Some(SignalKind::Sell)
    } else {
        None
    }
}

/// Detects crossovers between two aligned lines.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the lines differ in length.
pub fn detect_crossovers<T: SeriesElement>(macd_line: &[T], signal_line: &[T]) -> Result<Vec<SignalEvent>> {
    if macd_line.len() != signal_line.len() {
        return Err(Error::LengthMismatch {
            expected: macd_line.len(),
            actual: signal_line.len(),
        });
    }

    let mut events = Vec::new();
    let mut diffs = macd_line.iter().zip(signal_line).map(|(&m, &s)| m - s);

    let Some(mut prev) = diffs.next() else {
        return Ok(events);
    };

    for (offset, curr) in diffs.enumerate() {
        if let Some(kind) = classify(prev, curr) {
            events.push(SignalEvent {
                index: offset + 1,
                kind,
            });
        }
        prev = curr;
    }

    Ok(events)
}

/// Scans a [`MacdOutput`] for crossover events.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoverDetector;

impl CrossoverDetector {
    /// Creates a detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the crossover events of `macd`, in index order.
    ///
    /// The differences are recomputed from the two lines rather than read
    /// from the histogram, so hand-built outputs are judged on their lines.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the MACD and signal lines differ in
    /// length.
    pub fn detect<T: SeriesElement>(&self, macd: &MacdOutput<T>) -> Result<Vec<SignalEvent>> {
        detect_crossovers(&macd.macd_line, &macd.signal_line)
    }
}
