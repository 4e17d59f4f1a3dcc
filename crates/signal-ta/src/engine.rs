//! Indicator engine: one price series in, one immutable report out.
//!
//! [`IndicatorEngine::analyze`] validates the configuration, rejects an empty
//! series, then runs RSI, MACD and crossover detection over the closes. The
//! resulting [`IndicatorReport`] borrows the series and owns everything it
//! derived; it is the only object handed to presentation code.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use signal_ta::engine::{IndicatorConfig, IndicatorEngine};
//! use signal_ta::series::PriceSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let closes: Vec<f64> = (0..60).map(|i| 100.0 + (f64::from(i) * 0.3).sin() * 5.0).collect();
//! let series = PriceSeries::daily(start, &closes).unwrap();
//!
//! let engine = IndicatorEngine::new(IndicatorConfig::default());
//! let report = engine.analyze(&series).unwrap();
//!
//! assert_eq!(report.len(), 60);
//! assert_eq!(report.rsi().first_defined(), Some(14));
//! for event in report.signals() {
//!     println!("{} {}", report.series().dates()[event.index], event.kind);
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::indicators::macd::{
    Macd, MacdOutput, DEFAULT_MACD_LONG, DEFAULT_MACD_SHORT, DEFAULT_MACD_SIGNAL,
};
use crate::indicators::rsi::{FlatRsi, Rsi, RsiSeries, DEFAULT_RSI_WINDOW};
use crate::series::PriceSeries;
use crate::signals::crossover::{CrossoverDetector, SignalEvent, SignalKind};
use crate::traits::{validate_window, SeriesElement};

/// The recognized analysis parameters.
///
/// Deserializes from any serde format; missing fields take their defaults and
/// unknown fields are rejected.
///
/// ```
/// use signal_ta::engine::IndicatorConfig;
///
/// let cfg: IndicatorConfig = serde_json::from_str(r#"{"rsi_window": 7}"#).unwrap();
/// assert_eq!(cfg.rsi_window, 7);
/// assert_eq!(cfg.macd_long, 26);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    /// RSI window. Default: 14
    pub rsi_window: usize,
    /// Short MACD EMA window. Default: 12
    pub macd_short: usize,
    /// Long MACD EMA window. Default: 26
    pub macd_long: usize,
    /// Signal-line EMA window. Default: 9
    pub macd_signal: usize,
    /// Convention for RSI windows with neither gains nor losses.
    pub flat_rsi: FlatRsi,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_window: DEFAULT_RSI_WINDOW,
            macd_short: DEFAULT_MACD_SHORT,
            macd_long: DEFAULT_MACD_LONG,
            macd_signal: DEFAULT_MACD_SIGNAL,
            flat_rsi: FlatRsi::default(),
        }
    }
}

impl IndicatorConfig {
    /// Checks every window.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for the first zero window.
    pub const fn validate(&self) -> Result<()> {
        // `?` is not allowed in const fn.
        if let Err(e) = validate_window("rsi_window", self.rsi_window) {
            return Err(e);
        }
        if let Err(e) = validate_window("macd_short", self.macd_short) {
            return Err(e);
        }
        if let Err(e) = validate_window("macd_long", self.macd_long) {
            return Err(e);
        }
        validate_window("macd_signal", self.macd_signal)
    }

    /// The RSI computer this configuration describes.
    #[must_use]
    pub fn rsi(&self) -> Rsi {
        Rsi::new().window(self.rsi_window).flat(self.flat_rsi)
    }

    /// The MACD computer this configuration describes.
    #[must_use]
    pub fn macd(&self) -> Macd {
        Macd::new()
            .short(self.macd_short)
            .long(self.macd_long)
            .signal(self.macd_signal)
    }
}

/// Runs the full indicator pipeline with a fixed configuration.
///
/// The engine holds no mutable state; one instance can analyze any number of
/// series, from any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Creates an engine for `config`.
    #[must_use]
    pub const fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Analyzes `series`.
    ///
    /// Either the full report is produced or an error is returned; no partial
    /// results.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if any configured window is zero
    /// - `Error::InsufficientData` if `series` is empty
    pub fn analyze<'a, T: SeriesElement>(&self, series: &'a PriceSeries<T>) -> Result<IndicatorReport<'a, T>> {
        self.config.validate()?;
        if series.is_empty() {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        debug!(
            len = series.len(),
            rsi_window = self.config.rsi_window,
            macd_short = self.config.macd_short,
            macd_long = self.config.macd_long,
            macd_signal = self.config.macd_signal,
            "analyzing price series"
        );

        let rsi = self.config.rsi().compute(series)?;
        let macd = self.config.macd().compute(series)?;
        let signals = CrossoverDetector::new().detect(&macd)?;

        trace!(
            rsi_defined = rsi.defined().count(),
            events = signals.len(),
            "analysis complete"
        );

        Ok(IndicatorReport {
            series,
            config: self.config,
            rsi,
            macd,
            signals,
        })
    }
}

/// Analyzes `series` with `config`.
///
/// Shorthand for `IndicatorEngine::new(*config).analyze(series)`.
///
/// # Errors
///
/// See [`IndicatorEngine::analyze`].
pub fn analyze<'a, T: SeriesElement>(
    series: &'a PriceSeries<T>,
    config: &IndicatorConfig,
) -> Result<IndicatorReport<'a, T>> {
    IndicatorEngine::new(*config).analyze(series)
}

/// Everything derived from one price series.
///
/// Immutable: all accessors hand out shared references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport<'a, T: SeriesElement> {
    series: &'a PriceSeries<T>,
    config: IndicatorConfig,
    rsi: RsiSeries<T>,
    macd: MacdOutput<T>,
    signals: Vec<SignalEvent>,
}

/// One aligned row of a report, convenient for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow<T> {
    /// Position in the series.
    pub index: usize,
    /// Trading day.
    pub date: NaiveDate,
    /// Close price.
    pub close: T,
    /// RSI, `None` if undefined.
    pub rsi: Option<T>,
    /// MACD line.
    pub macd: T,
    /// Signal line.
    pub signal: T,
    /// Histogram.
    pub histogram: T,
    /// Crossover at this index, if any.
    pub event: Option<SignalKind>,
}

impl<'a, T: SeriesElement> IndicatorReport<'a, T> {
    /// The analyzed series.
    #[must_use]
    pub const fn series(&self) -> &'a PriceSeries<T> {
        self.series
    }

    /// The configuration used.
    #[must_use]
    pub const fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// RSI series, aligned with the price series.
    #[must_use]
    pub const fn rsi(&self) -> &RsiSeries<T> {
        &self.rsi
    }

    /// MACD line, signal line and histogram.
    #[must_use]
    pub const fn macd(&self) -> &MacdOutput<T> {
        &self.macd
    }

    /// Crossover events in index order.
    #[must_use]
    pub fn signals(&self) -> &[SignalEvent] {
        &self.signals
    }

    /// Number of points (equal to the series length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Always false: the engine never builds a report for an empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Buy events only.
    pub fn buys(&self) -> impl Iterator<Item = &SignalEvent> + '_ {
        self.signals.iter().filter(|e| e.kind == SignalKind::Buy)
    }

    /// Sell events only.
    pub fn sells(&self) -> impl Iterator<Item = &SignalEvent> + '_ {
        self.signals.iter().filter(|e| e.kind == SignalKind::Sell)
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn latest_signal(&self) -> Option<&SignalEvent> {
        self.signals.last()
    }

    /// The date of an event.
    #[must_use]
    pub fn event_date(&self, event: &SignalEvent) -> Option<NaiveDate> {
        self.series.dates().get(event.index).copied()
    }

    /// Iterates over aligned rows.
    pub fn rows(&self) -> impl Iterator<Item = ReportRow<T>> + '_ {
        let mut events = self.signals.iter().peekable();
        self.series.iter().enumerate().map(move |(index, point)| {
            let event = events.next_if(|e| e.index == index).map(|e| e.kind);
            ReportRow {
                index,
                date: point.date,
                close: point.close,
                rsi: self.rsi.get(index),
                macd: self.macd.macd_line[index],
                signal: self.macd.signal_line[index],
                histogram: self.macd.histogram[index],
                event,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn series(closes: &[f64]) -> PriceSeries<f64> {
        PriceSeries::daily(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), closes).unwrap()
    }

    #[test]
    fn test_default_config() {
        let cfg = IndicatorConfig::default();
        assert_eq!(
            (cfg.rsi_window, cfg.macd_short, cfg.macd_long, cfg.macd_signal),
            (14, 12, 26, 9)
        );
        assert_eq!(cfg.flat_rsi, FlatRsi::Neutral);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_series_is_insufficient_data() {
        let empty = PriceSeries::<f64>::default();
        let result = IndicatorEngine::default().analyze(&empty);
        assert_eq!(
            result.unwrap_err(),
            Error::InsufficientData {
                required: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_zero_rsi_window_is_invalid_parameter() {
        let s = series(&[1.0, 2.0, 3.0]);
        let cfg = IndicatorConfig {
            rsi_window: 0,
            ..IndicatorConfig::default()
        };
        assert!(matches!(
            analyze(&s, &cfg),
            Err(Error::InvalidParameter {
                name: "rsi_window",
                ..
            })
        ));
    }

    #[test]
    fn test_parameters_checked_before_data() {
        let empty = PriceSeries::<f64>::default();
        let cfg = IndicatorConfig {
            macd_signal: 0,
            ..IndicatorConfig::default()
        };
        assert!(matches!(
            analyze(&empty, &cfg),
            Err(Error::InvalidParameter {
                name: "macd_signal",
                ..
            })
        ));
    }

    #[test]
    fn test_flat_three_point_series() {
        let s = series(&[100.0, 100.0, 100.0]);
        let report = IndicatorEngine::default().analyze(&s).unwrap();

        assert_eq!(report.len(), 3);
        assert!(report.rsi().values().iter().all(Option::is_none));
        assert_eq!(report.macd().macd_line, vec![0.0; 3]);
        assert_eq!(report.macd().signal_line, vec![0.0; 3]);
        assert!(report.signals().is_empty());
        assert_eq!(report.latest_signal(), None);
    }

    #[test]
    fn test_report_rows_align_events() {
        let closes = [10.0, 9.0, 8.0, 9.0, 11.0, 12.0, 10.0, 8.0, 7.0];
        let s = series(&closes);
        let cfg = IndicatorConfig {
            rsi_window: 3,
            macd_short: 2,
            macd_long: 4,
            macd_signal: 2,
            ..IndicatorConfig::default()
        };
        let report = analyze(&s, &cfg).unwrap();
        assert!(!report.signals().is_empty());

        let rows: Vec<_> = report.rows().collect();
        assert_eq!(rows.len(), closes.len());
        for event in report.signals() {
            assert_eq!(rows[event.index].event, Some(event.kind));
            assert_eq!(Some(rows[event.index].date), report.event_date(event));
        }
        let tagged = rows.iter().filter(|r| r.event.is_some()).count();
        assert_eq!(tagged, report.signals().len());
        assert_eq!(report.buys().count() + report.sells().count(), tagged);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + (f64::from(i) * 0.21).cos() * 3.0).collect();
        let s = series(&closes);
        let engine = IndicatorEngine::default();
        let first = engine.analyze(&s).unwrap();
        let second = engine.analyze(&s).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_deserialize_rejects_unknown_fields() {
        let result: std::result::Result<IndicatorConfig, _> =
            serde_json::from_str(r#"{"rsi_windw": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_deserialize_flat_rsi() {
        let cfg: IndicatorConfig = serde_json::from_str(r#"{"flat_rsi": "undefined"}"#).unwrap();
        assert_eq!(cfg.flat_rsi, FlatRsi::Undefined);
    }
}
