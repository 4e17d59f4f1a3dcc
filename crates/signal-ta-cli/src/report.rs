//! A symbol paired with its analysis, as handed to the writers.

use serde::Serialize;
use signal_ta::engine::IndicatorReport;

use crate::overlay::linear_trend;

/// One analyzed symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport<'a> {
    /// Symbol, taken from the input file name.
    pub symbol: String,
    /// Least-squares trend of the close, aligned with the series.
    pub trend: Vec<f64>,
    /// The engine's report.
    pub report: IndicatorReport<'a, f64>,
}

impl<'a> SymbolReport<'a> {
    /// Wraps `report`, computing the close-price trend.
    #[must_use]
    pub fn new(symbol: String, report: IndicatorReport<'a, f64>) -> Self {
        let trend = linear_trend(report.series().closes());
        Self {
            symbol,
            trend,
            report,
        }
    }
}
