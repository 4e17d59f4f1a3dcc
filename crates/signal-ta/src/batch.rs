//! Batch analysis of many price series.
//!
//! With the `parallel` feature enabled, batches at or above the configured
//! threshold are analyzed on the rayon thread pool; smaller batches, and all
//! batches without the feature, run sequentially. Output order always matches
//! input order.
//!
//! ```toml
//! [dependencies]
//! signal-ta = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use signal_ta::batch::analyze_batch;
//! use signal_ta::engine::IndicatorConfig;
//! use signal_ta::series::PriceSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let batch = vec![
//!     PriceSeries::daily(start, &[1.0_f64, 2.0, 3.0, 4.0]).unwrap(),
//!     PriceSeries::daily(start, &[4.0_f64, 3.0, 2.0, 1.0]).unwrap(),
//! ];
//!
//! let reports = analyze_batch(&batch, &IndicatorConfig::default()).unwrap();
//! assert_eq!(reports.len(), 2);
//! ```

use tracing::debug;

use crate::engine::{IndicatorConfig, IndicatorEngine, IndicatorReport};
use crate::error::Result;
use crate::series::PriceSeries;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of series at which parallel analysis kicks in.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Analyzes batches of series with one shared engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    engine: IndicatorEngine,
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

impl BatchProcessor {
    /// Creates a processor for `config`.
    #[must_use]
    pub const fn new(config: IndicatorConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(config),
            min_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the minimum batch size for parallel analysis.
    ///
    /// Has no effect without the `parallel` feature.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// The engine every series is analyzed with.
    #[must_use]
    pub const fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    /// Analyzes every series in `batch`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error any series produces; no partial batch is
    /// returned.
    #[cfg(feature = "parallel")]
    pub fn analyze<'a, T: SeriesElement>(&self, batch: &'a [PriceSeries<T>]) -> Result<Vec<IndicatorReport<'a, T>>> {
        debug!(
            series = batch.len(),
            parallel = batch.len() >= self.min_parallel_threshold,
            "analyzing batch"
        );
        if batch.len() < self.min_parallel_threshold {
            return self.analyze_sequential(batch);
        }
        batch
            .par_iter()
            .map(|series| self.engine.analyze(series))
            .collect()
    }

    /// Analyzes every series in `batch`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error any series produces; no partial batch is
    /// returned.
    #[cfg(not(feature = "parallel"))]
    pub fn analyze<'a, T: SeriesElement>(&self, batch: &'a [PriceSeries<T>]) -> Result<Vec<IndicatorReport<'a, T>>> {
        debug!(series = batch.len(), parallel = false, "analyzing batch");
        self.analyze_sequential(batch)
    }

    fn analyze_sequential<'a, T: SeriesElement>(
        &self,
        batch: &'a [PriceSeries<T>],
    ) -> Result<Vec<IndicatorReport<'a, T>>> {
        batch.iter().map(|series| self.engine.analyze(series)).collect()
    }
}

/// Analyzes every series in `batch` with `config`.
///
/// # Errors
///
/// Returns the first error any series produces.
pub fn analyze_batch<'a, T: SeriesElement>(
    batch: &'a [PriceSeries<T>],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorReport<'a, T>>> {
    BatchProcessor::new(*config).analyze(batch)
}
