//! Daily price series.
//!
//! A [`PriceSeries`] is the sole input of every indicator in this crate: an
//! ordered run of `(date, close)` pairs with strictly increasing dates and
//! positive, finite closes. Dates and closes are stored as parallel vectors so
//! indicators can borrow the closes as a plain slice.
//!
//! An empty series is constructible (a data source may legitimately return
//! nothing for a date range); the engine rejects it at analysis time.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use signal_ta::series::{PricePoint, PriceSeries};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let series = PriceSeries::daily(start, &[100.0_f64, 101.5, 99.75]).unwrap();
//!
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.closes(), &[100.0, 101.5, 99.75]);
//! assert_eq!(
//!     series.get(1),
//!     Some(PricePoint { date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), close: 101.5 })
//! );
//! ```

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// One entry of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint<T> {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price for that day.
    pub close: T,
}

/// An ordered, validated daily close-price series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceSeries<T: SeriesElement = f64> {
    dates: Vec<NaiveDate>,
    closes: Vec<T>,
}

impl<T: SeriesElement> PriceSeries<T> {
    /// Builds a series from `(date, close)` points.
    ///
    /// # Errors
    ///
    /// - `Error::UnorderedDates` if a date is not strictly after its predecessor
    /// - `Error::NonPositivePrice` if a close is not a positive finite number
    pub fn new<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = PricePoint<T>>,
    {
        let (dates, closes): (Vec<NaiveDate>, Vec<T>) = points
            .into_iter()
            .map(|point| (point.date, point.close))
            .unzip();
        Self::from_parts(dates, closes)
    }

    /// Builds a series from parallel date and close vectors.
    ///
    /// # Errors
    ///
    /// - `Error::LengthMismatch` if the vectors differ in length
    /// - `Error::UnorderedDates` / `Error::NonPositivePrice` as for [`new`](Self::new)
    pub fn from_parts(dates: Vec<NaiveDate>, closes: Vec<T>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(Error::LengthMismatch {
                expected: dates.len(),
                actual: closes.len(),
            });
        }

        for (index, &close) in closes.iter().enumerate() {
            if !close.is_finite() || close <= T::zero() {
                return Err(Error::NonPositivePrice { index });
            }
        }

        if let Some(index) = dates
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
            .map(|pos| pos + 1)
        {
            return Err(Error::UnorderedDates { index });
        }

        Ok(Self { dates, closes })
    }

    /// Builds a series of consecutive calendar days starting at `start`.
    ///
    /// Convenient for tests and for sources that only carry closes.
    ///
    /// # Errors
    ///
    /// - `Error::NonPositivePrice` if a close is not a positive finite number
    /// - `Error::NumericConversion` if the date range overflows the calendar
    pub fn daily(start: NaiveDate, closes: &[T]) -> Result<Self> {
        let dates = (0..closes.len())
            .map(|offset| {
                start
                    .checked_add_days(Days::new(offset as u64))
                    .ok_or(Error::NumericConversion {
                        context: "day offset beyond calendar range",
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_parts(dates, closes.to_vec())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Returns true if the series holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Close prices in date order.
    #[must_use]
    pub fn closes(&self) -> &[T] {
        &self.closes
    }

    /// Dates in increasing order.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The entry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<PricePoint<T>> {
        Some(PricePoint {
            date: *self.dates.get(index)?,
            close: *self.closes.get(index)?,
        })
    }

    /// Iterates over the entries in date order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = PricePoint<T>> + '_ {
        self.dates
            .iter()
            .zip(&self.closes)
            .map(|(&date, &close)| PricePoint { date, close })
    }

    /// Returns the sub-series whose dates fall in `start..=end`.
    ///
    /// Either bound may be omitted. The result may be empty.
    #[must_use]
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let lo = start.map_or(0, |d| self.dates.partition_point(|&x| x < d));
        let hi = end.map_or(self.len(), |d| self.dates.partition_point(|&x| x <= d));
        if lo >= hi {
            return Self::default();
        }
        Self {
            dates: self.dates[lo..hi].to_vec(),
            closes: self.closes[lo..hi].to_vec(),
        }
    }
}
