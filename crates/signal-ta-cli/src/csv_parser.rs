//! CSV parsing module for reading daily price history.
//!
//! Each file holds one symbol. The parser detects columns by header name
//! (case-insensitive, surrounding whitespace ignored):
//! - `date`, `datetime`, `timestamp`, `time`, `dt` → trading day
//! - `close`, `adj close`, `adjusted close`, `price` → close price
//!
//! Other columns (open, high, volume, ...) are ignored. Dates are
//! `YYYY-MM-DD`; a longer timestamp whose first ten characters form such a date
//! (`2024-01-02 16:00:00`, `2024-01-02T16:00:00Z`) is accepted too. Rows may
//! appear in any order; they are sorted by date before the series is built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use signal_ta::series::{PricePoint, PriceSeries};
use tracing::debug;

use crate::error::{CliError, Result};

const DATE_HEADERS: &[&str] = &["date", "datetime", "timestamp", "time", "dt"];
const CLOSE_HEADERS: &[&str] = &["close", "adj close", "adjusted close", "price"];

/// Normalize a column header name for matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Finds the first header matching any of `names`, in `names` order.
fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
        trimmed
            .get(..10)
            .filter(|_| trimmed.len() > 10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}

fn parse_close(value: &str, line: usize) -> Result<f64> {
    let trimmed = value.trim();
    let close = trimmed.parse::<f64>().map_err(|_| CliError::CsvParseError {
        message: format!("cannot parse '{trimmed}' as number"),
        line: Some(line),
    })?;
    if !(close.is_finite() && close > 0.0) {
        return Err(CliError::CsvParseError {
            message: format!("close price {trimmed} must be positive"),
            line: Some(line),
        });
    }
    Ok(close)
}

/// Derives the symbol from a file path: the file name without extension.
#[must_use]
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Parse a CSV file into a validated price series.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be read, or
/// `CliError::CsvParseError` if the CSV is malformed.
pub fn parse_price_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    let series = parse_price_csv_from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), rows = series.len(), "parsed price file");
    Ok(series)
}

/// Parse CSV price data from a reader.
///
/// # Errors
///
/// Returns `CliError::CsvParseError` for missing columns, unparseable cells,
/// non-positive closes or duplicate dates.
pub fn parse_price_csv_from_reader<R: Read>(reader: R) -> Result<PriceSeries<f64>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| CliError::CsvParseError {
            message: e.to_string(),
            line: Some(1),
        })?
        .iter()
        .map(normalize_header)
        .collect();

    let date_idx = find_column(&headers, DATE_HEADERS).ok_or_else(|| CliError::CsvParseError {
        message: "no date column found (expected 'date', 'datetime' or 'timestamp')".to_string(),
        line: Some(1),
    })?;
    let close_idx = find_column(&headers, CLOSE_HEADERS).ok_or_else(|| CliError::CsvParseError {
        message: "no close price column found (expected 'close', 'adj close' or 'price')".to_string(),
        line: Some(1),
    })?;

    let mut points = Vec::new();
    for (line_idx, result) in csv_reader.records().enumerate() {
        // +2 for header and 0-indexing
        let line = line_idx + 2;
        let record = result.map_err(|e| CliError::CsvParseError {
            message: e.to_string(),
            line: Some(line),
        })?;

        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_day(raw_date).ok_or_else(|| CliError::CsvParseError {
            message: format!("cannot parse '{}' as a YYYY-MM-DD date", raw_date.trim()),
            line: Some(line),
        })?;
        let close = parse_close(record.get(close_idx).unwrap_or(""), line)?;

        points.push(PricePoint { date, close });
    }

    points.sort_by_key(|p| p.date);
    if let Some(pair) = points.windows(2).find(|pair| pair[0].date == pair[1].date) {
        return Err(CliError::CsvParseError {
            message: format!("duplicate date {}", pair[0].date),
            line: None,
        });
    }

    Ok(PriceSeries::new(points)?)
}
