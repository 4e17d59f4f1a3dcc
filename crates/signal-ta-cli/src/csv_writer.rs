//! CSV output for analysis reports.
//!
//! `analyze` writes one row per symbol and day:
//!
//! ```text
//! symbol,date,close,rsi,rsi_zone,macd,signal,histogram,trend,event
//! AAPL,2024-01-02,185.64,,,0,0,0,185.1,
//! ```
//!
//! Undefined RSI values leave `rsi` and `rsi_zone` empty; days without a
//! crossover leave `event` empty. `signals` writes only the event rows.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use csv::Writer;

use crate::error::{CliError, Result};
use crate::overlay::RsiZone;
use crate::report::SymbolReport;

/// Header of the `analyze` CSV output.
pub const ANALYSIS_HEADER: [&str; 10] = [
    "symbol", "date", "close", "rsi", "rsi_zone", "macd", "signal", "histogram", "trend", "event",
];

/// Header of the `signals` CSV output.
pub const SIGNALS_HEADER: [&str; 6] = ["symbol", "date", "event", "close", "macd", "signal"];

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// A file destination if `path` is given, stdout otherwise.
    #[must_use]
    pub fn from_option(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IoError` if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::IoError {
                    source: e,
                    path: Some(path.clone()),
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes the per-day analysis of every report.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_analysis_csv<W: Write>(reports: &[SymbolReport<'_>], writer: W) -> Result<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record(ANALYSIS_HEADER)?;

    for entry in reports {
        for row in entry.report.rows() {
            let zone = row.rsi.map(|v| RsiZone::of(v).as_str()).unwrap_or_default();
            out.write_record([
                entry.symbol.clone(),
                row.date.to_string(),
                row.close.to_string(),
                fmt_opt(row.rsi),
                zone.to_string(),
                row.macd.to_string(),
                row.signal.to_string(),
                row.histogram.to_string(),
                entry.trend[row.index].to_string(),
                row.event.map(|e| e.to_string()).unwrap_or_default(),
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes one row per crossover event.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_signals_csv<W: Write>(reports: &[SymbolReport<'_>], writer: W) -> Result<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record(SIGNALS_HEADER)?;

    for entry in reports {
        for row in entry.report.rows() {
            let Some(kind) = row.event else {
                continue;
            };
            out.write_record([
                entry.symbol.clone(),
                row.date.to_string(),
                kind.to_string(),
                row.close.to_string(),
                row.macd.to_string(),
                row.signal.to_string(),
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes every report as one pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(reports: &[SymbolReport<'_>], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use signal_ta::engine::{analyze, IndicatorConfig};
    use signal_ta::series::PriceSeries;

    fn series(closes: &[f64]) -> PriceSeries<f64> {
        PriceSeries::daily(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), closes).unwrap()
    }

    fn small_config() -> IndicatorConfig {
        IndicatorConfig {
            rsi_window: 2,
            macd_short: 2,
            macd_long: 4,
            macd_signal: 2,
            ..IndicatorConfig::default()
        }
    }

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_analysis_csv_layout() {
        let s = series(&[10.0, 9.0, 8.0, 9.0, 11.0]);
        let report = analyze(&s, &small_config()).unwrap();
        let reports = vec![SymbolReport::new("TEST".to_string(), report)];

        let out = to_string(|buf| write_analysis_csv(&reports, buf));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], ANALYSIS_HEADER.join(","));
        assert_eq!(lines.len(), 6);
        // Index 0: no RSI, zero MACD, no event.
        assert!(lines[1].starts_with("TEST,2024-01-01,10,,,0,0,0,"));
        assert!(lines[1].ends_with(','));
        // Index 2: two losses in the window.
        let cells: Vec<&str> = lines[3].split(',').collect();
        assert_eq!(cells[3], "0");
        assert_eq!(cells[4], "oversold");
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 10));
    }

    #[test]
    fn test_analysis_csv_events_match_report() {
        let s = series(&[10.0, 9.0, 8.0, 9.0, 11.0, 12.0, 10.0, 8.0, 7.0]);
        let report = analyze(&s, &small_config()).unwrap();
        let events = report.signals().len();
        let reports = vec![SymbolReport::new("X".to_string(), report)];

        let out = to_string(|buf| write_analysis_csv(&reports, buf));
        let tagged = out
            .lines()
            .skip(1)
            .filter(|l| l.ends_with(",buy") || l.ends_with(",sell"))
            .count();
        assert_eq!(tagged, events);
    }

    #[test]
    fn test_signals_csv_only_events() {
        let s = series(&[10.0, 9.0, 8.0, 9.0, 11.0, 12.0, 10.0, 8.0, 7.0]);
        let report = analyze(&s, &small_config()).unwrap();
        let events: Vec<_> = report.signals().to_vec();
        let reports = vec![SymbolReport::new("X".to_string(), report)];

        let out = to_string(|buf| write_signals_csv(&reports, buf));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], SIGNALS_HEADER.join(","));
        assert_eq!(lines.len(), events.len() + 1);
        for (line, event) in lines[1..].iter().zip(&events) {
            let cells: Vec<&str> = line.split(',').collect();
            assert_eq!(cells[2], event.kind.to_string());
        }
    }

    #[test]
    fn test_json_output() {
        let s = series(&[10.0, 11.0, 12.0]);
        let report = analyze(&s, &small_config()).unwrap();
        let reports = vec![SymbolReport::new("UP".to_string(), report)];

        let out = to_string(|buf| write_json(&reports, buf));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["symbol"], "UP");
        assert_eq!(value[0]["trend"].as_array().unwrap().len(), 3);
        assert_eq!(value[0]["report"]["series"]["dates"][0], "2024-01-01");
        assert_eq!(value[0]["report"]["signals"][0]["kind"], "buy");
    }

    #[test]
    fn test_output_dest_from_option() {
        assert_eq!(OutputDest::from_option(None), OutputDest::Stdout);
        assert_eq!(
            OutputDest::from_option(Some("out.csv")),
            OutputDest::File("out.csv".to_string())
        );
    }

    #[test]
    fn test_output_dest_file_error() {
        let dest = OutputDest::File("/nonexistent/dir/out.csv".to_string());
        assert!(matches!(dest.writer(), Err(CliError::IoError { .. })));
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        // Enough rows to overflow the csv writer's internal buffer.
        let closes: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 7)).collect();
        let s = series(&closes);
        let report = analyze(&s, &small_config()).unwrap();
        let reports = vec![SymbolReport::new("TEST".to_string(), report)];

        match write_analysis_csv(&reports, FullDisk) {
            Err(CliError::IoError { source, .. }) => {
                assert!(source.to_string().contains("no space left"));
            }
            other => panic!("expected IoError, got {other:?}"),
        }
    }
}
