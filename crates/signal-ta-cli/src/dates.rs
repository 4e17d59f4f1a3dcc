//! Date-range arguments.
//!
//! `--start` and `--end` are `YYYY-MM-DD`. When both are given the end must be
//! after the start. An end in the future is clamped to today before that
//! check, so `--start` must also lie before today in that case.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{CliError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive day range used to filter each input series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day kept, if bounded.
    pub start: Option<NaiveDate>,
    /// Last day kept, if bounded.
    pub end: Option<NaiveDate>,
}

/// Parses a `YYYY-MM-DD` argument.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` naming `argument` if `value` is not a
/// valid calendar date in that format.
pub fn parse_date(argument: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| CliError::InvalidArgument {
        argument: argument.to_string(),
        reason: format!("cannot parse '{value}' as a date: {e}"),
        suggestion: Some("Use the format YYYY-MM-DD (e.g., 2023-01-31)".to_string()),
    })
}

/// Builds the range from the raw arguments, with `today` as the latest
/// allowed end.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for a malformed date or when the
/// (clamped) end is not after the start.
pub fn resolve_range(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<DateRange> {
    let start = start.map(|s| parse_date("start", s)).transpose()?;
    let mut end = end.map(|e| parse_date("end", e)).transpose()?;

    if let Some(e) = end {
        if e > today {
            debug!(requested = %e, clamped = %today, "end date is in the future");
            end = Some(today);
        }
    }

    if let (Some(s), Some(e)) = (start, end) {
        if e <= s {
            return Err(CliError::InvalidArgument {
                argument: "end".to_string(),
                reason: format!("end date {e} must be after start date {s}"),
                suggestion: Some("Pick an end date later than the start date".to_string()),
            });
        }
    }

    Ok(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2024, 6, 15)
    }

    #[test]
    fn test_unbounded() {
        assert_eq!(resolve_range(None, None, today()).unwrap(), DateRange::default());
    }

    #[test]
    fn test_valid_range() {
        let range = resolve_range(Some("2024-01-02"), Some("2024-03-01"), today()).unwrap();
        assert_eq!(range.start, Some(day(2024, 1, 2)));
        assert_eq!(range.end, Some(day(2024, 3, 1)));
    }

    #[test]
    fn test_future_end_is_clamped() {
        let range = resolve_range(Some("2024-01-02"), Some("2030-01-01"), today()).unwrap();
        assert_eq!(range.end, Some(today()));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = resolve_range(Some("2024-03-01"), Some("2024-01-02"), today()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { ref argument, .. } if argument == "end"));
    }

    #[test]
    fn test_equal_dates_rejected() {
        assert!(resolve_range(Some("2024-03-01"), Some("2024-03-01"), today()).is_err());
    }

    #[test]
    fn test_start_after_clamped_end_rejected() {
        assert!(resolve_range(Some("2025-01-01"), Some("2026-01-01"), today()).is_err());
    }

    #[test]
    fn test_malformed_dates() {
        for bad in ["2024/01/02", "02-01-2024", "2024-13-01", "2024-02-30", ""] {
            let err = resolve_range(Some(bad), None, today()).unwrap_err();
            assert!(
                matches!(err, CliError::InvalidArgument { ref argument, .. } if argument == "start"),
                "{bad:?} should be rejected"
            );
        }
    }
}
