//! Shared test utilities for signal-ta tests.

use chrono::NaiveDate;
use signal_ta::series::PriceSeries;

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// First trading day used by every generated series.
#[allow(dead_code)]
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
}

/// Builds a daily series from closes.
#[allow(dead_code)]
pub fn daily(closes: &[f64]) -> PriceSeries<f64> {
    PriceSeries::daily(start_date(), closes).unwrap()
}

/// Deterministic wavy price path with enough turns to produce crossovers.
#[allow(dead_code)]
pub fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            100.0 + (x * 0.25).sin() * 8.0 + (x * 0.07).cos() * 3.0
        })
        .collect()
}
