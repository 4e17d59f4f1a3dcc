//! Error types for signal-ta.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Undefined
//! indicator points (RSI warm-up, flat windows) are not errors; they are
//! carried as `None` inside the result series.

use thiserror::Error;

/// The main error type for signal-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A window parameter is outside its valid range.
    ///
    /// Returned when a window size is zero. Fatal to the call that detected
    /// it only.
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        /// Name of the parameter (e.g. `rsi_window`).
        name: &'static str,
        /// The rejected value.
        value: usize,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The input series is too short for the requested operation.
    ///
    /// An empty price series is the only case the engine reports; short but
    /// non-empty series produce undefined points instead.
    #[error("insufficient data: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
    },

    /// A price entry is not strictly later than its predecessor.
    #[error("dates must be strictly increasing: entry {index} is not after the previous entry")]
    UnorderedDates {
        /// Index of the offending entry.
        index: usize,
    },

    /// A close price is zero, negative or not finite.
    #[error("close price at entry {index} must be positive and finite")]
    NonPositivePrice {
        /// Index of the offending entry.
        index: usize,
    },

    /// Two series that must be aligned have different lengths.
    #[error("series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the reference series.
        expected: usize,
        /// Length of the series that did not match.
        actual: usize,
    },

    /// Failed to convert a numeric value to the target type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the signal-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;
