//! CLI error types for file I/O, parsing, configuration and analysis errors.
//!
//! Every message says what went wrong and, where there is one, how to fix it.

use std::fmt;
use std::io;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// An I/O error occurred while reading or writing files.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// An error occurred while parsing CSV data.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },
    /// The configuration file could not be read as indicator settings.
    ConfigError {
        /// Path of the configuration file.
        path: String,
        /// Description of the problem.
        message: String,
    },
    /// The indicator engine rejected the input.
    AnalysisError {
        /// The underlying signal-ta error.
        source: signal_ta::Error,
        /// Symbol being analyzed, if known.
        symbol: Option<String>,
    },
    /// A report could not be serialized.
    OutputError {
        /// Description of the serialization failure.
        message: String,
    },
    /// An invalid argument was provided.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { source, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error with file '{p}': {source}. ")?;
                    write!(f, "Check that the file exists and you have read permissions.")
                } else {
                    write!(f, "I/O error: {source}")
                }
            }
            Self::CsvParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV parse error on line {l}: {message}. ")?;
                } else {
                    write!(f, "CSV parse error: {message}. ")?;
                }
                write!(
                    f,
                    "Ensure your CSV has a date column (YYYY-MM-DD) and a numeric close column."
                )
            }
            Self::ConfigError { path, message } => {
                write!(f, "Invalid configuration file '{path}': {message}. ")?;
                write!(
                    f,
                    "Recognized keys are rsi_window, macd_short, macd_long, macd_signal and flat_rsi."
                )
            }
            Self::AnalysisError { source, symbol } => match symbol {
                Some(s) => write!(f, "Analysis of '{s}' failed: {source}"),
                None => write!(f, "Analysis failed: {source}"),
            },
            Self::OutputError { message } => write!(f, "Cannot write report: {message}"),
            Self::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "Invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::AnalysisError { source, .. } => Some(source),
            Self::CsvParseError { .. }
            | Self::ConfigError { .. }
            | Self::OutputError { .. }
            | Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<signal_ta::Error> for CliError {
    fn from(err: signal_ta::Error) -> Self {
        Self::AnalysisError {
            source: err,
            symbol: None,
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::IoError { source, path: None },
            _ => Self::CsvParseError { message, line },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
