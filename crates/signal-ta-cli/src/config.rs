//! Indicator settings: optional TOML file, then command-line overrides.
//!
//! ```toml
//! rsi_window = 10
//! macd_short = 8
//! macd_long = 21
//! macd_signal = 5
//! flat_rsi = "undefined"
//! ```
//!
//! Missing keys keep their defaults; unknown keys are an error.

use std::fs;
use std::path::Path;

use signal_ta::engine::IndicatorConfig;
use tracing::{debug, warn};

use crate::args::{parse_macd_params, InputArgs};
use crate::error::{CliError, Result};

/// Parses indicator settings from TOML text.
///
/// # Errors
///
/// Returns `CliError::ConfigError` if the text is not valid TOML or holds an
/// unknown key or a value of the wrong type.
pub fn parse_config(text: &str, origin: &str) -> Result<IndicatorConfig> {
    toml::from_str(text).map_err(|e| CliError::ConfigError {
        path: origin.to_string(),
        message: e.message().to_string(),
    })
}

/// Loads indicator settings from a TOML file, or the defaults if `path` is
/// `None`.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be read, or
/// `CliError::ConfigError` if its contents are invalid.
pub fn load_config(path: Option<&Path>) -> Result<IndicatorConfig> {
    let Some(path) = path else {
        return Ok(IndicatorConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    let config = parse_config(&text, &path.display().to_string())?;
    debug!(path = %path.display(), ?config, "loaded indicator configuration");
    Ok(config)
}

/// Applies `--rsi` and `--macd` on top of `config`.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if `--macd` is malformed.
pub fn apply_overrides(mut config: IndicatorConfig, rsi: Option<usize>, macd: Option<&str>) -> Result<IndicatorConfig> {
    if let Some(window) = rsi {
        config.rsi_window = window;
    }
    if let Some(params) = macd {
        let (short, long, signal) = parse_macd_params(params)?;
        config.macd_short = short;
        config.macd_long = long;
        config.macd_signal = signal;
    }
    if config.macd_short >= config.macd_long {
        warn!(
            macd_short = config.macd_short,
            macd_long = config.macd_long,
            "short MACD window is not below the long window; the MACD line will be inverted or zero"
        );
    }
    Ok(config)
}

/// Resolves the effective configuration for a command.
///
/// # Errors
///
/// See [`load_config`] and [`apply_overrides`].
pub fn resolve_config(input: &InputArgs) -> Result<IndicatorConfig> {
    let base = load_config(input.config.as_deref())?;
    apply_overrides(base, input.rsi, input.macd.as_deref())
}
