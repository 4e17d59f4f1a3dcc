//! CLI argument parsing module.
//!
//! The CLI follows the pattern: `signal-ta <command> <input.csv>... [options]`
//!
//! # Examples
//!
//! ```bash
//! # Full report for one symbol with default windows (RSI 14, MACD 12,26,9)
//! signal-ta analyze AAPL.csv
//!
//! # Several symbols, a date range and custom windows, written as JSON
//! signal-ta analyze AAPL.csv MSFT.csv --start 2023-01-01 --end 2023-12-31 \
//!     --rsi 10 --macd 8,21,5 --format json -o report.json
//!
//! # Windows from a TOML file, flags still win
//! signal-ta analyze AAPL.csv --config ta.toml --rsi 7
//!
//! # Only the Buy/Sell crossover events
//! signal-ta signals AAPL.csv MSFT.csv
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::error::{CliError, Result};

/// signal-ta: RSI and MACD crossover signals from daily price history
#[derive(Parser, Debug)]
#[command(name = "signal-ta")]
#[command(author, version, about = "RSI and MACD crossover signals from daily price history")]
#[command(long_about = "signal-ta reads daily close prices from CSV files (one symbol per \
    file), computes the Relative Strength Index and MACD, and reports Buy/Sell events \
    where the MACD line crosses its signal line.")]
pub struct Args {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Full indicator report
    #[command(about = "Per-day RSI, MACD, trend and crossover events")]
    Analyze {
        /// Inputs and indicator settings
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Crossover events only
    #[command(about = "Buy/Sell events where the MACD line crosses its signal line")]
    Signals {
        /// Inputs and indicator settings
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Arguments shared by every command.
#[derive(ClapArgs, Debug, Clone)]
pub struct InputArgs {
    /// Input CSV files, one symbol per file (symbol = file name without extension)
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day to include (YYYY-MM-DD); a future date is clamped to today
    #[arg(long)]
    pub end: Option<String>,

    /// RSI window
    #[arg(long)]
    pub rsi: Option<usize>,

    /// MACD windows: short,long,signal (e.g., 12,26,9)
    #[arg(long)]
    pub macd: Option<String>,

    /// TOML file with indicator settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One CSV row per symbol and day
    Csv,
    /// One JSON document holding every report
    Json,
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The input and indicator arguments of the command.
    #[must_use]
    pub const fn input(&self) -> &InputArgs {
        match &self.command {
            Command::Analyze { input, .. } | Command::Signals { input, .. } => input,
        }
    }

    /// Get the output file path from the command, if specified.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        match &self.command {
            Command::Analyze { output, .. } | Command::Signals { output, .. } => output.as_deref(),
        }
    }
}

/// Parse MACD windows from the string "short,long,signal".
///
/// Zero windows are left for the engine to reject.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` unless the string holds exactly three
/// non-negative integers.
pub fn parse_macd_params(params: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = params.split(',').collect();
    if parts.len() != 3 {
        return Err(CliError::InvalidArgument {
            argument: "macd".to_string(),
            reason: format!("MACD requires 3 windows, got {}", parts.len()),
            suggestion: Some("Use format: short,long,signal (e.g., 12,26,9)".to_string()),
        });
    }

    let parse = |name: &str, raw: &str, example: &str| {
        raw.trim().parse::<usize>().map_err(|_| CliError::InvalidArgument {
            argument: name.to_string(),
            reason: format!("cannot parse '{raw}' as integer"),
            suggestion: Some(format!("Use a positive integer like {example}")),
        })
    };

    let short = parse("macd_short", parts[0], "12")?;
    let long = parse("macd_long", parts[1], "26")?;
    let signal = parse("macd_signal", parts[2], "9")?;

    Ok((short, long, signal))
}
