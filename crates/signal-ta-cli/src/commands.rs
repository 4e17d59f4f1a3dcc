//! Command execution: load inputs, analyze, write.

use chrono::{Local, NaiveDate};
use signal_ta::batch::BatchProcessor;
use signal_ta::engine::IndicatorConfig;
use signal_ta::series::PriceSeries;
use tracing::{debug, info};

use crate::args::{Args, Command, InputArgs, OutputFormat};
use crate::config::resolve_config;
use crate::csv_parser::{parse_price_csv, symbol_from_path};
use crate::csv_writer::{write_analysis_csv, write_json, write_signals_csv, OutputDest};
use crate::dates::{resolve_range, DateRange};
use crate::error::{CliError, Result};
use crate::report::SymbolReport;

/// Price series loaded from the inputs, already cut to the date range.
#[derive(Debug, Clone, Default)]
pub struct LoadedInputs {
    /// Symbol of each series.
    pub symbols: Vec<String>,
    /// Close prices in range, aligned with `symbols`.
    pub series: Vec<PriceSeries<f64>>,
}

/// Reads every input, keeping only the days in `range`.
///
/// A symbol with no days in range is reported on stderr and skipped.
///
/// # Errors
///
/// Returns the first read or parse error.
pub fn load_inputs(input: &InputArgs, range: DateRange) -> Result<LoadedInputs> {
    let mut loaded = LoadedInputs::default();
    for path in &input.inputs {
        let symbol = symbol_from_path(path);
        let series = parse_price_csv(path)?.between(range.start, range.end);
        if series.is_empty() {
            eprintln!("{symbol}: no price data in the requested date range, skipping");
            continue;
        }
        debug!(%symbol, rows = series.len(), "loaded symbol");
        loaded.symbols.push(symbol);
        loaded.series.push(series);
    }
    Ok(loaded)
}

/// Analyzes every loaded series.
///
/// # Errors
///
/// Returns `CliError::AnalysisError` if the engine rejects the configuration
/// or a series. A rejected series names its symbol in the error.
pub fn analyze_inputs<'a>(loaded: &'a LoadedInputs, config: &IndicatorConfig) -> Result<Vec<SymbolReport<'a>>> {
    config.validate()?;
    let processor = BatchProcessor::new(*config);
    let reports = processor.analyze(&loaded.series).map_err(|source| {
        let symbol = loaded
            .series
            .iter()
            .position(|series| processor.engine().analyze(series).is_err())
            .and_then(|i| loaded.symbols.get(i).cloned());
        CliError::AnalysisError { source, symbol }
    })?;
    Ok(loaded
        .symbols
        .iter()
        .zip(reports)
        .map(|(symbol, report)| SymbolReport::new(symbol.clone(), report))
        .collect())
}

/// Runs `args` with `today` as the latest allowed end date.
///
/// # Errors
///
/// Returns any configuration, input, analysis or output error.
pub fn run_with_today(args: &Args, today: NaiveDate) -> Result<()> {
    let input = args.input();
    let config = resolve_config(input)?;
    config.validate()?;
    let range = resolve_range(input.start.as_deref(), input.end.as_deref(), today)?;

    let loaded = load_inputs(input, range)?;
    let reports = analyze_inputs(&loaded, &config)?;
    info!(symbols = reports.len(), "analysis complete");

    let writer = OutputDest::from_option(args.output_path()).writer()?;
    match &args.command {
        Command::Analyze {
            format: OutputFormat::Csv,
            ..
        } => write_analysis_csv(&reports, writer),
        Command::Analyze {
            format: OutputFormat::Json,
            ..
        } => write_json(&reports, writer),
        Command::Signals { .. } => write_signals_csv(&reports, writer),
    }
}

/// Runs `args` against the local calendar date.
///
/// # Errors
///
/// See [`run_with_today`].
pub fn run(args: &Args) -> Result<()> {
    run_with_today(args, Local::now().date_naive())
}
