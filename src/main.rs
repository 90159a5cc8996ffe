use std::fs::{self, File};
use std::io::{stderr, stdout, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use portfolio_normalizer::classifier::{Classifier, MappingTable};
use portfolio_normalizer::engine::{
    date_suffix, dated_path, emit_diagnostics, load_mapping, write_candidates, write_rows, Pipeline, PipelineConfig,
    DEFAULT_ASSET_MAP, DEFAULT_CLASS_MAP, MAPPING_DELIMITER
};
use portfolio_normalizer::parser::InputMode;

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-normalizer",
    version,
    about = "Normalize a portfolio export into consistent rows and add asset classifications"
)]
struct Args {
    /// Portfolio export to read [default: data/PortfolioWatchData.csv, or the saved page in markup mode]
    input: Option<PathBuf>,

    /// Encoding of the export
    #[arg(short, long, value_enum, default_value_t = InputMode::Tabular)]
    mode: InputMode,

    /// Group CDs and Treasuries in Fixed
    #[arg(short, long)]
    fixed: bool,

    /// Quiet mode, no warnings or status
    #[arg(short, long)]
    quiet: bool,

    /// Mapping file renaming labels to asset names [default: Asset-Map.csv]
    #[arg(long, visible_alias = "am")]
    asset_map: Option<PathBuf>,

    /// Mapping file assigning classes to asset names [default: Class-Map.csv]
    #[arg(long, visible_alias = "cm")]
    class_map: Option<PathBuf>,

    /// Field delimiter of tabular exports
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write assets without a class as class map candidates
    #[arg(long)]
    candidates: Option<PathBuf>,

    /// Append the current date to the report and candidates file names
    #[arg(long)]
    dated: bool,

    /// strftime format of the date appended by --dated, without the leading '-'
    #[arg(long, default_value = "%Y-%m-%d")]
    date_format: String,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet { LevelFilter::ERROR } else { parse_log_level(&args.log_level) };

    setup_logging(log_level);

    if !args.delimiter.is_ascii() {
        bail!("Delimiter '{}' is not an ASCII character", args.delimiter);
    }

    let config = PipelineConfig {
        mode: args.mode,
        fixed_income_grouping: args.fixed,
        quiet: args.quiet,
        delimiter: args.delimiter as u8
    };

    info!("{} v{} in {:?} mode", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), config.mode);

    let suffix = if args.dated {
        date_suffix(Local::now().date_naive(), &args.date_format)?
    } else {
        String::new()
    };

    let input_path = args.input.clone().unwrap_or_else(|| config.default_input());
    let input = fs::read(&input_path)
        .with_context(|| format!("Portfolio export not found at [{}]", input_path.display()))?;

    let asset_map = read_mapping(args.asset_map.as_deref(), DEFAULT_ASSET_MAP, config.quiet)?;
    let class_map = read_mapping(args.class_map.as_deref(), DEFAULT_CLASS_MAP, config.quiet)?;

    let pipeline = Pipeline::new(config, Classifier::new(asset_map, class_map));
    let output = pipeline
        .run(&input)
        .with_context(|| format!("Could not process [{}]", input_path.display()))?;

    match args.output.as_deref().map(|path| dated_path(path, &suffix)) {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("Could not create [{}]", path.display()))?;
            write_rows(BufWriter::new(file), &output.rows)?;
            info!("Wrote {} row(s) to [{}]", output.rows.len(), path.display());
        }
        None => write_rows(BufWriter::new(stdout().lock()), &output.rows)?
    }

    if let Some(path) = args.candidates.as_deref().map(|path| dated_path(path, &suffix)) {
        let unmapped = output.unmapped_assets();
        let file = File::create(&path).with_context(|| format!("Could not create [{}]", path.display()))?;
        write_candidates(BufWriter::new(file), &unmapped)?;
        info!("Wrote {} class map candidate(s) to [{}]", unmapped.len(), path.display());
    }

    Ok(())
}

//NOTE: An explicitly named mapping file must exist, the default one may be absent
fn read_mapping(path: Option<&Path>, default: &str, quiet: bool) -> Result<MappingTable> {
    let required = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(default));
    let (table, diagnostics) = load_mapping(path, required, MAPPING_DELIMITER)?;

    emit_diagnostics(&diagnostics, quiet);

    Ok(table)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout so it can be redirected, logging has to use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
