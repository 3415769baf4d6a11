//! CLI entry point for the bike-share statistics explorer.
//!
//! With no subcommand (or `explore`) it runs the interactive session; `report`
//! runs a single non-interactive pass for a given city and filter set.

use anyhow::Result;
use bikeshare_stats::{
    config::CityRegistry,
    filters::{DayFilter, FilterSelection, MonthFilter},
    loader::load_data,
    output::{export_table, write_json, write_report},
    prompt::{LinePrompter, TerminalPrompter},
    session,
    stats::compute_all,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory holding the city trip files
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON file describing the available cities (defaults to the three stock cities)
    #[arg(long, global = true, env = "BIKESHARE_CITIES")]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick filters and browse statistics (default)
    Explore,
    /// Print statistics for one city and filter set without prompting
    Report {
        /// City to analyze, e.g. "chicago" or "new york city"
        #[arg(short, long)]
        city: String,

        /// Month to keep (January through June), or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Day of week to keep, or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the filtered trips to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing()?;
    let cli = Cli::parse();

    let registry = match &cli.cities {
        Some(path) => CityRegistry::load(path, &cli.data_dir)?,
        None => CityRegistry::with_data_dir(&cli.data_dir),
    };

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            if io::stdin().is_terminal() {
                session::run(&mut TerminalPrompter::new(), &registry)?;
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
                session::run(&mut prompter, &registry)?;
            }
        }
        Commands::Report {
            city,
            month,
            day,
            format,
            export,
        } => {
            let entry = registry.resolve(&city)?;
            let selection = FilterSelection {
                city: entry.name.clone(),
                month,
                day,
            };

            let table = load_data(&registry, &selection)?;
            let report = compute_all(&table, &selection, entry.has_demographics);

            let mut stdout = io::stdout().lock();
            match format {
                Format::Text => write_report(&mut stdout, &report)?,
                Format::Json => write_json(&mut stdout, &report)?,
            }

            if let Some(path) = export {
                export_table(&path, &table)?;
                info!(path = %path.display(), "Filtered trips exported");
            }
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// Stderr defaults to `warn` so log lines do not interleave with prompts;
/// `RUST_LOG` and `RUST_LOG_JSON` override the per-layer defaults.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(log_filter("RUST_LOG", LevelFilter::WARN)?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(log_filter("RUST_LOG_JSON", LevelFilter::DEBUG)?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

/// Reads a filter from `var`, falling back to `default` when it is unset or
/// names no level.
fn log_filter(var: &str, default: LevelFilter) -> Result<EnvFilter> {
    directive_filter(&std::env::var(var).unwrap_or_default(), default)
}

fn directive_filter(spec: &str, default: LevelFilter) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(default.into())
        .parse(spec)?)
}
