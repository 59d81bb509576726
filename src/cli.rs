use crate::config::ResolvedConfig;
use crate::constants::CSV_FILE_NAME;
use crate::downloader::build_client;
use crate::errors::{AppError, AppResult};
use crate::exporter::write_csv;
use crate::models::TableExtraction;
use crate::pipeline::run_pipeline;
use crate::ui;
use crate::utils::format_duration;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// Two subcommands are available:
/// - `run`: fetch with default configuration, optionally overridden by flags
/// - `toml`: fetch using a TOML configuration file
pub fn build_command() -> Command<'static> {
    Command::new("sipsa-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("run")
                .about("Fetch the latest bulletin and show Bogotá prices")
                .after_help("Example:\n  sipsa-cli run --csv precios_bogota.csv --movers 5")
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .help("Bulletin index page to read the links from")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("csv")
                        .short('c')
                        .long("csv")
                        .help("Write the price table as CSV to this path")
                        .value_parser(clap::value_parser!(PathBuf))
                        .min_values(0)
                        .max_values(1)
                        .default_missing_value(CSV_FILE_NAME)
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("movers")
                        .short('m')
                        .long("movers")
                        .help("Number of products in each mover list")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("excerpt_chars")
                        .short('x')
                        .long("excerpt-chars")
                        .help("Characters of the PDF report to show")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

/// Parses command-line arguments and runs one bulletin fetch.
///
/// # Errors
///
/// Returns configuration errors before any request is made, and pipeline
/// errors before any part of the report is printed. See [`report_outcome`].
pub async fn cli() -> AppResult<()> {
    let mut cmd_for_help = build_command();
    let matches = build_command().get_matches();

    match matches.subcommand() {
        Some(("run", sub)) => {
            let config = config_from_run_args(sub)?;
            run_workflow(&config).await?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .ok_or_else(|| AppError::InvalidInput("Missing config path".into()))?;
            let config = ResolvedConfig::from_toml_file(config_path)?;
            run_workflow(&config).await?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::Io(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

/// Applies `run` flags on top of the default configuration.
pub fn config_from_run_args(sub: &ArgMatches) -> AppResult<ResolvedConfig> {
    let mut config = ResolvedConfig::default();

    if let Some(url) = sub.get_one::<String>("url") {
        config.source_url = url.clone();
    }
    if let Some(path) = sub.get_one::<PathBuf>("csv") {
        config.csv_path = Some(path.clone());
    }
    if let Some(&count) = sub.get_one::<usize>("movers") {
        config.mover_count = count;
    }
    if let Some(&chars) = sub.get_one::<usize>("excerpt_chars") {
        config.excerpt_chars = chars;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the pipeline, prints the report and writes the CSV export if asked.
pub async fn run_workflow(config: &ResolvedConfig) -> AppResult<()> {
    let started = Instant::now();
    info!(
        source = %config.source_url,
        location = %config.target_location,
        "Starting bulletin fetch"
    );

    let client = build_client(config.request_timeout_secs)?;
    let report = run_pipeline(&client, config).await?;

    print!("{}", ui::render_report(&report, config));

    if let (Some(path), Some(TableExtraction::Extracted(table))) = (&config.csv_path, &report.table)
    {
        write_csv(table, path).await?;
        println!("\nCSV written to {}", path.display());
    }

    info!(
        elapsed = %format_duration(started.elapsed()),
        "Bulletin fetch completed"
    );

    Ok(())
}

/// Writes the error notice for a failed run and picks the process exit status.
///
/// Returns `0` on success and `1` otherwise.
pub fn report_outcome(result: &AppResult<()>, out: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            if let Err(write_err) = write!(out, "{}", ui::render_error_notice(e)) {
                error!(error = %write_err, "Failed to write error notice");
            }
            1
        }
    }
}
