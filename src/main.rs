//! CLI entry point for the FAR survey rater.
//!
//! Rates a dashboard CSV export from the command line, exports the
//! summary CSV, or serves the web upload form.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use far_survey_rater::analyzers::aggregate::aggregate;
use far_survey_rater::analyzers::types::GroupResult;
use far_survey_rater::output;
use far_survey_rater::parser::parse_rows;
use far_survey_rater::web;
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "far_survey_rater")]
#[command(about = "Computes weighted satisfaction scores from FAR survey exports", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Path to a dashboard CSV export to rate
    #[arg(value_name = "CSV_FILE")]
    file: Option<String>,

    /// Output format for the rated results
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    /// Per-group text report blocks
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate an export and write the flat summary CSV
    Export {
        /// Path to a dashboard CSV export
        #[arg(value_name = "CSV_FILE")]
        file: String,

        /// Summary CSV file to write
        #[arg(short, long, default_value = "far_summary.csv")]
        output: String,
    },
    /// Serve the web upload form
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:5000", env = "FAR_RATER_BIND")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/far_survey_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("far_survey_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match (cli.command, cli.file) {
        (Some(Commands::Serve { bind }), _) => {
            web::serve(&bind).await?;
        }
        (Some(Commands::Export { file, output }), _) => {
            let results = rate_file(&file)?;
            if results.is_empty() {
                eprintln!("no instructor survey rows found in {file}");
            } else {
                output::write_summary_file(&output, &results)?;
                info!(groups = results.len(), output, "Summary CSV written");
                println!("wrote {} group(s) to {}", results.len(), output);
            }
        }
        (None, Some(file)) => {
            let results = rate_file(&file)?;
            if results.is_empty() {
                eprintln!("no instructor survey rows found in {file}");
            }
            match cli.format {
                Format::Text => print!("{}", output::render_report(&results)),
                Format::Json => println!("{}", output::to_json_pretty(&results)?),
            }
        }
        (None, None) => {
            eprintln!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Parses and aggregates a CSV export from disk.
fn rate_file(path: &str) -> Result<Vec<GroupResult>> {
    let file = File::open(path).with_context(|| format!("could not open {path}"))?;
    let rows = parse_rows(file).with_context(|| format!("could not rate {path}"))?;
    let results = aggregate(&rows);
    output::print_pretty(&results);
    Ok(results)
}
