//! CLI entry point for tlc_tripstats.
//!
//! With no subcommand the fixed script runs: one uncompressed-size check
//! followed by the yearly row-count aggregations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tlc_tripstats::{
    config::Config,
    counter::count_rows,
    dataset::Service,
    fetch::BasicClient,
    output::print_json,
    script::run_script,
    size::check_uncompressed_size,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "tlc_tripstats")]
#[command(about = "Row counts and sizes for NYC TLC trip record files", long_about = None)]
struct Cli {
    /// Archive root to download from (overrides TLC_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fixed size check and row-count aggregations
    Run {
        /// Also log a JSON summary of the run
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report the uncompressed size of one monthly file
    Size {
        #[arg(value_enum)]
        service: Service,
        year: i32,
        month: u32,
    },
    /// Count data rows across months of one year
    Rows {
        #[arg(value_enum)]
        service: Service,
        year: i32,
        /// Months to include (defaults to 1 through 12)
        months: Vec<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_base_url(cli.base_url);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("tlc_tripstats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    info!(base_url = %config.base_url, "Using trip record archive");
    let client = BasicClient::new()?;

    match cli.command.unwrap_or(Commands::Run { json: false }) {
        Commands::Run { json } => {
            let summary = run_script(&client, &config.base_url).await?;
            if json {
                print_json(&summary)?;
            }
        }
        Commands::Size {
            service,
            year,
            month,
        } => {
            check_uncompressed_size(&client, &config.base_url, service, year, month).await?;
        }
        Commands::Rows {
            service,
            year,
            months,
        } => {
            let months = if months.is_empty() {
                (1..=12).collect()
            } else {
                months
            };
            count_rows(&client, &config.base_url, service, year, &months).await;
        }
    }

    Ok(())
}
