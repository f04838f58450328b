//! Command-line entry point: loads configuration and the watchlist, checks
//! the spreadsheet is reachable, then runs one collection pass.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trendsheet_collector::run_collection;
use trendsheet_core::{load_app_config, load_watchlist};
use trendsheet_sheets::SheetsClient;
use trendsheet_trends::TrendsClient;

#[derive(Debug, Parser)]
#[command(name = "trendsheet", about = "Collect keyword popularity reports into a spreadsheet")]
struct Cli {
    /// Watchlist file to run; defaults to TRENDSHEET_WATCHLIST_PATH.
    #[arg(long, value_name = "FILE")]
    watchlist: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_app_config().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(env = %config.env, "trendsheet starting");

    let watchlist_path = cli.watchlist.unwrap_or_else(|| config.watchlist_path.clone());
    let watchlist = load_watchlist(&watchlist_path)
        .with_context(|| format!("failed to load watchlist {}", watchlist_path.display()))?;

    let trends = TrendsClient::new(
        &config.trends_hl,
        config.trends_tz,
        config.request_timeout_secs,
    )
    .context("failed to build trends client")?;
    let sheets = SheetsClient::new(
        &config.sheets_token,
        &config.spreadsheet_id,
        config.request_timeout_secs,
    )
    .context("failed to build sheets client")?;

    // Fail fast before any source traffic if the sink is unreachable or the
    // credentials are wrong.
    let info = sheets
        .open()
        .await
        .with_context(|| format!("cannot open spreadsheet {}", config.spreadsheet_id))?;
    info!(spreadsheet = %info.title, worksheets = info.worksheets.len(), "spreadsheet opened");

    let summary = run_collection(&trends, &sheets, &watchlist).await;
    info!(
        pairs_attempted = summary.pairs_attempted,
        pairs_failed = summary.pairs_failed,
        writes = summary.writes,
        skipped = summary.skipped,
        write_failures = summary.write_failures,
        "done"
    );

    Ok(())
}
