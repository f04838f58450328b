//! The sequential collection driver.
//!
//! One run walks the watchlist's (region, keyword) pairs in declared order,
//! fetches each enabled report, normalizes it, and resolves the destination
//! worksheet. Failures are contained at the smallest useful scope: a failed
//! report kind costs one table, a failed payload build costs one pair, and
//! neither aborts the run.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use trendsheet_core::{destination_name, ReportKind, Table, TableError, Watchlist};
use trendsheet_sheets::{SheetsClient, UpsertOutcome};
use trendsheet_trends::{QueryContext, TrendsClient, TrendsError};

use crate::normalize::{interest_table, related_queries_table, related_topics_table};
use crate::schedule::{pair_schedule, report_pause};

/// Tally of one collection run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs the run tried to collect.
    pub pairs_attempted: u64,
    /// Pairs whose payload build failed; none of their reports were fetched.
    pub pairs_failed: u64,
    /// Worksheets created or replaced.
    pub writes: u64,
    /// Empty tables that produced no sink traffic.
    pub skipped: u64,
    /// Non-empty tables whose write to the sink failed.
    pub write_failures: u64,
}

/// Failure of a single report kind within a pair.
#[derive(Debug, Error)]
enum KindError {
    #[error(transparent)]
    Fetch(#[from] TrendsError),
    #[error(transparent)]
    Shape(#[from] TableError),
}

/// Runs one full collection pass over the watchlist.
///
/// Always returns a summary; per-pair and per-report failures are logged
/// and tallied rather than propagated.
pub async fn run_collection(
    trends: &TrendsClient,
    sheets: &SheetsClient,
    watchlist: &Watchlist,
) -> RunSummary {
    let run_id = Uuid::new_v4();
    let kinds = watchlist.reports.enabled();
    info!(
        %run_id,
        keywords = watchlist.keywords.len(),
        regions = watchlist.regions.len(),
        timeframe = %watchlist.timeframe,
        pair_delay_secs = watchlist.pair_delay_secs,
        report_delay_secs = watchlist.report_delay_secs,
        "collection run started"
    );

    let mut summary = RunSummary::default();
    for step in pair_schedule(&watchlist.regions, &watchlist.keywords) {
        summary.pairs_attempted += 1;
        process_pair(
            trends,
            sheets,
            watchlist,
            &kinds,
            step.region.country.as_str(),
            step.region.geo.as_str(),
            step.keyword,
            &mut summary,
        )
        .await;

        if step.wait_after && watchlist.pair_delay_secs > 0 {
            tokio::time::sleep(Duration::from_secs(watchlist.pair_delay_secs)).await;
        }
    }

    info!(
        %run_id,
        pairs_attempted = summary.pairs_attempted,
        pairs_failed = summary.pairs_failed,
        writes = summary.writes,
        skipped = summary.skipped,
        write_failures = summary.write_failures,
        "collection run finished"
    );
    summary
}

#[allow(clippy::too_many_arguments)]
async fn process_pair(
    trends: &TrendsClient,
    sheets: &SheetsClient,
    watchlist: &Watchlist,
    kinds: &[ReportKind],
    country: &str,
    geo: &str,
    keyword: &str,
    summary: &mut RunSummary,
) {
    info!(country, geo, keyword, "collecting pair");

    let context = match trends
        .build_payload(keyword, geo, &watchlist.timeframe)
        .await
    {
        Ok(context) => context,
        Err(e) => {
            summary.pairs_failed += 1;
            error!(country, keyword, error = %e, "payload build failed, pair dropped");
            return;
        }
    };

    // One extraction stamp per pair: all of its tables carry the same
    // provenance timestamp.
    let extracted_at = Utc::now();

    for (index, kind) in kinds.iter().enumerate() {
        if let Some(pause) = report_pause(index, watchlist.report_delay_secs) {
            tokio::time::sleep(pause).await;
        }

        let table = match fetch_table(trends, &context, *kind, country, geo, extracted_at).await {
            Ok(table) => table,
            Err(e) => {
                warn!(country, keyword, report = %kind, error = %e, "report fetch failed");
                Table::empty()
            }
        };

        let destination = destination_name(country, keyword, *kind);
        match sheets.upsert_table(&destination, &table).await {
            Ok(UpsertOutcome::Skipped) => {
                summary.skipped += 1;
                info!(worksheet = %destination, "empty report, write skipped");
            }
            Ok(outcome) => {
                summary.writes += 1;
                info!(worksheet = %destination, outcome = %outcome, rows = table.row_count(), "worksheet written");
            }
            Err(e) => {
                summary.write_failures += 1;
                error!(worksheet = %destination, error = %e, "worksheet write failed");
            }
        }
    }
}

async fn fetch_table(
    trends: &TrendsClient,
    context: &QueryContext,
    kind: ReportKind,
    country: &str,
    geo: &str,
    extracted_at: chrono::DateTime<Utc>,
) -> Result<Table, KindError> {
    let keyword = context.keyword.as_str();
    match kind {
        ReportKind::Interest => {
            let response = trends.interest_over_time(context).await?;
            Ok(interest_table(&response, keyword, country, geo, extracted_at))
        }
        ReportKind::Topics => {
            let report = trends.related_topics(context).await?;
            Ok(related_topics_table(&report, keyword, country, geo, extracted_at)?)
        }
        ReportKind::Queries => {
            let report = trends.related_queries(context).await?;
            Ok(related_queries_table(&report, keyword, country, geo, extracted_at)?)
        }
    }
}
