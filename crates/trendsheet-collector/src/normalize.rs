//! Normalization of raw trends reports into uniform provenance-stamped
//! tables.
//!
//! Pure transformations: the extraction timestamp is injected by the
//! caller, never read from a system clock here. Absent or empty input
//! yields an empty table — the documented "no signal" outcome, not an
//! error.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use trendsheet_core::{RelatedKind, Table, TableError};
use trendsheet_trends::{InterestOverTimeResponse, RankedEntry, RelatedReport};

use crate::aggregate::aggregate;

/// Column layout of the interest series after normalization. The source's
/// partiality flag is deliberately absent: it is dropped here and never
/// surfaces downstream.
const INTEREST_COLUMNS: [&str; 6] = [
    "Date",
    "Interest",
    "Keyword",
    "Country",
    "Geo_Code",
    "Extracted_Date",
];

const TOPIC_COLUMNS: [&str; 10] = [
    "Topic_Mid",
    "Topic_Title",
    "Topic_Type",
    "Value",
    "Formatted_Value",
    "Type",
    "Keyword",
    "Country",
    "Geo_Code",
    "Extracted_Date",
];

const QUERY_COLUMNS: [&str; 8] = [
    "Query",
    "Value",
    "Formatted_Value",
    "Type",
    "Keyword",
    "Country",
    "Geo_Code",
    "Extracted_Date",
];

/// Timestamp format written into the `Extracted_Date` column.
const EXTRACTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn provenance_cells(
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> [Value; 4] {
    [
        json!(keyword),
        json!(country),
        json!(geo),
        json!(extracted_at.format(EXTRACTED_FORMAT).to_string()),
    ]
}

/// Converts a unix-seconds string into a `YYYY-MM-DD` date cell, falling
/// back to the source's display form when the seconds do not parse.
fn date_cell(time: &str, formatted_time: &str) -> Value {
    time.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map_or_else(
            || json!(formatted_time),
            |dt| json!(dt.date_naive().format("%Y-%m-%d").to_string()),
        )
}

/// Normalizes an interest-over-time series: one row per time bucket, with
/// the time index made an explicit `Date` column and the partiality flag
/// dropped.
///
/// An empty timeline yields an empty table.
#[must_use]
pub fn interest_table(
    response: &InterestOverTimeResponse,
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> Table {
    if response.default.timeline_data.is_empty() {
        return Table::empty();
    }

    let mut table = Table::new(columns(&INTEREST_COLUMNS));
    for point in &response.default.timeline_data {
        let mut row = vec![
            date_cell(&point.time, &point.formatted_time),
            json!(point.value.first().copied().unwrap_or_default()),
        ];
        row.extend(provenance_cells(keyword, country, geo, extracted_at));
        // Row width is fixed by construction; a mismatch here is a bug.
        if let Err(e) = table.push_row(row) {
            tracing::warn!(error = %e, "dropping malformed interest row");
        }
    }
    table
}

/// Normalizes a related-topics report: every row stamped with its bucket
/// (`Top` / `Rising`) and the provenance columns, top rows strictly before
/// rising rows.
///
/// Both buckets empty yields an empty table, never an error.
///
/// # Errors
///
/// Returns [`TableError`] only if bucket concatenation produces mismatched
/// headers, which cannot happen for the fixed layouts built here.
pub fn related_topics_table(
    report: &RelatedReport,
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> Result<Table, TableError> {
    aggregate(vec![
        topic_bucket(&report.top, RelatedKind::Top, keyword, country, geo, extracted_at),
        topic_bucket(
            &report.rising,
            RelatedKind::Rising,
            keyword,
            country,
            geo,
            extracted_at,
        ),
    ])
}

/// Normalizes a related-queries report; same shape contract as
/// [`related_topics_table`] but keyed by the free-text query string.
///
/// # Errors
///
/// Returns [`TableError`] only if bucket concatenation produces mismatched
/// headers, which cannot happen for the fixed layouts built here.
pub fn related_queries_table(
    report: &RelatedReport,
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> Result<Table, TableError> {
    aggregate(vec![
        query_bucket(&report.top, RelatedKind::Top, keyword, country, geo, extracted_at),
        query_bucket(
            &report.rising,
            RelatedKind::Rising,
            keyword,
            country,
            geo,
            extracted_at,
        ),
    ])
}

fn topic_bucket(
    entries: &[RankedEntry],
    bucket: RelatedKind,
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> Table {
    if entries.is_empty() {
        return Table::empty();
    }
    let mut table = Table::new(columns(&TOPIC_COLUMNS));
    for entry in entries {
        // Entries without a topic are malformed for this report kind.
        let Some(topic) = &entry.topic else {
            tracing::debug!(bucket = bucket.as_str(), "skipping related entry without topic");
            continue;
        };
        let mut row = vec![
            json!(topic.mid),
            json!(topic.title),
            json!(topic.kind),
            json!(entry.value),
            json!(entry.formatted_value),
            json!(bucket.as_str()),
        ];
        row.extend(provenance_cells(keyword, country, geo, extracted_at));
        if let Err(e) = table.push_row(row) {
            tracing::warn!(error = %e, "dropping malformed topic row");
        }
    }
    if table.is_empty() {
        return Table::empty();
    }
    table
}

fn query_bucket(
    entries: &[RankedEntry],
    bucket: RelatedKind,
    keyword: &str,
    country: &str,
    geo: &str,
    extracted_at: DateTime<Utc>,
) -> Table {
    if entries.is_empty() {
        return Table::empty();
    }
    let mut table = Table::new(columns(&QUERY_COLUMNS));
    for entry in entries {
        let Some(query) = &entry.query else {
            tracing::debug!(bucket = bucket.as_str(), "skipping related entry without query");
            continue;
        };
        let mut row = vec![
            json!(query),
            json!(entry.value),
            json!(entry.formatted_value),
            json!(bucket.as_str()),
        ];
        row.extend(provenance_cells(keyword, country, geo, extracted_at));
        if let Err(e) = table.push_row(row) {
            tracing::warn!(error = %e, "dropping malformed query row");
        }
    }
    if table.is_empty() {
        return Table::empty();
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn extracted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 30, 0).unwrap()
    }

    fn series(json_body: &str) -> InterestOverTimeResponse {
        serde_json::from_str(json_body).unwrap()
    }

    fn query_entry(query: &str, value: i64, formatted: &str) -> RankedEntry {
        serde_json::from_value(json!({
            "query": query,
            "value": value,
            "formattedValue": formatted,
        }))
        .unwrap()
    }

    fn topic_entry(mid: &str, title: &str, kind: &str, value: i64) -> RankedEntry {
        serde_json::from_value(json!({
            "topic": { "mid": mid, "title": title, "type": kind },
            "value": value,
            "formattedValue": value.to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn interest_drops_partiality_and_converts_dates() {
        let response = series(
            r#"{"default":{"timelineData":[
                {"time":"1719792000","formattedTime":"Jun 30, 2024","value":[42],"isPartial":false},
                {"time":"1719878400","formattedTime":"Jul 1, 2024","value":[55],"isPartial":true}
            ]}}"#,
        );
        let table = interest_table(&response, "skincare", "Slovensko", "SK", extracted());

        assert!(!table.columns().iter().any(|c| c.contains("artial")));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][0], json!("2024-06-30"));
        assert_eq!(table.rows()[0][1], json!(42));
        // Partial and non-partial buckets normalize identically.
        assert_eq!(table.rows()[1].len(), table.rows()[0].len());
        assert_eq!(table.rows()[1][0], json!("2024-07-01"));
    }

    #[test]
    fn interest_stamps_provenance_on_every_row() {
        let response = series(
            r#"{"default":{"timelineData":[
                {"time":"1719792000","formattedTime":"Jun 30, 2024","value":[7]}
            ]}}"#,
        );
        let table = interest_table(&response, "seo", "Slovensko", "SK", extracted());
        let row = &table.rows()[0];
        assert_eq!(row[2], json!("seo"));
        assert_eq!(row[3], json!("Slovensko"));
        assert_eq!(row[4], json!("SK"));
        assert_eq!(row[5], json!("2024-07-01 12:30:00"));
    }

    #[test]
    fn interest_empty_timeline_is_empty_table() {
        let response = series(r#"{"default":{"timelineData":[]}}"#);
        let table = interest_table(&response, "seo", "Slovensko", "SK", extracted());
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn interest_unparseable_time_falls_back_to_display_form() {
        let response = series(
            r#"{"default":{"timelineData":[
                {"time":"not-a-number","formattedTime":"Jun 30, 2024","value":[3]}
            ]}}"#,
        );
        let table = interest_table(&response, "seo", "Slovensko", "SK", extracted());
        assert_eq!(table.rows()[0][0], json!("Jun 30, 2024"));
    }

    #[test]
    fn related_queries_top_rows_precede_rising_rows() {
        let report = RelatedReport {
            top: vec![
                query_entry("seo audit", 100, "100"),
                query_entry("seo tools", 80, "80"),
            ],
            rising: vec![query_entry("ai seo", 1950, "+1,950%")],
        };
        let table =
            related_queries_table(&report, "seo", "Slovensko", "SK", extracted()).unwrap();

        assert_eq!(table.row_count(), 3);
        let type_col = table
            .columns()
            .iter()
            .position(|c| c == "Type")
            .expect("Type column must exist");
        assert_eq!(table.rows()[0][type_col], json!("Top"));
        assert_eq!(table.rows()[1][type_col], json!("Top"));
        assert_eq!(table.rows()[2][type_col], json!("Rising"));
        assert_eq!(table.rows()[2][0], json!("ai seo"));
    }

    #[test]
    fn related_queries_only_rising_is_still_stamped() {
        let report = RelatedReport {
            top: vec![],
            rising: vec![query_entry("breakout", 0, "Breakout")],
        };
        let table =
            related_queries_table(&report, "seo", "Slovensko", "SK", extracted()).unwrap();
        assert_eq!(table.row_count(), 1);
        let type_col = table.columns().iter().position(|c| c == "Type").unwrap();
        assert_eq!(table.rows()[0][type_col], json!("Rising"));
    }

    #[test]
    fn related_queries_both_buckets_empty_is_empty_table() {
        let report = RelatedReport::default();
        let table =
            related_queries_table(&report, "seo", "Slovensko", "SK", extracted()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn related_topics_carry_topic_identity() {
        let report = RelatedReport {
            top: vec![topic_entry("/m/0k1h", "Skin care", "Topic", 100)],
            rising: vec![],
        };
        let table =
            related_topics_table(&report, "skincare", "Česko", "CZ", extracted()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row[0], json!("/m/0k1h"));
        assert_eq!(row[1], json!("Skin care"));
        assert_eq!(row[2], json!("Topic"));
    }

    #[test]
    fn related_topics_skip_entries_without_topic() {
        let report = RelatedReport {
            top: vec![query_entry("not a topic", 1, "1")],
            rising: vec![],
        };
        let table =
            related_topics_table(&report, "seo", "Slovensko", "SK", extracted()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn empty_geo_code_means_worldwide_and_is_preserved() {
        let report = RelatedReport {
            top: vec![query_entry("seo", 100, "100")],
            rising: vec![],
        };
        let table = related_queries_table(&report, "seo", "Worldwide", "", extracted()).unwrap();
        let geo_col = table
            .columns()
            .iter()
            .position(|c| c == "Geo_Code")
            .unwrap();
        assert_eq!(table.rows()[0][geo_col], json!(""));
    }
}
