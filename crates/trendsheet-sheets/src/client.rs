//! HTTP client for the sheet service.
//!
//! Wraps `reqwest` with bearer-token auth, typed error mapping, and the
//! worksheet upsert discipline: a destination is always cleared before it
//! is rewritten, never appended to.

use std::time::Duration;

use reqwest::{Client, Url};

use trendsheet_core::Table;

use crate::error::SheetsError;
use crate::types::{ErrorResponse, SpreadsheetInfo, SpreadsheetResponse};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Minimum row capacity for newly created worksheets. Resizes are billed by
/// the backend, so new tabs start with generous headroom.
const MIN_ROW_CAPACITY: usize = 200;
/// Extra rows above the data when the data alone exceeds the minimum.
const ROW_HEADROOM: usize = 10;
/// Minimum column capacity; report widths stay well under this.
const MIN_COL_CAPACITY: usize = 20;

/// How an upsert resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No worksheet with the destination name existed; one was created and
    /// written.
    Created,
    /// The worksheet existed; its contents were cleared and rewritten.
    Replaced,
    /// The table was empty; the sink was not touched.
    Skipped,
}

impl std::fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Replaced => write!(f, "replaced"),
            UpsertOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Client for the sheet service, bound to one spreadsheet.
///
/// Use [`SheetsClient::new`] for production or
/// [`SheetsClient::with_base_url`] to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    token: String,
}

impl SheetsClient {
    /// Creates a new client pointed at the production sheet service.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, spreadsheet_id: &str, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::with_base_url(token, spreadsheet_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
        spreadsheet_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendsheet/0.1 (keyword-monitoring)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.to_owned(),
            token: token.to_owned(),
        })
    }

    /// Fetches the spreadsheet's title and worksheet list.
    ///
    /// Called once at startup as the initialization check: a missing or
    /// inaccessible spreadsheet must abort the run before any pair is
    /// attempted.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::SpreadsheetNotFound`] if the service answers 404.
    /// - [`SheetsError::Api`] on any other service-level rejection.
    /// - [`SheetsError::Http`] / [`SheetsError::Deserialize`] as for every
    ///   call.
    pub async fn open(&self) -> Result<SpreadsheetInfo, SheetsError> {
        let mut url = self.spreadsheet_url("");
        url.query_pairs_mut()
            .append_pair("fields", "properties.title,sheets.properties");
        let response = self.client.get(url.clone()).bearer_auth(&self.token).send().await?;
        // Only here does 404 mean the spreadsheet itself is gone; on
        // worksheet-level calls it can be a concurrently deleted tab.
        let response = self.check_status(response).await.map_err(|e| match e {
            SheetsError::Api { status: 404, .. } => SheetsError::SpreadsheetNotFound {
                id: self.spreadsheet_id.clone(),
            },
            other => other,
        })?;
        let body: SpreadsheetResponse = parse_body(response, &url).await?;
        Ok(SpreadsheetInfo::from(body))
    }

    /// Creates a new worksheet with the given grid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Api`] if the service rejects the request
    /// (e.g. a duplicate title), [`SheetsError::Http`] on transport failure.
    pub async fn add_worksheet(
        &self,
        title: &str,
        row_count: usize,
        column_count: usize,
    ) -> Result<(), SheetsError> {
        let url = self.spreadsheet_url(":batchUpdate");
        let body = serde_json::json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": row_count,
                            "columnCount": column_count,
                        }
                    }
                }
            }]
        });
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Clears all values in the named worksheet. Grid capacity and position
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Api`] / [`SheetsError::Http`] on failure.
    pub async fn clear_worksheet(&self, title: &str) -> Result<(), SheetsError> {
        let url = self.values_url(title, ":clear");
        let response = self.client.post(url).bearer_auth(&self.token).send().await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Writes the table (header row first) into the named worksheet,
    /// starting at the top-left cell.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Api`] / [`SheetsError::Http`] on failure.
    pub async fn write_table(&self, title: &str, table: &Table) -> Result<(), SheetsError> {
        let mut url = self.values_url(title, "");
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = serde_json::json!({
            "range": quoted_range(title),
            "majorDimension": "ROWS",
            "values": table.to_value_rows(),
        });
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Resolves one destination: skip when the table is empty, clear and
    /// rewrite an existing worksheet, or create a new one sized with the
    /// capacity floor.
    ///
    /// # Errors
    ///
    /// Any service or transport failure along the way; the caller decides
    /// whether that aborts anything (the collection driver never lets it).
    pub async fn upsert_table(
        &self,
        name: &str,
        table: &Table,
    ) -> Result<UpsertOutcome, SheetsError> {
        if table.is_empty() {
            return Ok(UpsertOutcome::Skipped);
        }

        let info = self.open().await?;
        let exists = info.worksheets.iter().any(|w| w.title == name);

        if exists {
            self.clear_worksheet(name).await?;
            self.write_table(name, table).await?;
            tracing::debug!(worksheet = name, rows = table.row_count(), "worksheet replaced");
            return Ok(UpsertOutcome::Replaced);
        }

        let (rows, cols) = grid_capacity(table);
        self.add_worksheet(name, rows, cols).await?;
        self.write_table(name, table).await?;
        tracing::debug!(worksheet = name, rows = table.row_count(), "worksheet created");
        Ok(UpsertOutcome::Created)
    }

    /// URL for a spreadsheet-level endpoint; `suffix` is appended to the
    /// spreadsheet id segment (e.g. `":batchUpdate"`).
    fn spreadsheet_url(&self, suffix: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("v4/spreadsheets/{}{}", self.spreadsheet_id, suffix));
        url
    }

    /// URL for a values endpoint on one worksheet range.
    fn values_url(&self, title: &str, suffix: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("base URL is always a valid base");
            segments.push("v4");
            segments.push("spreadsheets");
            segments.push(&self.spreadsheet_id);
            segments.push("values");
            segments.push(&format!("{}{}", quoted_range(title), suffix));
        }
        url
    }

    /// Maps a non-success status to a typed error, extracting the service's
    /// error message when the body carries one.
    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(&body).ok())
            .map_or_else(|| "unknown error".to_string(), |e| e.error.message);
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    url: &Url,
) -> Result<T, SheetsError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

/// Grid capacity for a newly created worksheet: row floor of
/// `max(MIN_ROW_CAPACITY, rows + ROW_HEADROOM)`, column floor of
/// `MIN_COL_CAPACITY`.
fn grid_capacity(table: &Table) -> (usize, usize) {
    let rows = (table.row_count() + ROW_HEADROOM).max(MIN_ROW_CAPACITY);
    let cols = table.column_count().max(MIN_COL_CAPACITY);
    (rows, cols)
}

/// Quotes a worksheet title for use as an A1 range, doubling embedded
/// single quotes.
fn quoted_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}
