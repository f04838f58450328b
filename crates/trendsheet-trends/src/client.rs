//! HTTP client for the trends source.
//!
//! Wraps `reqwest` with source-specific quirks: the XSSI guard prefix every
//! endpoint prepends to its JSON body, and the explore/token handshake that
//! gates the widget-data endpoints.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::TrendsError;
use crate::types::{
    ExploreResponse, InterestOverTimeResponse, RelatedReport, RelatedSearchesResponse, Widget,
};

const DEFAULT_BASE_URL: &str = "https://trends.google.com/";

const EXPLORE_PATH: &str = "trends/api/explore";
const MULTILINE_PATH: &str = "trends/api/widgetdata/multiline";
const RELATED_PATH: &str = "trends/api/widgetdata/relatedsearches";

const WIDGET_TIMESERIES: &str = "TIMESERIES";
const WIDGET_RELATED_TOPICS: &str = "RELATED_TOPICS";
const WIDGET_RELATED_QUERIES: &str = "RELATED_QUERIES";

/// Query context returned by [`TrendsClient::build_payload`].
///
/// Owns the widget tokens for one (keyword, geo, timeframe) triple. Fetch
/// calls take it by reference, so the answer is always bound to the payload
/// that was actually built.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub keyword: String,
    pub geo: String,
    pub timeframe: String,
    interest: Option<Widget>,
    topics: Option<Widget>,
    queries: Option<Widget>,
}

/// Client for the trends source.
///
/// Use [`TrendsClient::new`] for production or
/// [`TrendsClient::with_base_url`] to point at a mock server in tests.
pub struct TrendsClient {
    client: Client,
    base_url: Url,
    hl: String,
    tz: i32,
}

impl TrendsClient {
    /// Creates a new client pointed at the production trends endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(hl: &str, tz: i32, timeout_secs: u64) -> Result<Self, TrendsError> {
        Self::with_base_url(hl, tz, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TrendsError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        hl: &str,
        tz: i32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TrendsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendsheet/0.1 (keyword-monitoring)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TrendsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            hl: hl.to_owned(),
            tz,
        })
    }

    /// Registers a (keyword, geo, timeframe) triple with the source and
    /// returns the [`QueryContext`] holding the widget tokens for it.
    ///
    /// An empty `geo` means worldwide.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`TrendsError::Deserialize`] if the explore body does not match the
    ///   expected shape.
    pub async fn build_payload(
        &self,
        keyword: &str,
        geo: &str,
        timeframe: &str,
    ) -> Result<QueryContext, TrendsError> {
        let req = serde_json::json!({
            "comparisonItem": [{ "keyword": keyword, "geo": geo, "time": timeframe }],
            "category": 0,
            "property": "",
        });
        let url = self.build_url(EXPLORE_PATH, &[("req", &req.to_string())]);
        let explore: ExploreResponse = self.fetch_json(&url).await?;

        let mut context = QueryContext {
            keyword: keyword.to_owned(),
            geo: geo.to_owned(),
            timeframe: timeframe.to_owned(),
            interest: None,
            topics: None,
            queries: None,
        };
        for widget in explore.widgets {
            match widget.id.as_str() {
                WIDGET_TIMESERIES => context.interest = Some(widget),
                WIDGET_RELATED_TOPICS => context.topics = Some(widget),
                WIDGET_RELATED_QUERIES => context.queries = Some(widget),
                _ => {}
            }
        }
        tracing::debug!(
            keyword,
            geo,
            interest = context.interest.is_some(),
            topics = context.topics.is_some(),
            queries = context.queries.is_some(),
            "payload built"
        );
        Ok(context)
    }

    /// Fetches the interest-over-time series for the built payload.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::MissingWidget`] if explore returned no timeseries
    ///   widget for this payload.
    /// - [`TrendsError::Http`] / [`TrendsError::Deserialize`] as for every
    ///   fetch.
    pub async fn interest_over_time(
        &self,
        context: &QueryContext,
    ) -> Result<InterestOverTimeResponse, TrendsError> {
        let widget = context.interest.as_ref().ok_or(TrendsError::MissingWidget {
            widget: WIDGET_TIMESERIES,
        })?;
        let url = self.widget_url(MULTILINE_PATH, widget);
        self.fetch_json(&url).await
    }

    /// Fetches the related-topics report for the built payload, reshaped
    /// into its top/rising buckets.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::MissingWidget`] if explore returned no
    ///   related-topics widget for this payload.
    /// - [`TrendsError::Http`] / [`TrendsError::Deserialize`] as for every
    ///   fetch.
    pub async fn related_topics(
        &self,
        context: &QueryContext,
    ) -> Result<RelatedReport, TrendsError> {
        let widget = context.topics.as_ref().ok_or(TrendsError::MissingWidget {
            widget: WIDGET_RELATED_TOPICS,
        })?;
        let url = self.widget_url(RELATED_PATH, widget);
        let response: RelatedSearchesResponse = self.fetch_json(&url).await?;
        Ok(RelatedReport::from(response))
    }

    /// Fetches the related-queries report for the built payload, reshaped
    /// into its top/rising buckets.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::MissingWidget`] if explore returned no
    ///   related-queries widget for this payload.
    /// - [`TrendsError::Http`] / [`TrendsError::Deserialize`] as for every
    ///   fetch.
    pub async fn related_queries(
        &self,
        context: &QueryContext,
    ) -> Result<RelatedReport, TrendsError> {
        let widget = context.queries.as_ref().ok_or(TrendsError::MissingWidget {
            widget: WIDGET_RELATED_QUERIES,
        })?;
        let url = self.widget_url(RELATED_PATH, widget);
        let response: RelatedSearchesResponse = self.fetch_json(&url).await?;
        Ok(RelatedReport::from(response))
    }

    /// Builds a widget-data URL from the widget's echoed request blob and
    /// token.
    fn widget_url(&self, path: &str, widget: &Widget) -> Url {
        self.build_url(
            path,
            &[("req", &widget.request.to_string()), ("token", &widget.token)],
        )
    }

    /// Builds a request URL with `hl`, `tz`, and the extra query parameters,
    /// all percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("hl", &self.hl);
            pairs.append_pair("tz", &self.tz.to_string());
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, strips the XSSI guard
    /// prefix, and parses the remainder as JSON.
    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, TrendsError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let json = strip_xssi_prefix(&body);
        serde_json::from_str(json).map_err(|e| TrendsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Drops the anti-hijacking guard (`)]}'` plus a comma or newline) the
/// source prepends to every JSON body. The guard length varies per
/// endpoint, so slice from the first JSON opener instead of a fixed offset.
fn strip_xssi_prefix(body: &str) -> &str {
    match body.find(['{', '[']) {
        Some(idx) => &body[idx..],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> TrendsClient {
        TrendsClient::with_base_url("en-US", 360, 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_hl_and_tz() {
        let client = test_client("https://trends.example.com");
        let url = client.build_url(EXPLORE_PATH, &[("req", "{}")]);
        assert_eq!(
            url.as_str(),
            "https://trends.example.com/trends/api/explore?hl=en-US&tz=360&req=%7B%7D"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://trends.example.com/");
        let url = client.build_url(MULTILINE_PATH, &[("token", "abc")]);
        assert!(url
            .as_str()
            .starts_with("https://trends.example.com/trends/api/widgetdata/multiline?"));
    }

    #[test]
    fn strip_xssi_prefix_variants() {
        assert_eq!(strip_xssi_prefix(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix(")]}',\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi_prefix(")]}'\n[1,2]"), "[1,2]");
    }

    #[test]
    fn strip_xssi_prefix_no_json_returns_input() {
        assert_eq!(strip_xssi_prefix("rate limited"), "rate limited");
    }
}
