//! Trends source response types.
//!
//! All types model the JSON payloads behind the source's XSSI guard prefix.
//! Fields the source omits for sparse data carry `#[serde(default)]`.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// explore
// ---------------------------------------------------------------------------

/// Response of the `explore` call: one widget per report kind, each carrying
/// the token and request blob the widget-data endpoints expect back.
#[derive(Debug, Deserialize)]
pub struct ExploreResponse {
    pub widgets: Vec<Widget>,
}

/// A single widget descriptor from `explore`.
///
/// `request` is kept opaque — the widget-data call echoes it back verbatim,
/// and its internals are not a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub request: serde_json::Value,
}

// ---------------------------------------------------------------------------
// widgetdata/multiline (interest over time)
// ---------------------------------------------------------------------------

/// Response of the interest-over-time widget.
#[derive(Debug, Deserialize)]
pub struct InterestOverTimeResponse {
    pub default: Timeline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub timeline_data: Vec<TimelinePoint>,
}

/// One time bucket of the interest series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Unix seconds as a decimal string.
    pub time: String,
    #[serde(default)]
    pub formatted_time: String,
    /// One 0–100 popularity value per queried keyword.
    #[serde(default)]
    pub value: Vec<i64>,
    /// Set on buckets still inside the reporting lag window. Dropped during
    /// normalization, never surfaced downstream.
    #[serde(default)]
    pub is_partial: bool,
}

// ---------------------------------------------------------------------------
// widgetdata/relatedsearches (related topics / queries)
// ---------------------------------------------------------------------------

/// Response of a related-searches widget. The first ranked list holds the
/// "top" entries, the second the "rising" entries; either may be absent.
#[derive(Debug, Deserialize)]
pub struct RelatedSearchesResponse {
    pub default: RankedLists,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedLists {
    #[serde(default)]
    pub ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedList {
    #[serde(default)]
    pub ranked_keyword: Vec<RankedEntry>,
}

/// One related topic or query.
///
/// Topic entries carry `topic`; query entries carry `query`. The score is
/// absolute association for top entries and relative growth for rising ones;
/// `formatted_value` is the display form (e.g. `"+1,950%"` or `"Breakout"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    #[serde(default)]
    pub topic: Option<TopicRef>,
    #[serde(default)]
    pub query: Option<String>,
    pub value: i64,
    #[serde(default)]
    pub formatted_value: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Topic identity embedded in a related-topics entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRef {
    pub mid: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A related report reshaped into its two buckets. Both empty means the
/// source had no signal for the pair — a normal outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct RelatedReport {
    pub top: Vec<RankedEntry>,
    pub rising: Vec<RankedEntry>,
}

impl RelatedReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.rising.is_empty()
    }
}

impl From<RelatedSearchesResponse> for RelatedReport {
    fn from(response: RelatedSearchesResponse) -> Self {
        let mut lists = response.default.ranked_list.into_iter();
        let top = lists.next().map(|l| l.ranked_keyword).unwrap_or_default();
        let rising = lists.next().map(|l| l.ranked_keyword).unwrap_or_default();
        Self { top, rising }
    }
}
