//! HTTP client for the trends data source.
//!
//! Queries go through a two-step protocol: an `explore` call registers the
//! (keyword, geo, timeframe) triple and hands back one token per report
//! widget; the widget-data calls then redeem those tokens. The tokens live
//! in an explicit [`QueryContext`] that every fetch takes by reference, so
//! a report can never be fetched against a stale or missing payload.

pub mod client;
pub mod error;
pub mod types;

pub use client::{QueryContext, TrendsClient};
pub use error::TrendsError;
pub use types::{InterestOverTimeResponse, RankedEntry, RelatedReport, TimelinePoint, TopicRef};
