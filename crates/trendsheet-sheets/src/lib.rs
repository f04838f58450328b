//! HTTP client for the spreadsheet sink.
//!
//! Worksheet-level operations (list, create, clear, write) plus the
//! destination resolver [`client::SheetsClient::upsert_table`], which
//! decides per destination whether to create, replace, or skip. Every write
//! is a full replace — clear then write — so a destination always holds the
//! complete current snapshot and successive runs never accumulate stale
//! rows.

pub mod client;
pub mod error;
pub mod types;

pub use client::{SheetsClient, UpsertOutcome};
pub use error::SheetsError;
pub use types::{SpreadsheetInfo, WorksheetProps};
