//! Shared domain types and configuration for the trendsheet collector.
//!
//! Holds the tabular data model ([`Table`]), the report-kind vocabulary and
//! the worksheet naming convention, application config loaded from the
//! environment, and the YAML watchlist that drives a collection run.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod report;
pub mod table;
pub mod watchlist;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use report::{destination_name, RelatedKind, ReportKind};
pub use table::{Table, TableError};
pub use watchlist::{load_watchlist, Region, ReportToggles, Watchlist};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watchlist file {path}: {source}")]
    WatchlistIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse watchlist file: {0}")]
    WatchlistParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
