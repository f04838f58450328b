use thiserror::Error;

/// Errors returned by the trends source client.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The explore response did not include the widget needed for this
    /// report kind, so there is no token to redeem.
    #[error("explore response is missing the {widget} widget")]
    MissingWidget { widget: &'static str },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
