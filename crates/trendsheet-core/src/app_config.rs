use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level configuration, built once at startup from the environment
/// and passed by reference into everything that needs it.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Default watchlist profile; the CLI flag overrides this.
    pub watchlist_path: PathBuf,
    /// Identifier of the destination spreadsheet.
    pub spreadsheet_id: String,
    /// Opaque bearer credential for the sheet service.
    pub sheets_token: String,
    pub request_timeout_secs: u64,
    /// Host-language header sent to the trends source (e.g. `"en-US"`).
    pub trends_hl: String,
    /// Timezone offset in minutes sent to the trends source.
    pub trends_tz: i32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("watchlist_path", &self.watchlist_path)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheets_token", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("trends_hl", &self.trends_hl)
            .field("trends_tz", &self.trends_tz)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let cfg = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            watchlist_path: PathBuf::from("./config/watchlist.yaml"),
            spreadsheet_id: "sheet-123".to_string(),
            sheets_token: "super-secret".to_string(),
            request_timeout_secs: 30,
            trends_hl: "en-US".to_string(),
            trends_tz: 360,
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("super-secret"));
    }
}
