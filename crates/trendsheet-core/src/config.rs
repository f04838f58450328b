use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic is decoupled from the real environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let spreadsheet_id = require("TRENDSHEET_SPREADSHEET_ID")?;
    let sheets_token = require("TRENDSHEET_SHEETS_TOKEN")?;

    let env = parse_environment(&or_default("TRENDSHEET_ENV", "development"));
    let log_level = or_default("TRENDSHEET_LOG_LEVEL", "info");
    let watchlist_path = PathBuf::from(or_default(
        "TRENDSHEET_WATCHLIST_PATH",
        "./config/watchlist.yaml",
    ));
    let request_timeout_secs = parse_u64("TRENDSHEET_REQUEST_TIMEOUT_SECS", "30")?;
    let trends_hl = or_default("TRENDSHEET_TRENDS_HL", "en-US");
    let trends_tz = parse_i32("TRENDSHEET_TRENDS_TZ", "360")?;

    Ok(AppConfig {
        env,
        log_level,
        watchlist_path,
        spreadsheet_id,
        sheets_token,
        request_timeout_secs,
        trends_hl,
        trends_tz,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("TRENDSHEET_SPREADSHEET_ID", "sheet-abc123");
        m.insert("TRENDSHEET_SHEETS_TOKEN", "test-token");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_spreadsheet_id() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TRENDSHEET_SPREADSHEET_ID"),
            "expected MissingEnvVar(TRENDSHEET_SPREADSHEET_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_token() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("TRENDSHEET_SPREADSHEET_ID", "sheet-abc123");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TRENDSHEET_SHEETS_TOKEN"),
            "expected MissingEnvVar(TRENDSHEET_SHEETS_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.watchlist_path.to_string_lossy(),
            "./config/watchlist.yaml"
        );
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.trends_hl, "en-US");
        assert_eq!(cfg.trends_tz, 360);
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = full_env();
        map.insert("TRENDSHEET_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_timeout_invalid() {
        let mut map = full_env();
        map.insert("TRENDSHEET_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSHEET_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(TRENDSHEET_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_tz_accepts_negative_offsets() {
        let mut map = full_env();
        map.insert("TRENDSHEET_TRENDS_TZ", "-120");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.trends_tz, -120);
    }

    #[test]
    fn build_app_config_tz_invalid() {
        let mut map = full_env();
        map.insert("TRENDSHEET_TRENDS_TZ", "CET");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSHEET_TRENDS_TZ"),
            "expected InvalidEnvVar(TRENDSHEET_TRENDS_TZ), got: {result:?}"
        );
    }
}
