use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::report::ReportKind;
use crate::ConfigError;

/// One geographic region to collect for.
///
/// An empty `geo` code means worldwide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Display name; becomes the first segment of worksheet names.
    pub country: String,
    #[serde(default)]
    pub geo: String,
}

/// Which of the three report kinds a run collects. All enabled by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportToggles {
    #[serde(default = "default_true")]
    pub interest: bool,
    #[serde(default = "default_true")]
    pub topics: bool,
    #[serde(default = "default_true")]
    pub queries: bool,
}

impl Default for ReportToggles {
    fn default() -> Self {
        Self {
            interest: true,
            topics: true,
            queries: true,
        }
    }
}

impl ReportToggles {
    /// Enabled kinds in collection order: interest, topics, queries.
    #[must_use]
    pub fn enabled(&self) -> Vec<ReportKind> {
        let mut kinds = Vec::new();
        if self.interest {
            kinds.push(ReportKind::Interest);
        }
        if self.topics {
            kinds.push(ReportKind::Topics);
        }
        if self.queries {
            kinds.push(ReportKind::Queries);
        }
        kinds
    }
}

fn default_true() -> bool {
    true
}

fn default_pair_delay() -> u64 {
    30
}

fn default_report_delay() -> u64 {
    2
}

/// A collection run profile: what to collect and how fast.
///
/// Keyword and region order is significant — it fixes the iteration order of
/// the run and therefore the pacing schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct Watchlist {
    pub keywords: Vec<String>,
    pub regions: Vec<Region>,
    pub timeframe: String,
    #[serde(default)]
    pub reports: ReportToggles,
    /// Wait between (region, keyword) pairs, to stay under the source's
    /// rate limit.
    #[serde(default = "default_pair_delay")]
    pub pair_delay_secs: u64,
    /// Shorter wait between report kinds within one pair.
    #[serde(default = "default_report_delay")]
    pub report_delay_secs: u64,
}

/// Load and validate a watchlist profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_watchlist(path: &Path) -> Result<Watchlist, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchlistIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let watchlist: Watchlist = serde_yaml::from_str(&content)?;
    validate_watchlist(&watchlist)?;

    Ok(watchlist)
}

fn validate_watchlist(watchlist: &Watchlist) -> Result<(), ConfigError> {
    if watchlist.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist must declare at least one keyword".to_string(),
        ));
    }
    if watchlist.regions.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist must declare at least one region".to_string(),
        ));
    }
    if watchlist.timeframe.trim().is_empty() {
        return Err(ConfigError::Validation(
            "timeframe must be non-empty".to_string(),
        ));
    }

    for keyword in &watchlist.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "keywords must be non-empty".to_string(),
            ));
        }
    }

    // Country names key worksheet names, so duplicates would silently
    // overwrite each other's tabs.
    let mut seen_countries = HashSet::new();
    for region in &watchlist.regions {
        if region.country.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region country name must be non-empty".to_string(),
            ));
        }
        if !seen_countries.insert(region.country.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region country name: '{}'",
                region.country
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(country: &str, geo: &str) -> Region {
        Region {
            country: country.to_string(),
            geo: geo.to_string(),
        }
    }

    fn valid_watchlist() -> Watchlist {
        Watchlist {
            keywords: vec!["skincare".to_string()],
            regions: vec![region("Slovensko", "SK")],
            timeframe: "today 3-m".to_string(),
            reports: ReportToggles::default(),
            pair_delay_secs: 30,
            report_delay_secs: 2,
        }
    }

    #[test]
    fn validate_accepts_valid_watchlist() {
        assert!(validate_watchlist(&valid_watchlist()).is_ok());
    }

    #[test]
    fn validate_accepts_empty_geo_code() {
        let mut w = valid_watchlist();
        w.regions = vec![region("Worldwide", "")];
        assert!(validate_watchlist(&w).is_ok());
    }

    #[test]
    fn validate_rejects_empty_keywords() {
        let mut w = valid_watchlist();
        w.keywords.clear();
        let err = validate_watchlist(&w).unwrap_err();
        assert!(err.to_string().contains("at least one keyword"));
    }

    #[test]
    fn validate_rejects_blank_keyword() {
        let mut w = valid_watchlist();
        w.keywords = vec!["  ".to_string()];
        let err = validate_watchlist(&w).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_empty_regions() {
        let mut w = valid_watchlist();
        w.regions.clear();
        let err = validate_watchlist(&w).unwrap_err();
        assert!(err.to_string().contains("at least one region"));
    }

    #[test]
    fn validate_rejects_duplicate_country() {
        let mut w = valid_watchlist();
        w.regions = vec![region("Slovensko", "SK"), region("Slovensko", "CZ")];
        let err = validate_watchlist(&w).unwrap_err();
        assert!(err.to_string().contains("duplicate region country name"));
    }

    #[test]
    fn validate_rejects_blank_timeframe() {
        let mut w = valid_watchlist();
        w.timeframe = " ".to_string();
        let err = validate_watchlist(&w).unwrap_err();
        assert!(err.to_string().contains("timeframe"));
    }

    #[test]
    fn toggles_default_to_all_enabled() {
        let toggles = ReportToggles::default();
        assert_eq!(
            toggles.enabled(),
            vec![ReportKind::Interest, ReportKind::Topics, ReportKind::Queries]
        );
    }

    #[test]
    fn toggles_respect_disabled_kinds() {
        let toggles = ReportToggles {
            interest: true,
            topics: false,
            queries: true,
        };
        assert_eq!(
            toggles.enabled(),
            vec![ReportKind::Interest, ReportKind::Queries]
        );
    }

    #[test]
    fn watchlist_yaml_defaults_apply() {
        let yaml = r#"
keywords: ["seo"]
regions:
  - { country: "Slovensko", geo: "SK" }
timeframe: "today 3-m"
"#;
        let w: Watchlist = serde_yaml::from_str(yaml).unwrap();
        assert!(w.reports.interest && w.reports.topics && w.reports.queries);
        assert_eq!(w.pair_delay_secs, 30);
        assert_eq!(w.report_delay_secs, 2);
        assert_eq!(w.regions[0].geo, "SK");
    }

    #[test]
    fn load_watchlist_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("watchlist.yaml");
        assert!(
            path.exists(),
            "watchlist.yaml missing at {path:?} — required for this test"
        );
        let result = load_watchlist(&path);
        assert!(result.is_ok(), "failed to load watchlist.yaml: {result:?}");
        let watchlist = result.unwrap();
        assert!(!watchlist.keywords.is_empty());
        assert!(!watchlist.regions.is_empty());
    }
}
