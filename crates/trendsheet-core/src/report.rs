//! Report-kind vocabulary and the worksheet naming convention.

use serde::{Deserialize, Serialize};

/// The three report kinds collected per (region, keyword) pair.
///
/// The `Display` form doubles as the worksheet name suffix, so the spelling
/// here must stay bit-exact for compatibility with existing sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Interest,
    Topics,
    Queries,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Interest => write!(f, "Interest"),
            ReportKind::Topics => write!(f, "Topics"),
            ReportKind::Queries => write!(f, "Queries"),
        }
    }
}

/// The two buckets a related-topics/queries report is split into.
///
/// `as_str` values land in the `Type` column of every related row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedKind {
    Top,
    Rising,
}

impl RelatedKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RelatedKind::Top => "Top",
            RelatedKind::Rising => "Rising",
        }
    }
}

/// Builds the worksheet name for one (country, keyword, kind) triple:
/// `"{Country}_{Keyword}_{Kind}"`.
#[must_use]
pub fn destination_name(country: &str, keyword: &str, kind: ReportKind) -> String {
    format!("{country}_{keyword}_{kind}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_names_are_bit_exact() {
        assert_eq!(
            destination_name("Slovensko", "skincare", ReportKind::Interest),
            "Slovensko_skincare_Interest"
        );
        assert_eq!(
            destination_name("Slovensko", "skincare", ReportKind::Topics),
            "Slovensko_skincare_Topics"
        );
        assert_eq!(
            destination_name("Slovensko", "skincare", ReportKind::Queries),
            "Slovensko_skincare_Queries"
        );
    }

    #[test]
    fn destination_name_keeps_non_ascii_country_names() {
        assert_eq!(
            destination_name("Česko", "online marketing", ReportKind::Queries),
            "Česko_online marketing_Queries"
        );
    }

    #[test]
    fn related_kind_strings() {
        assert_eq!(RelatedKind::Top.as_str(), "Top");
        assert_eq!(RelatedKind::Rising.as_str(), "Rising");
    }
}
