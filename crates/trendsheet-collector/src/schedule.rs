//! Pair enumeration for a collection run.
//!
//! The schedule is computed up front so each step already knows whether a
//! pacing wait follows it — no index-against-endpoint comparisons in the
//! driver loop.

use std::time::Duration;

use trendsheet_core::Region;

/// One (region, keyword) step of a run.
#[derive(Debug)]
pub struct PairStep<'a> {
    pub region: &'a Region,
    pub keyword: &'a str,
    /// False only for the final step: no trailing wait after the last pair.
    pub wait_after: bool,
}

/// Enumerates the cross product in declared order: regions outer, keywords
/// inner. The order is a contract — it fixes run logs and the pacing
/// schedule.
#[must_use]
pub fn pair_schedule<'a>(regions: &'a [Region], keywords: &'a [String]) -> Vec<PairStep<'a>> {
    let mut steps = Vec::with_capacity(regions.len() * keywords.len());
    for region in regions {
        for keyword in keywords {
            steps.push(PairStep {
                region,
                keyword,
                wait_after: true,
            });
        }
    }
    if let Some(last) = steps.last_mut() {
        last.wait_after = false;
    }
    steps
}

/// Pause before fetching the report at `index` within one pair.
///
/// Waits sit strictly between consecutive kinds: none before the first and
/// none trailing after the last. A zero delay disables them entirely.
#[must_use]
pub fn report_pause(index: usize, delay_secs: u64) -> Option<Duration> {
    if index > 0 && delay_secs > 0 {
        Some(Duration::from_secs(delay_secs))
    } else {
        None
    }
}
