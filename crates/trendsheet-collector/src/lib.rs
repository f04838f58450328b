//! The collection pipeline: normalization of raw trends reports into
//! uniform tables, order-preserving aggregation, pair scheduling, and the
//! sequential collection driver with pacing and the run tally.

pub mod aggregate;
pub mod driver;
pub mod normalize;
pub mod schedule;

pub use aggregate::aggregate;
pub use driver::{run_collection, RunSummary};
pub use normalize::{interest_table, related_queries_table, related_topics_table};
pub use schedule::{pair_schedule, report_pause, PairStep};
