//! Order-preserving concatenation of normalized tables.

use trendsheet_core::{Table, TableError};

/// Concatenates tables targeting the same destination, first-seen-first.
///
/// Rows are never deduplicated — duplicate provenance tuples are legal and
/// expected when upstream is re-queried. Empty inputs are dropped; an empty
/// input list yields an explicitly empty table, which the destination
/// resolver treats as "skip write".
///
/// # Errors
///
/// Returns [`TableError::ColumnMismatch`] if two non-empty inputs disagree
/// on their header. Tables built by the normalizer always agree, so hitting
/// this indicates a caller bug.
pub fn aggregate(tables: Vec<Table>) -> Result<Table, TableError> {
    let mut out = Table::empty();
    for table in tables {
        out.append(table)?;
    }
    Ok(out)
}
