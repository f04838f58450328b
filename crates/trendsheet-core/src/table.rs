//! Row-oriented table model shared by the normalizer, the aggregator, and
//! the spreadsheet sink.
//!
//! A [`Table`] is a header of named columns plus rows of JSON scalar cells —
//! the exact shape the sheet values API transports, so no conversion layer
//! sits between normalization and the write call.

use serde_json::Value;
use thiserror::Error;

/// Errors from table construction and concatenation.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("row width mismatch: table has {expected} columns, row has {got}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("column mismatch: expected {expected:?}, got {got:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },
}

/// A named-column table. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table with the given header and no rows.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table with no columns and no rows — the explicit "nothing
    /// to write" value the aggregator and resolver both understand.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// A table with no rows counts as empty even if it carries a header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Appends one row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::WidthMismatch`] if the row length does not
    /// match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::WidthMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends all rows of `other`, preserving their order.
    ///
    /// An empty `self` adopts `other`'s header first, so concatenation can
    /// start from [`Table::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ColumnMismatch`] if both tables carry rows but
    /// their headers differ.
    pub fn append(&mut self, other: Table) -> Result<(), TableError> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() && self.columns.is_empty() {
            *self = other;
            return Ok(());
        }
        if self.columns != other.columns {
            return Err(TableError::ColumnMismatch {
                expected: self.columns.clone(),
                got: other.columns,
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Renders the table as the sink expects it: header row of strings
    /// followed by the data rows.
    #[must_use]
    pub fn to_value_rows(&self) -> Vec<Vec<Value>> {
        let header: Vec<Value> = self
            .columns
            .iter()
            .map(|c| Value::String(c.clone()))
            .collect();
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(header);
        out.extend(self.rows.iter().cloned());
        out
    }
}
