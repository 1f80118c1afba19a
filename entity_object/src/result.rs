//! Execution results

use crate::attributes::AttributeStore;

/// One returned row: column name → value, in column order
pub type ResultRow = AttributeStore;

/// Row count and returned rows of one executed statement. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    row_count: u64,
    rows: Vec<ResultRow>,
}

impl ExecutionResult {
    pub fn new(row_count: u64, rows: Vec<ResultRow>) -> Self {
        Self { row_count, rows }
    }

    /// Result whose count is the number of rows returned
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self {
            row_count: rows.len() as u64,
            rows,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// The row, when the result holds exactly one. More than one row is
    /// ambiguous and yields `None`, same as zero.
    pub fn single_row(&self) -> Option<&ResultRow> {
        match (self.row_count, self.rows.as_slice()) {
            (1, [row]) => Some(row),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64) -> ResultRow {
        vec![("id", id)].into_iter().collect()
    }

    #[test]
    fn test_single_row_only_for_singletons() {
        assert!(ExecutionResult::empty().single_row().is_none());
        assert!(ExecutionResult::from_rows(vec![row(1)]).single_row().is_some());
        assert!(ExecutionResult::from_rows(vec![row(1), row(2)])
            .single_row()
            .is_none());
    }

    #[test]
    fn test_count_and_rows_must_agree_for_singleton() {
        // A write that affected one row but returned none is not loadable
        assert!(ExecutionResult::new(1, vec![]).single_row().is_none());
    }
}
