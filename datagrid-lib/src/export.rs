//! Tabular export of grid rows.

use serde::Serialize;

use crate::column::ColumnDescriptor;
use crate::error::StorageError;
use crate::model::GridRow;

/// Display strings for a set of rows under a set of columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    /// Column labels, in column order.
    pub headers: Vec<String>,
    /// One entry per row, one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Build a table from `columns` and `rows`, in the order given.
    pub fn build<R: GridRow>(columns: &[&ColumnDescriptor<R>], rows: &[&R]) -> Self {
        let headers = columns.iter().map(|c| c.label.clone()).collect();
        let rows = rows
            .iter()
            .map(|row| columns.iter().map(|c| c.value(row).display()).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as `{"headers": [...], "rows": [[...], ...]}`.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(StorageError::Serialization)
    }
}
