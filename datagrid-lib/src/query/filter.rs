//! Case-insensitive search over searchable columns.

use crate::column::ColumnDescriptor;
use crate::model::GridRow;

/// Normalize a raw search term. Blank terms match everything.
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Whether any searchable column of `row` contains `needle`.
///
/// `needle` must already be lowercased.
pub fn row_matches<R: GridRow>(row: &R, columns: &[&ColumnDescriptor<R>], needle: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.searchable)
        .any(|c| c.value(row).display().to_lowercase().contains(needle))
}

/// Rows matching `term`, in their original order.
pub fn filter_rows<'a, R: GridRow>(
    rows: &'a [R],
    columns: &[&ColumnDescriptor<R>],
    term: &str,
) -> Vec<&'a R> {
    match normalize_term(term) {
        Some(needle) => rows
            .iter()
            .filter(|row| row_matches(*row, columns, &needle))
            .collect(),
        None => rows.iter().collect(),
    }
}
