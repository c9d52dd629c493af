//! Client-side filtering and sorting.
//!
//! [`process`] is a pure function of its inputs: it never touches the
//! network and works on whatever rows the host handed in for the current
//! view. Pagination, when there is any, happens before rows get here.

mod filter;
mod search;
mod sort;

pub use filter::{filter_rows, normalize_term, row_matches};
pub use search::SearchDebouncer;
pub use sort::{Direction, SortState, sort_rows};

use crate::column::ColumnDescriptor;
use crate::model::GridRow;

/// Filter rows by `search_term`, then order them by `sort`.
///
/// Only `columns` take part: a row matches when any searchable one
/// contains the term, and the sort column must be among them.
pub fn process<'a, R: GridRow>(
    rows: &'a [R],
    columns: &[&ColumnDescriptor<R>],
    search_term: &str,
    sort: &SortState,
) -> Vec<&'a R> {
    let mut out = filter_rows(rows, columns, search_term);
    sort_rows(&mut out, columns, sort);
    out
}
