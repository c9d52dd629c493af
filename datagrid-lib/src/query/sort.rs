//! Sort state and row ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::ColumnDescriptor;
use crate::model::{CellValue, GridRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// Which column the rows are sorted by, if any.
///
/// `column == None` keeps rows in the order the host supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Direction,
}

impl SortState {
    /// Unsorted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: Direction::Asc,
        }
    }

    /// Descending on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            direction: Direction::Desc,
        }
    }

    /// Whether a sort column is set.
    pub fn is_active(&self) -> bool {
        self.column.is_some()
    }

    /// Header click behavior.
    ///
    /// The current column flips direction; any other column starts ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column.to_string());
            self.direction = Direction::Asc;
        }
    }

    /// Back to insertion order.
    pub fn clear(&mut self) {
        self.column = None;
        self.direction = Direction::Asc;
    }
}

/// Order rows in place according to `sort`.
///
/// Does nothing unless the sort column is among `columns` and sortable. A
/// column comparator replaces the default one and is reversed for
/// descending order. The default comparator puts null values last in both
/// directions. Sorting is stable, so ties keep insertion order.
pub fn sort_rows<R: GridRow>(rows: &mut Vec<&R>, columns: &[&ColumnDescriptor<R>], sort: &SortState) {
    let Some(key) = sort.column.as_deref() else {
        return;
    };
    let Some(column) = columns.iter().find(|c| c.key == key && c.sortable) else {
        return;
    };
    let direction = sort.direction;

    if let Some(sort_fn) = column.sort_fn() {
        rows.sort_by(|a, b| direction.apply(sort_fn(*a, *b)));
        return;
    }

    let mut keyed: Vec<(CellValue, &R)> = rows.iter().map(|r| (column.value(r), *r)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_nulls_last(a, b, direction));
    *rows = keyed.into_iter().map(|(_, r)| r).collect();
}

fn compare_nulls_last(a: &CellValue, b: &CellValue, direction: Direction) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.compare(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut sort = SortState::none();
        sort.toggle("name");
        assert_eq!(sort, SortState::asc("name"));
        sort.toggle("name");
        assert_eq!(sort, SortState::desc("name"));
        sort.toggle("email");
        assert_eq!(sort, SortState::asc("email"));
        sort.clear();
        assert!(!sort.is_active());
    }

    #[test]
    fn test_nulls_last_both_directions() {
        let one = CellValue::from(1);
        let null = CellValue::Null;
        assert_eq!(compare_nulls_last(&null, &one, Direction::Asc), Ordering::Greater);
        assert_eq!(compare_nulls_last(&null, &one, Direction::Desc), Ordering::Greater);
        assert_eq!(compare_nulls_last(&one, &null, Direction::Desc), Ordering::Less);
    }
}
