//! Row selection.
//!
//! Selection is tracked by row id so it survives re-filtering and re-sorting.
//! Every derived answer (select-all, indeterminate, resolved rows) is
//! computed against the rows currently visible; ids of rows that a filter
//! hid stay in the set until the next explicit selection change.

use std::collections::HashSet;
use std::hash::Hash;

use crate::model::GridRow;

/// Id-based selection state.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected ids, stale ones included.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate selected ids in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Clear all selection.
    /// Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Add or remove one id.
    /// Returns true if the selection changed.
    pub fn select_one(&mut self, id: K, checked: bool) -> bool {
        if checked {
            self.selected.insert(id)
        } else {
            self.selected.remove(&id)
        }
    }

    /// Replace the selection with exactly the visible rows.
    pub fn select_all<R>(&mut self, visible: &[&R])
    where
        R: GridRow<Id = K>,
    {
        self.selected = visible.iter().map(|r| r.id()).collect();
    }

    /// Header checkbox behavior: clear when everything visible is already
    /// selected, otherwise select all visible rows.
    pub fn toggle_all<R>(&mut self, visible: &[&R])
    where
        R: GridRow<Id = K>,
    {
        if self.is_all_selected(visible) {
            self.clear();
        } else {
            self.select_all(visible);
        }
    }

    /// Number of visible rows that are selected.
    pub fn visible_count<R>(&self, visible: &[&R]) -> usize
    where
        R: GridRow<Id = K>,
    {
        visible
            .iter()
            .filter(|r| self.selected.contains(&r.id()))
            .count()
    }

    /// True when at least one row is visible and all of them are selected.
    pub fn is_all_selected<R>(&self, visible: &[&R]) -> bool
    where
        R: GridRow<Id = K>,
    {
        !visible.is_empty() && self.visible_count(visible) == visible.len()
    }

    /// True when some, but not all, visible rows are selected.
    pub fn is_indeterminate<R>(&self, visible: &[&R]) -> bool
    where
        R: GridRow<Id = K>,
    {
        let count = self.visible_count(visible);
        count > 0 && count < visible.len()
    }

    /// The selected rows among `visible`, in visible order.
    pub fn resolve<'a, R>(&self, visible: &[&'a R]) -> Vec<&'a R>
    where
        R: GridRow<Id = K>,
    {
        visible
            .iter()
            .filter(|r| self.selected.contains(&r.id()))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[derive(Clone, Debug)]
    struct Task(&'static str);

    impl GridRow for Task {
        type Id = String;

        fn id(&self) -> String {
            self.0.to_string()
        }

        fn value(&self, _column: &str) -> CellValue {
            CellValue::Null
        }
    }

    fn tasks() -> Vec<Task> {
        vec![Task("a"), Task("b"), Task("c")]
    }

    #[test]
    fn test_select_all_then_deselect_one() {
        let rows = tasks();
        let visible: Vec<&Task> = rows.iter().collect();
        let mut sel = Selection::new();

        sel.select_all(&visible);
        assert!(sel.is_all_selected(&visible));
        assert!(!sel.is_indeterminate(&visible));

        assert!(sel.select_one("b".to_string(), false));
        assert!(!sel.is_all_selected(&visible));
        assert!(sel.is_indeterminate(&visible));
    }

    #[test]
    fn test_empty_visible_is_never_all_selected() {
        let sel: Selection<String> = Selection::new();
        let visible: Vec<&Task> = Vec::new();
        assert!(!sel.is_all_selected(&visible));
        assert!(!sel.is_indeterminate(&visible));
    }

    #[test]
    fn test_select_all_only_takes_visible() {
        let rows = tasks();
        let visible = vec![&rows[0], &rows[2]];
        let mut sel = Selection::new();
        sel.select_one("b".to_string(), true);

        sel.select_all(&visible);
        assert_eq!(sel.len(), 2);
        assert!(!sel.is_selected(&"b".to_string()));
    }

    #[test]
    fn test_stale_ids_ignored_by_derived_state() {
        let rows = tasks();
        let all: Vec<&Task> = rows.iter().collect();
        let mut sel = Selection::new();
        sel.select_all(&all);

        // Filter now hides "c".
        let visible = vec![&rows[0], &rows[1]];
        assert!(sel.is_all_selected(&visible));
        assert_eq!(sel.len(), 3);
        assert_eq!(
            sel.resolve(&visible).iter().map(|t| t.0).collect::<Vec<_>>(),
            vec!["a", "b"]
        );    }

    #[test]
    fn test_toggle_all() {
        let rows = tasks();
        let visible: Vec<&Task> = rows.iter().collect();
        let mut sel = Selection::new();

        sel.toggle_all(&visible);
        assert!(sel.is_all_selected(&visible));
        sel.toggle_all(&visible);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_one_reports_change() {
        let mut sel: Selection<String> = Selection::new();
        assert!(sel.select_one("a".into(), true));
        assert!(!sel.select_one("a".into(), true));
        assert!(sel.select_one("a".into(), false));
        assert!(!sel.clear());
    }
}
