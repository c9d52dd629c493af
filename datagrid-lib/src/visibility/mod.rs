//! Column visibility.
//!
//! The functions in this module are pure: they take a registry and a map and
//! return a new map. Every one of them guarantees that a locked column comes
//! out visible, whatever the input said.
//!
//! [`VisibilityStore`] adds persistence on top.

mod persisted;
mod store;

pub use persisted::{PersistedVisibility, VISIBILITY_SCHEMA_VERSION};
pub use store::VisibilityStore;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::column::ColumnRegistry;
use crate::model::GridRow;

/// Per-column visibility, keyed by column key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<String, bool>);

impl VisibilityMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stored flag for a column.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Whether a column is shown. Columns without an entry count as visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.get(key).unwrap_or(true)
    }

    /// Set the flag for a column.
    pub fn set(&mut self, key: impl Into<String>, visible: bool) {
        self.0.insert(key.into(), visible);
    }

    /// Iterate `(key, visible)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys of the visible columns, in key order.
    pub fn visible_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| *v).map(|(k, _)| k)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for VisibilityMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Resolve the effective map for a registry.
///
/// Keeps the caller's flags for known columns, shows columns the caller did
/// not mention, drops unknown keys and forces locked columns on.
pub fn compute_visibility<R: GridRow>(
    registry: &ColumnRegistry<R>,
    current: &VisibilityMap,
) -> VisibilityMap {
    reconcile(registry, current, None)
}

/// Flip one column.
///
/// Returns the input unchanged when the column is locked or unknown. Callers
/// compare the result with the input to decide whether anything changed.
pub fn toggle<R: GridRow>(
    registry: &ColumnRegistry<R>,
    map: &VisibilityMap,
    key: &str,
) -> VisibilityMap {
    let Some(column) = registry.get(key) else {
        return map.clone();
    };
    if column.locked {
        return map.clone();
    }
    let mut next = compute_visibility(registry, map);
    let visible = next.is_visible(key);
    next.set(key, !visible);
    next
}

/// Hide every column that is not locked.
pub fn hide_all<R: GridRow>(registry: &ColumnRegistry<R>) -> VisibilityMap {
    registry.iter().map(|c| (c.key.as_str(), c.locked)).collect()
}

/// Show every column.
pub fn show_all<R: GridRow>(registry: &ColumnRegistry<R>) -> VisibilityMap {
    registry.iter().map(|c| (c.key.as_str(), true)).collect()
}

/// Bring a map in line with the current registry.
///
/// New columns get their default: visible, or membership in
/// `default_visible` when given. Entries for removed columns are dropped.
/// Locked columns are forced visible.
pub fn reconcile<R: GridRow>(
    registry: &ColumnRegistry<R>,
    map: &VisibilityMap,
    default_visible: Option<&BTreeSet<String>>,
) -> VisibilityMap {
    registry
        .iter()
        .map(|c| {
            let visible = c.locked
                || map
                    .get(&c.key)
                    .unwrap_or_else(|| default_for(&c.key, default_visible));
            (c.key.as_str(), visible)
        })
        .collect()
}

/// The map a fresh view starts with.
///
/// All columns visible, or only `default_visible` plus the locked columns.
pub fn reset_to_default<R: GridRow>(
    registry: &ColumnRegistry<R>,
    default_visible: Option<&BTreeSet<String>>,
) -> VisibilityMap {
    reconcile(registry, &VisibilityMap::new(), default_visible)
}

fn default_for(key: &str, default_visible: Option<&BTreeSet<String>>) -> bool {
    default_visible.is_none_or(|set| set.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDescriptor;
    use crate::model::CellValue;

    #[derive(Clone)]
    struct Row;

    impl GridRow for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            0
        }

        fn value(&self, _column: &str) -> CellValue {
            CellValue::Null
        }
    }

    fn registry() -> ColumnRegistry<Row> {
        ColumnRegistry::new(vec![
            ColumnDescriptor::new("name", "Name").locked(),
            ColumnDescriptor::new("email", "Email"),
            ColumnDescriptor::new("phone", "Phone"),
        ])
        .unwrap()
    }

    fn defaults(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_compute_forces_locked() {
        let input: VisibilityMap = [("name", false), ("email", false)].into_iter().collect();
        let map = compute_visibility(&registry(), &input);
        assert_eq!(map.get("name"), Some(true));
        assert_eq!(map.get("email"), Some(false));
        assert_eq!(map.get("phone"), Some(true));
    }

    #[test]
    fn test_toggle_locked_is_noop() {
        let map = show_all(&registry());
        assert_eq!(toggle(&registry(), &map, "name"), map);
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let map = show_all(&registry());
        assert_eq!(toggle(&registry(), &map, "fax"), map);
    }

    #[test]
    fn test_toggle_flips() {
        let map = show_all(&registry());
        let hidden = toggle(&registry(), &map, "email");
        assert_eq!(hidden.get("email"), Some(false));
        let shown = toggle(&registry(), &hidden, "email");
        assert_eq!(shown.get("email"), Some(true));
    }

    #[test]
    fn test_hide_all_keeps_locked() {
        let map = hide_all(&registry());
        assert_eq!(map.visible_keys().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_reconcile_prunes_and_defaults() {
        let stale: VisibilityMap = [("email", false), ("fax", true)].into_iter().collect();
        let map = reconcile(&registry(), &stale, Some(&defaults(&["name", "email"])));
        assert_eq!(map.get("fax"), None);
        assert_eq!(map.get("email"), Some(false));
        assert_eq!(map.get("phone"), Some(false));
        assert_eq!(map.get("name"), Some(true));
    }

    #[test]
    fn test_reset_to_default_subset() {
        let map = reset_to_default(&registry(), Some(&defaults(&["phone"])));
        assert_eq!(map.get("name"), Some(true));
        assert_eq!(map.get("email"), Some(false));
        assert_eq!(map.get("phone"), Some(true));
    }

    #[test]
    fn test_reset_to_default_all() {
        assert_eq!(reset_to_default(&registry(), None), show_all(&registry()));
    }
}
