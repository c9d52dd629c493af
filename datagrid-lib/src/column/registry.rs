//! Validated, ordered column list.

use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigError;
use crate::model::GridRow;
use crate::visibility::VisibilityMap;

use super::ColumnDescriptor;

/// An ordered set of column descriptors with unique, non-empty keys.
pub struct ColumnRegistry<R: GridRow> {
    columns: Vec<ColumnDescriptor<R>>,
}

impl<R: GridRow> ColumnRegistry<R> {
    /// Validate and wrap a column list.
    ///
    /// Fails on the first empty or duplicated key.
    pub fn new(columns: Vec<ColumnDescriptor<R>>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.key.is_empty() {
                return Err(ConfigError::EmptyColumnKey);
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.key.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Get a column by key.
    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Check whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Check whether a key names a locked column.
    pub fn is_locked(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.locked)
    }

    /// Iterate columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor<R>> {
        self.columns.iter()
    }

    /// All column keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns the visibility map shows, in declaration order.
    ///
    /// Locked columns are always included.
    pub fn visible(&self, map: &VisibilityMap) -> Vec<&ColumnDescriptor<R>> {
        self.columns
            .iter()
            .filter(|c| c.locked || map.is_visible(&c.key))
            .collect()
    }
}

impl<R: GridRow> Clone for ColumnRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R: GridRow> fmt::Debug for ColumnRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = ColumnRegistry::<Row>::new(vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("name", "Full name"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateColumn("name".into()));
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = ColumnRegistry::<Row>::new(vec![ColumnDescriptor::new("", "Blank")]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyColumnKey);
    }

    #[test]
    fn test_lookup() {
        let registry = ColumnRegistry::<Row>::new(vec![
            ColumnDescriptor::new("name", "Name").locked(),
            ColumnDescriptor::new("email", "Email"),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_locked("name"));
        assert!(!registry.is_locked("email"));
        assert!(!registry.is_locked("missing"));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["name", "email"]);
    }
}
