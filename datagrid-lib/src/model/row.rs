//! Row trait implemented by host record types.

use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use super::CellValue;

/// A host record that can be shown in a grid.
///
/// The engine treats rows as opaque: it only extracts a key and looks up
/// column values by key. Everything else about the record stays with the
/// host.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{CellValue, GridRow};
///
/// #[derive(Clone)]
/// struct Lead {
///     id: u64,
///     name: String,
///     email: Option<String>,
/// }
///
/// impl GridRow for Lead {
///     type Id = u64;
///
///     fn id(&self) -> u64 {
///         self.id
///     }
///
///     fn value(&self, column: &str) -> CellValue {
///         match column {
///             "name" => self.name.as_str().into(),
///             "email" => self.email.clone().into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait GridRow: Clone + Send + Sync + 'static {
    /// Identifier type, usually a string or an integer.
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Returns the identifier of this row. Must be unique within a row set.
    fn id(&self) -> Self::Id;

    /// Returns the value of the given column for this row.
    fn value(&self, column: &str) -> CellValue;
}
