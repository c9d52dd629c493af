//! Column descriptors and the column registry.
//!
//! Columns are declared by the host on every render. A descriptor carries
//! everything the engine needs to filter, sort and draw one column: key,
//! label, sizing hint, alignment, capability flags and the renderer.
//!
//! # Example
//!
//! ```ignore
//! let columns = ColumnRegistry::new(vec![
//!     ColumnDescriptor::new("name", "Name").sortable().locked(),
//!     ColumnDescriptor::new("email", "Email").sortable(),
//!     ColumnDescriptor::new("status", "Status")
//!         .align(Alignment::Center)
//!         .not_searchable()
//!         .renderer(|value: &CellValue, _row: &Lead| {
//!             Renderable::badge(value.display(), Variant::Primary)
//!         }),
//! ])?;
//! ```

mod registry;
mod render;

pub use registry::ColumnRegistry;
pub use render::{CellRenderer, Renderable, TextRenderer, Variant};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::model::{CellValue, GridRow};

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Column width hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width in pixels.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Sized to content by the host.
    Auto,
}

/// Column-specific comparator. Overrides the default value comparator.
pub type SortFn<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// A column declaration.
pub struct ColumnDescriptor<R: GridRow> {
    /// Unique key within the registry; also the key passed to [`GridRow::value`].
    pub key: String,
    /// Header text.
    pub label: String,
    /// Optional sizing hint.
    pub width: Option<ColumnWidth>,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Whether the search term is matched against this column.
    pub searchable: bool,
    /// Locked columns can never be hidden.
    pub locked: bool,
    renderer: Arc<dyn CellRenderer<R>>,
    sort_fn: Option<SortFn<R>>,
}

impl<R: GridRow> ColumnDescriptor<R> {
    /// Create a column with the given key and header label.
    ///
    /// New columns are searchable, not sortable, not locked, start-aligned
    /// and rendered as plain text.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            align: Alignment::Start,
            sortable: false,
            searchable: true,
            locked: false,
            renderer: Arc::new(TextRenderer),
            sort_fn: None,
        }
    }

    /// Set the width hint.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Exclude the column from search matching.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Lock the column so it is always visible.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Set the cell renderer.
    pub fn renderer(mut self, renderer: impl CellRenderer<R> + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Set a custom comparator. Implies [`sortable`](Self::sortable).
    pub fn sort_with(mut self, f: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort_fn = Some(Arc::new(f));
        self.sortable = true;
        self
    }

    /// The custom comparator, if any.
    pub fn sort_fn(&self) -> Option<&SortFn<R>> {
        self.sort_fn.as_ref()
    }

    /// Look up this column's value in a row.
    pub fn value(&self, row: &R) -> CellValue {
        row.value(&self.key)
    }

    /// Render this column's cell for a row.
    pub fn render(&self, row: &R) -> Renderable {
        self.renderer.render(&self.value(row), row)
    }
}

impl<R: GridRow> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            searchable: self.searchable,
            locked: self.locked,
            renderer: Arc::clone(&self.renderer),
            sort_fn: self.sort_fn.clone(),
        }
    }
}

impl<R: GridRow> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("locked", &self.locked)
            .field("custom_sort", &self.sort_fn.is_some())
            .finish()
    }
}
