//! The composed grid engine.
//!
//! [`DataGrid`] owns the per-instance state of one list screen (visibility
//! map, selection, sort, search term, open menu, bulk lifecycle) and derives
//! everything else from the rows and columns the host hands in. Host
//! callbacks go through a [`GridListener`].

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::action::{ActionDescriptor, visible_actions};
use crate::bulk::{BulkHandler, BulkOperation, BulkOrchestrator, BulkOutcome, BulkResult, BulkState};
use crate::column::{ColumnDescriptor, ColumnRegistry, Renderable};
use crate::config::{GridConfig, SortOwnership};
use crate::error::{ConfigError, GridError};
use crate::export::ExportTable;
use crate::menu::{ClickTarget, MenuAnchor, MenuController, Rect};
use crate::model::GridRow;
use crate::notice::Notice;
use crate::query::{self, SearchDebouncer, SortState};
use crate::selection::Selection;
use crate::storage::{SqliteBackend, StatePaths, StorageBackend};
use crate::visibility::{self, VisibilityMap, VisibilityStore};

/// Host callbacks. Every method defaults to a no-op.
pub trait GridListener<R: GridRow>: Send + Sync {
    /// The selection changed. `rows` are the selected rows that are
    /// currently visible, in display order.
    fn on_selection_change(&self, _rows: &[&R]) {}

    /// The sort state changed.
    fn on_sort(&self, _sort: &SortState) {}

    /// The visibility map changed.
    fn on_visibility_change(&self, _map: &VisibilityMap) {}

    /// Something worth telling the user.
    fn on_notice(&self, _notice: &Notice) {}

    /// A bulk operation settled.
    fn on_bulk_complete(&self, _result: &BulkResult) {}
}

struct NoopListener;

impl<R: GridRow> GridListener<R> for NoopListener {}

enum StoreSource {
    Ready(VisibilityStore),
    DefaultDatabase { key: String, paths: StatePaths },
}

/// Builder for [`DataGrid`].
///
/// # Example
///
/// ```ignore
/// let grid = DataGrid::builder(columns)
///     .rows(leads)
///     .actions(vec![view, edit, delete])
///     .default_visible(["name", "email"])
///     .persist("leads-list", backend)
///     .listener(Arc::new(LeadsPage::new()))
///     .build()
///     .await?;
/// ```
pub struct DataGridBuilder<R: GridRow> {
    columns: Vec<ColumnDescriptor<R>>,
    rows: Vec<R>,
    actions: Vec<ActionDescriptor<R>>,
    search: String,
    sort: SortState,
    default_visible: Option<BTreeSet<String>>,
    store: StoreSource,
    listener: Arc<dyn GridListener<R>>,
    config: GridConfig,
}

impl<R: GridRow> DataGridBuilder<R> {
    fn new(columns: Vec<ColumnDescriptor<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            actions: Vec::new(),
            search: String::new(),
            sort: SortState::none(),
            default_visible: None,
            store: StoreSource::Ready(VisibilityStore::ephemeral()),
            listener: Arc::new(NoopListener),
            config: GridConfig::default(),
        }
    }

    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    pub fn actions(mut self, actions: Vec<ActionDescriptor<R>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// Columns shown on first use. Locked columns are always shown.
    pub fn default_visible<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_visible = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Persist visibility under `key` in `backend`.
    pub fn persist(mut self, key: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        self.store = StoreSource::Ready(VisibilityStore::new(key, backend));
        self
    }

    /// Persist visibility under `key` in the per-user SQLite database.
    pub fn persist_default(mut self, key: impl Into<String>, paths: StatePaths) -> Self {
        self.store = StoreSource::DefaultDatabase {
            key: key.into(),
            paths,
        };
        self
    }

    pub fn listener(mut self, listener: Arc<dyn GridListener<R>>) -> Self {
        self.listener = listener;
        self
    }

    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and load persisted visibility.
    pub async fn build(self) -> Result<DataGrid<R>, GridError> {
        let registry = ColumnRegistry::new(self.columns)?;
        validate_row_ids(&self.rows)?;
        if let Some(column) = &self.sort.column {
            if !registry.contains(column) {
                return Err(ConfigError::UnknownColumn(column.clone()).into());
            }
        }
        if let Some(unknown) = self
            .default_visible
            .iter()
            .flatten()
            .find(|key| !registry.contains(key))
        {
            return Err(ConfigError::UnknownColumn(unknown.clone()).into());
        }

        let store = match self.store {
            StoreSource::Ready(store) => store,
            StoreSource::DefaultDatabase { key, paths } => {
                let backend = SqliteBackend::open_default(&paths).await?;
                VisibilityStore::new(key, Arc::new(backend))
            }
        };

        let default_visible = self.default_visible.as_ref();
        let visibility = match store.load(&registry, default_visible).await {
            Some(map) => map,
            None => visibility::reset_to_default(&registry, default_visible),
        };
        log::debug!(
            "grid built: {} columns, {} rows, store {:?}",
            registry.len(),
            self.rows.len(),
            store.key()
        );

        Ok(DataGrid {
            registry,
            rows: self.rows,
            actions: self.actions,
            visibility,
            default_visible: self.default_visible,
            store,
            selection: Selection::new(),
            search: self.search,
            sort: self.sort,
            menu: MenuController::new(self.config.menu_height, self.config.menu_gap),
            bulk: BulkOrchestrator::new(),
            debouncer: SearchDebouncer::new(self.config.search_debounce),
            listener: self.listener,
            config: self.config,
        })
    }
}

/// One list screen's grid.
pub struct DataGrid<R: GridRow> {
    registry: ColumnRegistry<R>,
    rows: Vec<R>,
    actions: Vec<ActionDescriptor<R>>,
    visibility: VisibilityMap,
    default_visible: Option<BTreeSet<String>>,
    store: VisibilityStore,
    selection: Selection<R::Id>,
    search: String,
    sort: SortState,
    menu: MenuController<R::Id>,
    bulk: BulkOrchestrator,
    debouncer: SearchDebouncer,
    listener: Arc<dyn GridListener<R>>,
    config: GridConfig,
}

impl<R: GridRow> DataGrid<R> {
    pub fn builder(columns: Vec<ColumnDescriptor<R>>) -> DataGridBuilder<R> {
        DataGridBuilder::new(columns)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // Rows and columns

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replace the rows, e.g. after a refetch. Selection is kept.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), ConfigError> {
        validate_row_ids(&rows)?;
        self.rows = rows;
        Ok(())
    }

    pub fn columns(&self) -> &ColumnRegistry<R> {
        &self.registry
    }

    /// Replace the column set and bring the visibility map in line with it.
    pub async fn set_columns(&mut self, columns: Vec<ColumnDescriptor<R>>) -> Result<(), ConfigError> {
        self.registry = ColumnRegistry::new(columns)?;
        if self
            .sort
            .column
            .as_deref()
            .is_some_and(|c| !self.registry.contains(c))
        {
            self.sort.clear();
            self.listener.on_sort(&self.sort);
        }
        let next = visibility::reconcile(&self.registry, &self.visibility, self.default_visible.as_ref());
        self.apply_visibility(next).await;
        Ok(())
    }

    pub fn set_actions(&mut self, actions: Vec<ActionDescriptor<R>>) {
        self.actions = actions;
    }

    /// Visible columns, in registry order.
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor<R>> {
        self.registry.visible(&self.visibility)
    }

    /// Rows passing the search, in display order.
    pub fn visible_rows(&self) -> Vec<&R> {
        compute_visible_rows(
            &self.rows,
            &self.registry,
            &self.visibility,
            &self.search,
            &self.sort,
            self.config.sort_ownership,
        )
    }

    /// Render one cell with its column's renderer.
    pub fn render_cell(&self, row: &R, column: &str) -> Option<Renderable> {
        self.registry.get(column).map(|c| c.render(row))
    }

    // Search and sort

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the search term. Returns false when it did not change.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search {
            return false;
        }
        log::debug!("search term set to {:?}", term);
        self.search = term;
        true
    }

    /// A debouncer using the configured delay, for the host's search box.
    pub fn search_debouncer(&self) -> SearchDebouncer {
        self.debouncer.clone()
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Header click on `column`. Ignored for unknown or unsortable columns.
    pub fn sort_by(&mut self, column: &str) -> bool {
        if !self.registry.get(column).is_some_and(|c| c.sortable) {
            return false;
        }
        self.sort.toggle(column);
        self.listener.on_sort(&self.sort);
        true
    }

    /// Set the sort state directly, e.g. from a host-owned sort control.
    pub fn set_sort(&mut self, sort: SortState) {
        if sort != self.sort {
            self.sort = sort;
            self.listener.on_sort(&self.sort);
        }
    }

    /// Back to insertion order.
    pub fn reset_sort(&mut self) {
        self.set_sort(SortState::none());
    }

    // Column visibility

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// Flip one column. Locked and unknown columns are left alone.
    pub async fn toggle_column(&mut self, key: &str) -> bool {
        let next = visibility::toggle(&self.registry, &self.visibility, key);
        self.apply_visibility(next).await
    }

    /// Hide every column except the locked ones.
    pub async fn hide_all_columns(&mut self) -> bool {
        let next = visibility::hide_all(&self.registry);
        self.apply_visibility(next).await
    }

    pub async fn show_all_columns(&mut self) -> bool {
        let next = visibility::show_all(&self.registry);
        self.apply_visibility(next).await
    }

    /// Back to the default column set.
    pub async fn reset_columns(&mut self) -> bool {
        let next = visibility::reset_to_default(&self.registry, self.default_visible.as_ref());
        self.apply_visibility(next).await
    }

    async fn apply_visibility(&mut self, next: VisibilityMap) -> bool {
        if next == self.visibility {
            return false;
        }
        self.visibility = next;
        self.listener.on_visibility_change(&self.visibility);
        self.store.save(&self.visibility).await;
        true
    }

    // Selection

    pub fn selection(&self) -> &Selection<R::Id> {
        &self.selection
    }

    /// Selected rows that are currently visible.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.selection.resolve(&self.visible_rows())
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.visible_rows())
    }

    pub fn is_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(&self.visible_rows())
    }

    /// Row checkbox.
    pub fn select_one(&mut self, id: R::Id, checked: bool) {
        if self.selection.select_one(id, checked) {
            self.emit_selection();
        }
    }

    /// Select exactly the visible rows.
    pub fn select_all(&mut self) {
        let mut selection = std::mem::take(&mut self.selection);
        selection.select_all(&self.visible_rows());
        self.selection = selection;
        self.emit_selection();
    }

    /// Header checkbox.
    pub fn toggle_all(&mut self) {
        let mut selection = std::mem::take(&mut self.selection);
        selection.toggle_all(&self.visible_rows());
        self.selection = selection;
        self.emit_selection();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.emit_selection();
        }
    }

    fn emit_selection(&self) {
        self.listener.on_selection_change(&self.selected_rows());
    }

    // Action menu

    /// Trigger click on `row`'s menu button.
    pub fn open_menu(&mut self, row: R::Id, trigger: &Rect, viewport_height: f64) -> Option<MenuAnchor> {
        self.menu.toggle(row, trigger, viewport_height)
    }

    /// Document-level click. Returns true if a menu was closed.
    pub fn handle_click(&mut self, target: &ClickTarget<R::Id>) -> bool {
        self.menu.handle_click(target)
    }

    pub fn menu(&self) -> &MenuController<R::Id> {
        &self.menu
    }

    /// Actions to list in `row`'s menu.
    pub fn actions_for(&self, row: &R) -> Vec<&ActionDescriptor<R>> {
        visible_actions(&self.actions, row)
    }

    /// Close the menu and run `action_id` on the row with `row_id`.
    /// Returns true if the action ran.
    pub async fn invoke_action(&mut self, row_id: &R::Id, action_id: &str) -> bool {
        self.menu.close();
        let Some(row) = self.rows.iter().find(|r| &r.id() == row_id) else {
            log::debug!("action {} requested for missing row {}", action_id, row_id);
            return false;
        };
        let Some(action) = self.actions.iter().find(|a| a.id == action_id) else {
            log::debug!("unknown action {}", action_id);
            return false;
        };
        action.invoke(row).await
    }

    // Bulk operations

    pub fn bulk_state(&self) -> &BulkState {
        self.bulk.state()
    }

    /// Run `operation` over the selected visible rows.
    pub async fn run_bulk<H>(&mut self, operation: BulkOperation, handler: &H) -> BulkOutcome
    where
        H: BulkHandler<R> + ?Sized,
    {
        let token = CancellationToken::new();
        self.run_bulk_with_cancel(operation, handler, &token).await
    }

    /// Like [`run_bulk`](Self::run_bulk), stopping early once `cancel` fires.
    pub async fn run_bulk_with_cancel<H>(
        &mut self,
        operation: BulkOperation,
        handler: &H,
        cancel: &CancellationToken,
    ) -> BulkOutcome
    where
        H: BulkHandler<R> + ?Sized,
    {
        let policy = self.config.policy_for(&operation);
        let visible = compute_visible_rows(
            &self.rows,
            &self.registry,
            &self.visibility,
            &self.search,
            &self.sort,
            self.config.sort_ownership,
        );
        let targets = self.selection.resolve(&visible);
        let had_selection = !self.selection.is_empty();

        let outcome = self
            .bulk
            .run_with_cancel(operation, &targets, policy, &mut self.selection, handler, cancel)
            .await;

        if let BulkOutcome::Settled(result) = &outcome {
            if had_selection {
                self.listener.on_selection_change(&[]);
            }
            self.listener.on_bulk_complete(result);
        }
        self.listener.on_notice(&outcome.notice());
        outcome
    }

    // Export

    /// Visible columns over visible rows.
    pub fn export_visible(&self) -> ExportTable {
        ExportTable::build(&self.visible_columns(), &self.visible_rows())
    }

    /// Visible columns over the selected visible rows.
    pub fn export_selected(&self) -> ExportTable {
        ExportTable::build(&self.visible_columns(), &self.selected_rows())
    }
}

fn compute_visible_rows<'a, R: GridRow>(
    rows: &'a [R],
    registry: &ColumnRegistry<R>,
    visibility: &VisibilityMap,
    search: &str,
    sort: &SortState,
    ownership: SortOwnership,
) -> Vec<&'a R> {
    let columns = registry.visible(visibility);
    match ownership {
        SortOwnership::Engine => query::process(rows, &columns, search, sort),
        SortOwnership::Host => query::filter_rows(rows, &columns, search),
    }
}

fn validate_row_ids<R: GridRow>(rows: &[R]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let id = row.id();
        if !seen.insert(id.clone()) {
            return Err(ConfigError::DuplicateRowId(id.to_string()));
        }
    }
    Ok(())
}
