//! Grid configuration

use std::collections::HashMap;
use std::time::Duration;

use crate::bulk::{BulkOperation, BulkPolicy};

/// Who orders the rows when the user clicks a sortable header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOwnership {
    /// The engine sorts visible rows itself.
    #[default]
    Engine,
    /// The engine records the sort state and reports it through
    /// `on_sort`; the host supplies rows already in order.
    Host,
}

/// Tunables for one grid instance.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::bulk::{BulkOperation, BulkPolicy};
/// use datagrid_lib::config::GridConfig;
///
/// let config = GridConfig::default()
///     .with_search_debounce(Duration::from_millis(150))
///     .with_operation_policy(BulkOperation::Delete, BulkPolicy::stop_on_first_error());
///
/// assert_eq!(
///     config.policy_for(&BulkOperation::Delete),
///     BulkPolicy::stop_on_first_error()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Estimated action-menu height used to decide whether it opens upward.
    ///
    /// Default: 160 px
    pub menu_height: f64,

    /// Gap between the trigger and a downward menu.
    ///
    /// Default: 4 px
    pub menu_gap: f64,

    /// Delay before a typed search term is applied.
    ///
    /// Default: 300 ms
    pub search_debounce: Duration,

    /// Default: [`SortOwnership::Engine`]
    pub sort_ownership: SortOwnership,

    /// Policy for operations without an override.
    pub bulk_policy: BulkPolicy,

    /// Per-operation overrides, keyed by [`BulkOperation::key`].
    pub operation_policies: HashMap<String, BulkPolicy>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            menu_height: 160.0,
            menu_gap: 4.0,
            search_debounce: Duration::from_millis(300),
            sort_ownership: SortOwnership::Engine,
            bulk_policy: BulkPolicy::default(),
            operation_policies: HashMap::new(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu_height(mut self, height: f64) -> Self {
        self.menu_height = height;
        self
    }

    pub fn with_menu_gap(mut self, gap: f64) -> Self {
        self.menu_gap = gap;
        self
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    pub fn with_sort_ownership(mut self, ownership: SortOwnership) -> Self {
        self.sort_ownership = ownership;
        self
    }

    /// Sets the policy used by every operation without an override.
    pub fn with_bulk_policy(mut self, policy: BulkPolicy) -> Self {
        self.bulk_policy = policy;
        self
    }

    /// Overrides the policy for one operation kind.
    pub fn with_operation_policy(mut self, operation: BulkOperation, policy: BulkPolicy) -> Self {
        self.operation_policies
            .insert(operation.key().to_string(), policy);
        self
    }

    /// The policy `operation` runs with.
    pub fn policy_for(&self, operation: &BulkOperation) -> BulkPolicy {
        self.operation_policies
            .get(operation.key())
            .copied()
            .unwrap_or(self.bulk_policy)
    }
}
