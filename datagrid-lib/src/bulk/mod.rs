//! Bulk operations over the selected rows.
//!
//! A bulk run calls the host's per-row mutation once for every selected
//! row, folds the outcomes into one [`BulkResult`], then clears the
//! selection and asks the host to refresh, whatever happened.
//!
//! # Example
//!
//! ```ignore
//! struct LeadsApi { client: Client }
//!
//! #[async_trait]
//! impl BulkHandler<Lead> for LeadsApi {
//!     async fn mutate(&self, op: &BulkOperation, lead: &Lead) -> Result<(), MutationError> {
//!         match op {
//!             BulkOperation::Delete => self.client.delete_lead(lead.id).await,
//!             BulkOperation::Activate => self.client.set_active(lead.id, true).await,
//!             BulkOperation::Deactivate => self.client.set_active(lead.id, false).await,
//!             _ => Err(MutationError::new("unsupported")),
//!         }
//!     }
//!
//!     async fn refresh(&self) {
//!         self.client.invalidate("leads").await;
//!     }
//! }
//!
//! let outcome = grid.run_bulk(BulkOperation::Delete, &api).await;
//! ```

mod limiter;
mod orchestrator;
mod policy;
mod result;

pub use limiter::ConcurrencyLimiter;
pub use orchestrator::{BulkOrchestrator, BulkOutcome, BulkState};
pub use policy::{BulkPolicy, Execution, FailurePolicy};
pub use result::{BulkResult, RowFailure};

use async_trait::async_trait;

use crate::error::MutationError;
use crate::model::GridRow;

/// Default number of row mutations in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// An operation applied to every selected row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BulkOperation {
    Delete,
    Activate,
    Deactivate,
    Export,
    /// Host-defined operation, e.g. "assign owner".
    Custom { key: String, label: String },
}

impl BulkOperation {
    /// Create a host-defined operation.
    pub fn custom(key: impl Into<String>, label: impl Into<String>) -> Self {
        BulkOperation::Custom {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Stable key, used for per-operation policy lookup and logging.
    pub fn key(&self) -> &str {
        match self {
            BulkOperation::Delete => "delete",
            BulkOperation::Activate => "activate",
            BulkOperation::Deactivate => "deactivate",
            BulkOperation::Export => "export",
            BulkOperation::Custom { key, .. } => key,
        }
    }

    /// Button label.
    pub fn label(&self) -> &str {
        match self {
            BulkOperation::Delete => "Delete",
            BulkOperation::Activate => "Activate",
            BulkOperation::Deactivate => "Deactivate",
            BulkOperation::Export => "Export",
            BulkOperation::Custom { label, .. } => label,
        }
    }

    /// Past-tense verb for summaries ("3 records deleted").
    pub fn past_tense(&self) -> String {
        match self {
            BulkOperation::Delete => "deleted".to_string(),
            BulkOperation::Activate => "activated".to_string(),
            BulkOperation::Deactivate => "deactivated".to_string(),
            BulkOperation::Export => "exported".to_string(),
            BulkOperation::Custom { label, .. } => format!("updated ({})", label.to_lowercase()),
        }
    }
}

/// Host side of a bulk operation.
#[async_trait]
pub trait BulkHandler<R: GridRow>: Send + Sync {
    /// Apply `operation` to one row.
    async fn mutate(&self, operation: &BulkOperation, row: &R) -> Result<(), MutationError>;

    /// Re-fetch the rows after the run settled.
    async fn refresh(&self);
}
