//! Runs one bulk operation over a row set and settles it.

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::error::MutationError;
use crate::model::GridRow;
use crate::notice::Notice;
use crate::selection::Selection;

use super::{
    BulkHandler, BulkOperation, BulkPolicy, BulkResult, ConcurrencyLimiter, Execution,
    FailurePolicy,
};

/// Lifecycle of the most recent bulk invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BulkState {
    #[default]
    Idle,
    Running {
        operation: BulkOperation,
        total: usize,
    },
    Settled(BulkResult),
}

/// What a bulk invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Nothing ran. Selection and rows are untouched.
    Rejected(Notice),
    Settled(BulkResult),
}

impl BulkOutcome {
    /// The notice to show the user.
    pub fn notice(&self) -> Notice {
        match self {
            BulkOutcome::Rejected(notice) => notice.clone(),
            BulkOutcome::Settled(result) => result.summary(),
        }
    }

    pub fn result(&self) -> Option<&BulkResult> {
        match self {
            BulkOutcome::Rejected(_) => None,
            BulkOutcome::Settled(result) => Some(result),
        }
    }
}

enum RowOutcome {
    Succeeded,
    Failed(String, MutationError),
    Skipped,
}

/// Drives `Idle -> Running -> Settled` for bulk operations.
#[derive(Debug, Default)]
pub struct BulkOrchestrator {
    state: BulkState,
}

impl BulkOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BulkState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, BulkState::Running { .. })
    }

    /// Run `operation` over `rows` without a cancellation path.
    pub async fn run<R, H>(
        &mut self,
        operation: BulkOperation,
        rows: &[&R],
        policy: BulkPolicy,
        selection: &mut Selection<R::Id>,
        handler: &H,
    ) -> BulkOutcome
    where
        R: GridRow,
        H: BulkHandler<R> + ?Sized,
    {
        let token = CancellationToken::new();
        self.run_with_cancel(operation, rows, policy, selection, handler, &token)
            .await
    }

    /// Run `operation` over `rows`, stopping early once `cancel` fires.
    ///
    /// An empty `rows` is rejected with a warning. Otherwise every row ends
    /// up counted exactly once as a success, a failure or skipped, and then
    /// the selection is cleared and the host refreshes, whatever the outcome.
    pub async fn run_with_cancel<R, H>(
        &mut self,
        operation: BulkOperation,
        rows: &[&R],
        policy: BulkPolicy,
        selection: &mut Selection<R::Id>,
        handler: &H,
        cancel: &CancellationToken,
    ) -> BulkOutcome
    where
        R: GridRow,
        H: BulkHandler<R> + ?Sized,
    {
        if rows.is_empty() {
            log::debug!("bulk {} rejected: no rows selected", operation.key());
            let body = format!(
                "Select at least one record to {}.",
                operation.label().to_lowercase()
            );
            return BulkOutcome::Rejected(Notice::warning("No records selected").with_body(body));
        }

        let total = rows.len();
        self.state = BulkState::Running {
            operation: operation.clone(),
            total,
        };
        log::info!(
            "bulk {} started: {} rows, {:?}",
            operation.key(),
            total,
            policy
        );

        let mut result = BulkResult::new(operation.clone(), total);
        match policy.effective_execution() {
            Execution::Sequential => {
                run_sequential(&operation, rows, policy.failure, handler, cancel, &mut result).await
            }
            Execution::Concurrent { limit } => {
                run_concurrent(&operation, rows, limit, handler, cancel, &mut result).await
            }
        }

        log::info!(
            "bulk {} settled: {} succeeded, {} failed, {} skipped of {}",
            operation.key(),
            result.success_count,
            result.error_count,
            result.skipped_count,
            result.total
        );

        selection.clear();
        handler.refresh().await;

        self.state = BulkState::Settled(result.clone());
        BulkOutcome::Settled(result)
    }
}

async fn run_sequential<R, H>(
    operation: &BulkOperation,
    rows: &[&R],
    failure: FailurePolicy,
    handler: &H,
    cancel: &CancellationToken,
    result: &mut BulkResult,
) where
    R: GridRow,
    H: BulkHandler<R> + ?Sized,
{
    for (index, row) in rows.iter().enumerate() {
        let remaining = rows.len() - index;
        if cancel.is_cancelled() {
            result.record_skipped(remaining);
            result.cancelled = true;
            return;
        }
        match handler.mutate(operation, row).await {
            Ok(()) => result.record_success(),
            Err(error) => {
                log::warn!("bulk {} failed for row {}: {}", operation.key(), row.id(), error);
                result.record_failure(row.id().to_string(), error);
                if failure == FailurePolicy::StopOnFirstError {
                    result.record_skipped(remaining - 1);
                    result.aborted = true;
                    return;
                }
            }
        }
    }
}

async fn run_concurrent<R, H>(
    operation: &BulkOperation,
    rows: &[&R],
    limit: usize,
    handler: &H,
    cancel: &CancellationToken,
    result: &mut BulkResult,
) where
    R: GridRow,
    H: BulkHandler<R> + ?Sized,
{
    let limiter = ConcurrencyLimiter::new(limit);
    let tasks = rows.iter().map(|row| {
        let limiter = &limiter;
        async move {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                permit = limiter.acquire() => permit,
            };
            if permit.is_none() || cancel.is_cancelled() {
                return RowOutcome::Skipped;
            }
            match handler.mutate(operation, row).await {
                Ok(()) => RowOutcome::Succeeded,
                Err(error) => RowOutcome::Failed(row.id().to_string(), error),
            }
        }
    });

    for outcome in join_all(tasks).await {
        match outcome {
            RowOutcome::Succeeded => result.record_success(),
            RowOutcome::Failed(row_id, error) => {
                log::warn!("bulk {} failed for row {}: {}", operation.key(), row_id, error);
                result.record_failure(row_id, error);
            }
            RowOutcome::Skipped => {
                result.record_skipped(1);
                result.cancelled = true;
            }
        }
    }
}
