//! Aggregated outcome of a bulk run.

use crate::error::MutationError;
use crate::notice::Notice;

use super::BulkOperation;

/// One row that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// The row's id, as displayed.
    pub row_id: String,
    pub error: MutationError,
}

/// Counts for a settled bulk run.
///
/// `success_count + error_count + skipped_count == total` always holds.
/// Rows are only skipped when the run stopped at a failure or was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResult {
    pub operation: BulkOperation,
    pub success_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
    pub total: usize,
    /// Failed rows in the order they failed.
    pub failures: Vec<RowFailure>,
    /// The run stopped at its first failure.
    pub aborted: bool,
    /// The run was cancelled before every row started.
    pub cancelled: bool,
}

impl BulkResult {
    pub(crate) fn new(operation: BulkOperation, total: usize) -> Self {
        Self {
            operation,
            success_count: 0,
            error_count: 0,
            skipped_count: 0,
            total,
            failures: Vec::new(),
            aborted: false,
            cancelled: false,
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(&mut self, row_id: String, error: MutationError) {
        self.error_count += 1;
        self.failures.push(RowFailure { row_id, error });
    }

    pub(crate) fn record_skipped(&mut self, count: usize) {
        self.skipped_count += count;
    }

    /// One message summarizing the run for the user.
    pub fn summary(&self) -> Notice {
        let done = self.operation.past_tense();
        if self.aborted {
            let mut body = format!(
                "{} of {} {} {}; {} not attempted.",
                self.success_count,
                self.total,
                records(self.total),
                done,
                self.skipped_count
            );
            if let Some(failure) = self.failures.first() {
                body.push_str(&format!(" {}", failure.error));
            }
            return Notice::error(format!("{} stopped after an error", self.operation.label()))
                .with_body(body);
        }
        if self.cancelled {
            return Notice::warning(format!("{} cancelled", self.operation.label())).with_body(
                format!(
                    "{} succeeded, {} failed, {} not attempted.",
                    self.success_count, self.error_count, self.skipped_count
                ),
            );
        }
        if self.error_count == 0 {
            return Notice::success(format!(
                "{} {} {}",
                self.success_count,
                records(self.success_count),
                done
            ));
        }
        if self.success_count == 0 {
            return Notice::error(format!(
                "{} failed for {} {}",
                self.operation.label(),
                self.error_count,
                records(self.error_count)
            ));
        }
        Notice::warning(format!(
            "{} {} {}, {} failed",
            self.success_count,
            records(self.success_count),
            done,
            self.error_count
        ))
    }
}

fn records(n: usize) -> &'static str {
    if n == 1 { "record" } else { "records" }
}
