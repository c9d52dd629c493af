//! How a bulk operation runs and reacts to failures.

/// What happens after one row's mutation fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Attempt every row and count each outcome.
    #[default]
    ContinueOnError,
    /// Stop at the first failure; remaining rows are skipped. Work already
    /// done is not rolled back.
    StopOnFirstError,
}

/// How row mutations are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// One row at a time, in selection order.
    Sequential,
    /// Up to `limit` rows in flight at once.
    Concurrent { limit: usize },
}

impl Default for Execution {
    fn default() -> Self {
        Execution::Concurrent {
            limit: super::DEFAULT_CONCURRENCY,
        }
    }
}

/// Failure handling plus scheduling for one bulk operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkPolicy {
    pub failure: FailurePolicy,
    pub execution: Execution,
}

impl BulkPolicy {
    /// Every row attempted, up to `limit` at once.
    pub fn concurrent(limit: usize) -> Self {
        Self {
            failure: FailurePolicy::ContinueOnError,
            execution: Execution::Concurrent { limit },
        }
    }

    /// Every row attempted, one at a time.
    pub fn sequential() -> Self {
        Self {
            failure: FailurePolicy::ContinueOnError,
            execution: Execution::Sequential,
        }
    }

    /// One at a time, stopping at the first failure.
    pub fn stop_on_first_error() -> Self {
        Self {
            failure: FailurePolicy::StopOnFirstError,
            execution: Execution::Sequential,
        }
    }

    /// The schedule actually used. Stopping at the first failure only has a
    /// clear meaning when rows run in order, so it forces sequential runs.
    pub fn effective_execution(&self) -> Execution {
        match self.failure {
            FailurePolicy::StopOnFirstError => Execution::Sequential,
            FailurePolicy::ContinueOnError => self.execution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_on_error_forces_sequential() {
        let policy = BulkPolicy {
            failure: FailurePolicy::StopOnFirstError,
            execution: Execution::Concurrent { limit: 8 },
        };
        assert_eq!(policy.effective_execution(), Execution::Sequential);
        assert_eq!(
            BulkPolicy::concurrent(3).effective_execution(),
            Execution::Concurrent { limit: 3 }
        );
    }
}
