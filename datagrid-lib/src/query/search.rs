//! Search input debouncing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Releases a search term only once typing has paused.
///
/// Each call to [`debounce`](Self::debounce) supersedes every earlier call
/// still waiting. Clones share the same sequence, so a list page can hand a
/// clone to each keystroke task.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl SearchDebouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay and return the term, or `None` if a newer term
    /// arrived in the meantime.
    pub async fn debounce(&self, term: impl Into<String>) -> Option<String> {
        let term = term.into();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(term)
    }
}
