use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

pub const SUGGESTION_DELAY: Duration = Duration::from_millis(220);
pub const SUGGESTION_LIMIT: usize = 5;

/// Debounces type-ahead lookups.
///
/// Every call takes a new generation number. A call returns `None` when a
/// newer call started before its delay elapsed or before its fetch finished,
/// so a slow stale response can never overwrite a fresher one.
#[derive(Debug)]
pub struct SuggestionDebouncer {
    generation: AtomicU64,
    delay: Duration,
}

impl Default for SuggestionDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionDebouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(SUGGESTION_DELAY)
    }

    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            delay,
        }
    }

    pub async fn lookup<F, Fut, T>(&self, fetch: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.delay).await;
        if !self.is_latest(ticket) {
            tracing::debug!(ticket, "suggestion lookup superseded before fetch");
            return None;
        }

        let result = fetch().await;
        if !self.is_latest(ticket) {
            tracing::debug!(ticket, "discarding stale suggestions");
            return None;
        }
        Some(result)
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}
