//! Mock searcher for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::searcher::{SearchEntry, SearchError, Searcher};

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results
/// - Count searches for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use relaybot_core::testing::{MockSearcher, fixtures};
///
/// let searcher = MockSearcher::new();
/// searcher.set_results(vec![fixtures::entry("a", 3.0, "https://cdn/a.png")]).await;
///
/// let results = searcher.search().await?;
/// assert_eq!(results.len(), 1);
/// assert_eq!(searcher.search_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockSearcher {
    /// Configured results to return.
    results: Arc<RwLock<Vec<SearchEntry>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Number of searches performed.
    searches: AtomicUsize,
}

impl MockSearcher {
    /// Create a new mock searcher with empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<SearchEntry>) {
        *self.results.write().await = results;
    }

    /// Add a single result.
    pub async fn add_result(&self, result: SearchEntry) {
        self.results.write().await.push(result);
    }

    /// Clear all results.
    pub async fn clear_results(&self) {
        self.results.write().await.clear();
    }

    /// Get the number of searches performed.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<SearchError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self) -> Result<Vec<SearchEntry>, SearchError> {
        self.searches.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.results.read().await.clone())
    }
}
