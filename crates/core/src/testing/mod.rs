//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the search, history and
//! publishing traits, allowing relay cycles to be exercised without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use relaybot_core::testing::{fixtures, MemoryHistoryStore, MockPublisher, MockSearcher};
//!
//! let searcher = MockSearcher::new();
//! let history = MemoryHistoryStore::new();
//! let publisher = MockPublisher::new();
//!
//! searcher.set_results(vec![fixtures::entry("a", 3.0, "https://cdn/a.png")]).await;
//! // Build a RelayCycle from them...
//! ```

mod memory_history;
mod mock_publisher;
mod mock_searcher;

pub use memory_history::MemoryHistoryStore;
pub use mock_publisher::{MockPublisher, RecordedPublish};
pub use mock_searcher::MockSearcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::searcher::SearchEntry;

    /// Create a search entry with only the required fields and a score.
    pub fn entry(id: &str, score: f64, file_url: &str) -> SearchEntry {
        SearchEntry {
            id: id.to_string(),
            file_url: file_url.to_string(),
            score,
            ..Default::default()
        }
    }

    /// Create a fully populated search entry.
    pub fn full_entry(id: &str, score: f64) -> SearchEntry {
        SearchEntry {
            id: id.to_string(),
            file_url: format!("https://cdn.example.com/{}.png", id),
            info: Some(format!("Description of submission {}.", id)),
            author: Some("painter".to_string()),
            tags: Some(" landscape, medium:oil painting, sky".to_string()),
            source: Some(format!("https://example.com/view/{}", id)),
            score,
        }
    }
}
