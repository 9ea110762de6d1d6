//! Types for the search system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One submission returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Submission id. Empty when the API omitted it.
    pub id: String,
    /// URL of the media file. Empty when the API omitted it.
    pub file_url: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Comma separated tags, each usually preceded by a space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Link to the submission page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Ranking score (0 when absent).
    #[serde(default)]
    pub score: f64,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search API error: {0}")]
    ApiError(String),

    #[error("Search response could not be parsed: {0}")]
    ParseError(String),

    #[error("Request timeout")]
    Timeout,
}

impl SearchError {
    /// Parse failures are recoverable: the cycle continues with no results.
    pub fn is_parse(&self) -> bool {
        matches!(self, SearchError::ParseError(_))
    }
}

/// Trait for search backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Fetch the current batch of candidates, in API order.
    async fn search(&self) -> Result<Vec<SearchEntry>, SearchError>;
}
