//! Trait definitions for the publisher module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::PublishError;

/// A post created on the target account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedStatus {
    /// Status id assigned by the instance.
    pub id: String,
    /// Public URL of the status, when the instance reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Media attachment id the status references.
    pub media_id: String,
}

/// A target that can publish a media file with a caption.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Returns the name of this publisher implementation.
    fn name(&self) -> &str;

    /// Download the media at `file_url` and post it with `caption`.
    async fn publish(&self, file_url: &str, caption: &str)
        -> Result<PublishedStatus, PublishError>;
}
