//! Mock publisher for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::publisher::{PublishError, PublishedStatus, Publisher};

/// A recorded publish call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPublish {
    pub file_url: String,
    pub caption: String,
}

/// Mock implementation of the Publisher trait.
///
/// Records every call and returns sequential status ids. A failure can be
/// injected for the next call.
#[derive(Debug, Default)]
pub struct MockPublisher {
    recorded: Arc<RwLock<Vec<RecordedPublish>>>,
    next_error: Arc<RwLock<Option<PublishError>>>,
    next_id: AtomicUsize,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls that reached the publisher, including failed ones.
    pub async fn recorded(&self) -> Vec<RecordedPublish> {
        self.recorded.read().await.clone()
    }

    /// Configure the next publish to fail with the given error.
    pub async fn set_next_error(&self, error: PublishError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(
        &self,
        file_url: &str,
        caption: &str,
    ) -> Result<PublishedStatus, PublishError> {
        self.recorded.write().await.push(RecordedPublish {
            file_url: file_url.to_string(),
            caption: caption.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PublishedStatus {
            id: format!("status-{}", n),
            url: None,
            media_id: format!("media-{}", n),
        })
    }
}
