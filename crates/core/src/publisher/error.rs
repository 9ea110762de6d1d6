//! Error types for the publisher module.

use thiserror::Error;

/// Errors that can occur while publishing a post.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Fetching the media file failed.
    #[error("Media download failed: {0}")]
    Download(String),

    /// The media upload request failed.
    #[error("Media upload failed: {0}")]
    Upload(String),

    /// The status creation request failed.
    #[error("Status creation failed: {0}")]
    CreateStatus(String),

    /// The instance answered with an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A request exceeded the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// Local file handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
