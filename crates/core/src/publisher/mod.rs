//! Publishing of media posts.
//!
//! A `Publisher` takes the URL of a media file and a caption and turns them
//! into a post on the target account. The Mastodon implementation downloads
//! the file to a transient local file, uploads it as a media attachment and
//! creates a status referencing it. The transient file is removed whatever
//! the outcome.

mod config;
mod error;
mod mastodon;
mod traits;

pub use config::PublisherConfig;
pub use error::PublishError;
pub use mastodon::MastodonPublisher;
pub use traits::{PublishedStatus, Publisher};
