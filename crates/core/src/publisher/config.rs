//! Configuration for the publisher module.

use std::path::PathBuf;

use crate::config::{Config, Visibility};

/// Settings for the Mastodon publisher.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Instance base URL, e.g. `https://mastodon.social`.
    pub base_url: String,
    pub access_token: String,
    pub timeout_secs: u32,
    pub user_agent: String,
    /// Directory for transient media downloads.
    pub media_dir: PathBuf,
    /// Prefix of transient media file names.
    pub media_prefix: String,
    pub visibility: Visibility,
    pub spoiler_text: String,
    pub sensitive: bool,
}

impl From<&Config> for PublisherConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.target.base_url(),
            access_token: config.target.access_token.clone(),
            timeout_secs: config.target.timeout_secs,
            user_agent: config.source.user_agent.clone(),
            media_dir: config.bot.state_dir.clone(),
            media_prefix: format!("{}_media", config.bot.name),
            visibility: config.target.visibility,
            spoiler_text: config.target.spoiler_text.clone(),
            sensitive: config.target.sensitive,
        }
    }
}
