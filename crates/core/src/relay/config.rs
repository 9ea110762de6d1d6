//! Relay cycle configuration.

use crate::caption::CaptionConfig;
use crate::config::Config;

/// Settings for one relay cycle.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Minimum score a submission needs to be selected.
    pub min_score: f64,
    /// Number of posted ids kept in the history.
    pub history_size: usize,
    pub caption: CaptionConfig,
}

impl From<&Config> for RelayConfig {
    fn from(config: &Config) -> Self {
        Self {
            min_score: config.source.min_score,
            history_size: config.source.history_size,
            caption: CaptionConfig::from(config),
        }
    }
}
