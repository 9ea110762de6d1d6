//! Scheduler configuration.

use crate::config::Config;

/// Configuration for the posting schedule.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Lower bound of the delay between cycles, in minutes.
    pub interval_min_minutes: f64,
    /// Upper bound of the delay between cycles, in minutes.
    pub interval_max_minutes: f64,
    /// Run the first cycle immediately instead of after the first delay.
    pub post_on_start: bool,
}

impl From<&Config> for SchedulerConfig {
    fn from(config: &Config) -> Self {
        Self {
            interval_min_minutes: config.bot.interval_min_minutes,
            interval_max_minutes: config.bot.interval_max_minutes,
            post_on_start: config.bot.post_on_start,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_min_minutes: 120.0,
            interval_max_minutes: 240.0,
            post_on_start: false,
        }
    }
}
