use super::{types::Config, ConfigError};

/// Longest accepted posting interval: one year, in minutes.
pub const MAX_INTERVAL_MINUTES: f64 = 60.0 * 24.0 * 365.0;

/// Validate configuration
/// Currently validates:
/// - Required strings are not blank (bot name, site, keywords, instance, token)
/// - Posting interval bounds are positive, ordered and at most a year
/// - Search count, history size and timeouts are not 0
/// - The character limit leaves room for the spoiler text and an ellipsis
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let required = [
        ("bot.name", &config.bot.name),
        ("source.site", &config.source.site),
        ("source.keywords", &config.source.keywords),
        ("target.instance", &config.target.instance),
        ("target.access_token", &config.target.access_token),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(invalid(format!("{} cannot be empty", key)));
        }
    }

    let bot = &config.bot;
    if !(bot.interval_min_minutes > 0.0) {
        return Err(invalid("bot.interval_min_minutes must be positive"));
    }
    if !(bot.interval_max_minutes >= bot.interval_min_minutes) {
        return Err(invalid(
            "bot.interval_max_minutes must not be lower than bot.interval_min_minutes",
        ));
    }
    if !(bot.interval_max_minutes <= MAX_INTERVAL_MINUTES) {
        return Err(invalid(format!(
            "bot.interval_max_minutes must be at most {}",
            MAX_INTERVAL_MINUTES
        )));
    }

    if config.source.count == 0 {
        return Err(invalid("source.count cannot be 0"));
    }
    if config.source.history_size == 0 {
        return Err(invalid("source.history_size cannot be 0"));
    }
    if config.source.timeout_secs == 0 {
        return Err(invalid("source.timeout_secs cannot be 0"));
    }
    if config.target.timeout_secs == 0 {
        return Err(invalid("target.timeout_secs cannot be 0"));
    }

    let reserved = config.target.spoiler_text.chars().count() + 3;
    if config.target.char_limit <= reserved {
        return Err(invalid(format!(
            "target.char_limit must be greater than {} (spoiler text plus ellipsis)",
            reserved
        )));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
[bot]
name = "artbot"

[source]
site = "website.com"
keywords = "art"

[target]
instance = "mastodon.social"
access_token = "secret"
spoiler_text = "artwork"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let mut config = valid_config();
        config.target.access_token = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("access_token")));
    }

    #[test]
    fn test_validate_inverted_interval_fails() {
        let mut config = valid_config();
        config.bot.interval_min_minutes = 60.0;
        config.bot.interval_max_minutes = 30.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_equal_interval_bounds_ok() {
        let mut config = valid_config();
        config.bot.interval_min_minutes = 60.0;
        config.bot.interval_max_minutes = 60.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_interval_fails() {
        let mut config = valid_config();
        config.bot.interval_min_minutes = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unbounded_interval_fails() {
        for max in [f64::INFINITY, f64::NAN, 1e300, MAX_INTERVAL_MINUTES + 1.0] {
            let mut config = valid_config();
            config.bot.interval_max_minutes = max;
            let err = validate_config(&config).unwrap_err();
            assert!(
                matches!(err, ConfigError::ValidationError(ref m) if m.contains("interval_max_minutes"))
            );
        }

        let mut config = valid_config();
        config.bot.interval_max_minutes = MAX_INTERVAL_MINUTES;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_infinite_interval_from_toml_fails() {
        let config = load_config_from_str(
            r#"
[bot]
name = "artbot"
interval_max_minutes = inf

[source]
site = "website.com"
keywords = "art"

[target]
instance = "mastodon.social"
access_token = "secret"
"#,
        )
        .unwrap();
        assert!(config.bot.interval_max_minutes.is_infinite());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_history_fails() {
        let mut config = valid_config();
        config.source.history_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_char_limit_too_small_fails() {
        let mut config = valid_config();
        // "artwork" (7) + "..." (3)
        config.target.char_limit = 10;
        assert!(validate_config(&config).is_err());
        config.target.char_limit = 11;
        assert!(validate_config(&config).is_ok());
    }
}
