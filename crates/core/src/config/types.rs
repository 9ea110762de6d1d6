use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub bot: BotConfig,
    pub source: SourceConfig,
    pub target: TargetConfig,
}

impl Config {
    /// Path of the JSON history file (`<state_dir>/<name>_history.json`).
    pub fn history_path(&self) -> PathBuf {
        self.bot
            .state_dir
            .join(format!("{}_history.json", self.bot.name))
    }
}

/// Bot identity and scheduling
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Name of this bot, used for the history and media file names.
    pub name: String,
    /// Lower bound of the randomized posting interval, in minutes.
    #[serde(default = "default_interval_min")]
    pub interval_min_minutes: f64,
    /// Upper bound of the randomized posting interval, in minutes.
    #[serde(default = "default_interval_max")]
    pub interval_max_minutes: f64,
    /// Directory holding the history file and transient media downloads.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Run a cycle right after startup instead of waiting for the first timer.
    #[serde(default)]
    pub post_on_start: bool,
}

fn default_interval_min() -> f64 {
    120.0
}

fn default_interval_max() -> f64 {
    240.0
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Search API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Site hostname (e.g. "website.com") or base URL with scheme.
    pub site: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Number of entries requested per search.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Number of posted ids remembered to avoid reposting.
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Minimum score a submission needs to be considered.
    #[serde(default)]
    pub min_score: f64,
    /// Keywords to search for, comma separated.
    pub keywords: String,
    /// Include NSFW content in requests.
    #[serde(default)]
    pub nsfw: bool,
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Names of the fields in the search API response.
    #[serde(default)]
    pub fields: FieldMapping,
}

impl SourceConfig {
    pub fn base_url(&self) -> String {
        base_url(&self.site)
    }
}

fn default_user_agent() -> String {
    concat!("relaybot/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_count() -> u32 {
    10
}

fn default_history_size() -> usize {
    100
}

fn default_timeout() -> u32 {
    60
}

/// Maps search API response keys onto `SearchEntry` fields.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldMapping {
    /// Top level key holding the array of entries.
    pub results: String,
    pub id: String,
    pub file: String,
    pub info: String,
    pub author: String,
    /// Comma separated tag string.
    pub tags: String,
    pub source: String,
    pub score: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            results: "search".to_string(),
            id: "id".to_string(),
            file: "file".to_string(),
            info: "info".to_string(),
            author: "author".to_string(),
            tags: "tags".to_string(),
            source: "source".to_string(),
            score: "score".to_string(),
        }
    }
}

/// Publishing target configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Instance hostname (e.g. "mastodon.social") or base URL with scheme.
    pub instance: String,
    /// Access token of the application configured on the account.
    pub access_token: String,
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Characters allowed in a post on this instance.
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,
    #[serde(default)]
    pub visibility: Visibility,
    /// Content warning shown before the post.
    #[serde(default)]
    pub spoiler_text: String,
    /// Text placed before the author name.
    #[serde(default = "default_info_prefix")]
    pub info_prefix: String,
    /// Text placed after the author name.
    #[serde(default = "default_info_suffix")]
    pub info_suffix: String,
    /// Maximum number of source tags copied into a post.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    /// Mark attached media as sensitive.
    #[serde(default = "default_sensitive")]
    pub sensitive: bool,
}

impl TargetConfig {
    pub fn base_url(&self) -> String {
        base_url(&self.instance)
    }
}

fn default_char_limit() -> usize {
    500
}

fn default_info_prefix() -> String {
    "by ".to_string()
}

fn default_info_suffix() -> String {
    ":".to_string()
}

fn default_max_tags() -> usize {
    10
}

fn default_sensitive() -> bool {
    true
}

/// Post visibility levels
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

/// Turn a hostname into an https base URL; values that already carry a
/// scheme are kept. Trailing slashes are removed.
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
