//! HTTP search API backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::config::SourceConfig;

use super::mapping::parse_search_response;
use super::{SearchEntry, SearchError, Searcher};

/// Searcher for sites exposing `GET /search.json?tags=..&count=..&nsfw=..`.
pub struct ApiSearcher {
    client: Client,
    config: SourceConfig,
    base_url: String,
}

impl ApiSearcher {
    /// Create a new ApiSearcher with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SearchError::ConnectionFailed(format!("HTTP client: {}", e)))?;
        let base_url = config.base_url();

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build the search URL.
    fn build_search_url(&self) -> String {
        format!(
            "{}/search.json?tags={}&count={}&nsfw={}",
            self.base_url,
            urlencoding::encode(&self.config.keywords),
            self.config.count,
            self.config.nsfw
        )
    }
}

#[async_trait]
impl Searcher for ApiSearcher {
    fn name(&self) -> &str {
        "search_api"
    }

    async fn search(&self) -> Result<Vec<SearchEntry>, SearchError> {
        let url = self.build_search_url();
        debug!(url = %url, "Requesting search results");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let entries = parse_search_response(&body, &self.config.fields)?;

        debug!(results = entries.len(), "Search complete");
        Ok(entries)
    }
}

fn map_transport_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else if e.is_connect() {
        SearchError::ConnectionFailed(e.to_string())
    } else {
        SearchError::ApiError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn source_config(keywords: &str, nsfw: bool) -> SourceConfig {
        let mut config = load_config_from_str(
            r#"
[bot]
name = "artbot"

[source]
site = "website.com"
keywords = "art"
count = 25

[target]
instance = "mastodon.social"
access_token = "secret"
"#,
        )
        .unwrap()
        .source;
        config.keywords = keywords.to_string();
        config.nsfw = nsfw;
        config
    }

    #[test]
    fn test_build_search_url() {
        let searcher = ApiSearcher::new(source_config("art", false)).unwrap();
        assert_eq!(
            searcher.build_search_url(),
            "https://website.com/search.json?tags=art&count=25&nsfw=false"
        );
    }

    #[test]
    fn test_build_search_url_encodes_keywords() {
        let searcher = ApiSearcher::new(source_config("oil painting,sky", true)).unwrap();
        assert_eq!(
            searcher.build_search_url(),
            "https://website.com/search.json?tags=oil%20painting%2Csky&count=25&nsfw=true"
        );
    }

    #[test]
    fn test_site_with_scheme() {
        let mut config = source_config("art", false);
        config.site = "http://127.0.0.1:9000/".to_string();
        let searcher = ApiSearcher::new(config).unwrap();
        assert!(searcher
            .build_search_url()
            .starts_with("http://127.0.0.1:9000/search.json?"));
    }
}
