//! Mastodon API publisher.
//!
//! Uses `POST /api/v1/media` for the attachment and `POST /api/v1/statuses`
//! for the post, authenticated with the account's access token.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{PublishError, PublishedStatus, Publisher, PublisherConfig};

/// Downloaded media waiting for upload.
#[derive(Debug)]
struct LocalMedia {
    path: PathBuf,
    file_name: String,
    content_type: Option<String>,
    size_bytes: u64,
}

#[derive(Debug, Deserialize)]
struct MediaAttachment {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateStatusRequest<'a> {
    status: &'a str,
    media_ids: [&'a str; 1],
    sensitive: bool,
    spoiler_text: &'a str,
    visibility: &'a str,
}

/// Publisher for Mastodon compatible instances.
pub struct MastodonPublisher {
    client: Client,
    config: PublisherConfig,
}

impl MastodonPublisher {
    /// Create a new publisher.
    pub fn new(config: PublisherConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PublishError::Upload(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/{}", self.config.base_url, endpoint)
    }

    fn transient_path(&self) -> PathBuf {
        self.config.media_dir.join(format!(
            "{}_{}",
            self.config.media_prefix,
            Uuid::new_v4().simple()
        ))
    }

    /// Stream `file_url` into a local file.
    async fn download(&self, file_url: &str, path: &Path) -> Result<LocalMedia, PublishError> {
        debug!(url = file_url, "Downloading media");

        let response = self
            .client
            .get(file_url)
            .send()
            .await
            .map_err(|e| transport_error(e, PublishError::Download))?;

        if !response.status().is_success() {
            return Err(PublishError::Download(format!(
                "HTTP {} for {}",
                response.status(),
                file_url
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut size_bytes = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport_error(e, PublishError::Download))?;
            file.write_all(&chunk).await?;
            size_bytes += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(path = %path.display(), size_bytes, "Media downloaded");

        Ok(LocalMedia {
            path: path.to_path_buf(),
            file_name: file_name_from_url(file_url),
            content_type,
            size_bytes,
        })
    }

    /// Upload the local file and return the media attachment id.
    async fn upload(&self, media: &LocalMedia) -> Result<String, PublishError> {
        let data = tokio::fs::read(&media.path).await?;
        let mut part = Part::bytes(data).file_name(media.file_name.clone());
        if let Some(content_type) = &media.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| PublishError::Upload(format!("invalid content type: {}", e)))?;
        }

        let response = self
            .client
            .post(self.api_url("media"))
            .bearer_auth(&self.config.access_token)
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(|e| transport_error(e, PublishError::Upload))?;

        let attachment: MediaAttachment = parse_response(response, PublishError::Upload).await?;
        debug!(media_id = %attachment.id, size_bytes = media.size_bytes, "Media uploaded");
        Ok(attachment.id)
    }

    /// Create the status referencing `media_id`.
    async fn create_status(&self, caption: &str, media_id: &str) -> Result<Status, PublishError> {
        let request = CreateStatusRequest {
            status: caption,
            media_ids: [media_id],
            sensitive: self.config.sensitive,
            spoiler_text: &self.config.spoiler_text,
            visibility: self.config.visibility.as_str(),
        };

        let response = self
            .client
            .post(self.api_url("statuses"))
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, PublishError::CreateStatus))?;

        parse_response(response, PublishError::CreateStatus).await
    }

    async fn publish_from(
        &self,
        file_url: &str,
        caption: &str,
        path: &Path,
    ) -> Result<PublishedStatus, PublishError> {
        let media = self.download(file_url, path).await?;
        let media_id = self.upload(&media).await?;
        let status = self.create_status(caption, &media_id).await?;

        Ok(PublishedStatus {
            id: status.id,
            url: status.url,
            media_id,
        })
    }
}

#[async_trait]
impl Publisher for MastodonPublisher {
    fn name(&self) -> &str {
        "mastodon"
    }

    async fn publish(
        &self,
        file_url: &str,
        caption: &str,
    ) -> Result<PublishedStatus, PublishError> {
        let path = self.transient_path();
        let result = self.publish_from(file_url, caption, &path).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), "Could not remove media file: {}", e);
            }
        }

        if let Ok(status) = &result {
            info!(
                status_id = %status.id,
                url = status.url.as_deref().unwrap_or(""),
                "Status published"
            );
        }

        result
    }
}

/// Last path segment of a URL, used as the upload file name.
fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let path = path.split_once("://").map(|(_, rest)| rest).unwrap_or(path);
    match path.split_once('/') {
        Some((_, rest)) => rest
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("media")
            .to_string(),
        None => "media".to_string(),
    }
}

fn transport_error(e: reqwest::Error, wrap: fn(String) -> PublishError) -> PublishError {
    if e.is_timeout() {
        PublishError::Timeout
    } else {
        wrap(e.to_string())
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: Response,
    wrap: fn(String) -> PublishError,
) -> Result<T, PublishError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PublishError::Api {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| wrap(format!("Failed to parse response: {}", e)))
}
