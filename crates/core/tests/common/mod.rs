//! Common test utilities for HTTP integration tests.
//!
//! Starts an in-process stub server that plays both external parties: the
//! search site (search API and media files) and the Mastodon instance
//! (media upload and status creation).

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path as UrlPath, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use relaybot_core::{load_config_from_str, Config};

/// Bytes served for every media file.
pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

/// A multipart upload received by the stub instance.
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Everything the stub observed, plus failure switches.
#[derive(Debug, Default)]
pub struct StubState {
    pub search_queries: Vec<HashMap<String, String>>,
    pub user_agents: Vec<String>,
    pub search_body: Option<String>,
    pub search_status: Option<StatusCode>,
    pub uploads: Vec<Upload>,
    pub statuses: Vec<Value>,
    pub auth_headers: Vec<String>,
    pub fail_upload: bool,
}

/// Handle to a running stub server.
pub struct StubServer {
    pub base_url: String,
    pub state: Arc<Mutex<StubState>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));

        let app = Router::new()
            .route("/search.json", get(search))
            .route("/files/{name}", get(file))
            .route("/api/v1/media", post(upload))
            .route("/api/v1/statuses", post(create_status))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// URL of a media file served by the stub.
    pub fn file_url(&self, name: &str) -> String {
        format!("{}/files/{}", self.base_url, name)
    }

    /// Serve `entries` under the default `search` key.
    pub fn set_search_entries(&self, entries: Value) {
        self.state.lock().unwrap().search_body = Some(json!({ "search": entries }).to_string());
    }

    pub fn set_search_raw(&self, status: StatusCode, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.search_status = Some(status);
        state.search_body = Some(body.to_string());
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.state.lock().unwrap().fail_upload = fail;
    }

    /// Bot configuration pointing both sides at this stub.
    pub fn config(&self, state_dir: &Path) -> Config {
        load_config_from_str(&format!(
            r##"
[bot]
name = "testbot"
state_dir = "{state_dir}"
interval_min_minutes = 1
interval_max_minutes = 1

[source]
site = "{base}"
keywords = "art,sky"
count = 5
user_agent = "relaybot-test"
timeout_secs = 5

[target]
instance = "{base}"
access_token = "test-token"
timeout_secs = 5
visibility = "unlisted"
spoiler_text = "artwork"
info_prefix = "#art by "
info_suffix = ":"
sensitive = true
"##,
            state_dir = state_dir.display(),
            base = self.base_url,
        ))
        .unwrap()
    }
}

async fn search(
    State(state): State<Arc<Mutex<StubState>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.search_queries.push(query);
    if let Some(agent) = headers.get(header::USER_AGENT) {
        state
            .user_agents
            .push(agent.to_str().unwrap_or_default().to_string());
    }

    let status = state.search_status.unwrap_or(StatusCode::OK);
    let body = state
        .search_body
        .clone()
        .unwrap_or_else(|| r#"{"search": []}"#.to_string());
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn file(UrlPath(name): UrlPath<String>) -> Response {
    if name.starts_with("missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], IMAGE_BYTES).into_response()
}

async fn upload(
    State(state): State<Arc<Mutex<StubState>>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut received = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        received.push(Upload {
            field: field_name,
            file_name,
            content_type,
            data,
        });
    }

    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    if state.fail_upload {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upload exploded").into_response();
    }
    state.uploads.extend(received);
    let id = format!("media-{}", state.uploads.len());
    Json(json!({ "id": id, "type": "image" })).into_response()
}

async fn create_status(
    State(state): State<Arc<Mutex<StubState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    state.statuses.push(body);
    let id = format!("{}", 100 + state.statuses.len());
    Json(json!({ "id": id, "url": format!("https://social.example/@testbot/{}", id) }))
        .into_response()
}

fn record_auth(state: &mut StubState, headers: &HeaderMap) {
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        state
            .auth_headers
            .push(auth.to_str().unwrap_or_default().to_string());
    }
}

/// File names currently present in `dir`.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
