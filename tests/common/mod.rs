//! Common utilities for integration tests
//!
//! A mock GitHub API served in-process, plus helpers for running the `ghi`
//! binary against a throwaway document.

#![allow(dead_code)] // Not every test file uses every helper

use assert_cmd::Command;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use github_import::config::ProxyConfig;
use github_import::proxy::{create_router, AppState};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Path of the `ghi` binary built for this test run
pub fn ghi_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ghi"))
}

/// Create a Command for `ghi` isolated from the caller's environment
pub fn ghi_command() -> Command {
    let mut cmd = Command::new(ghi_binary());
    cmd.env("HOME", "/nonexistent")
        .env_remove("GHI_API_URL")
        .env_remove("GHI_GITHUB_API_URL")
        .env_remove("GHI_SERVICE_USER")
        .env_remove("GHI_SERVICE_TOKEN")
        .env_remove("GHI_DOCUMENT")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `document` as `doc.json` in a fresh temp dir
pub fn write_document(document: &Value) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    (dir, path)
}

pub fn read_document(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// One request as seen by the mock GitHub API
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    fn record(&self, headers: &HeaderMap, uri: &Uri) {
        let value = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            path: uri.path().to_string(),
            authorization: value(header::AUTHORIZATION),
            accept: value(header::ACCEPT),
        });
    }
}

async fn issues(State(state): State<MockState>, headers: HeaderMap, uri: Uri) -> Json<Value> {
    state.record(&headers, &uri);
    Json(json!([
        {"title": "Fix login", "html_url": "https://github.com/octocat/hello/issues/1", "number": 1},
        {"title": "Add docs", "html_url": "https://github.com/octocat/hello/issues/2", "number": 2}
    ]))
}

async fn user_repos(
    State(state): State<MockState>,
    Path(user): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    state.record(&headers, &uri);
    match user.as_str() {
        "ghost" => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Not Found", "documentation_url": "https://docs.github.com/rest"})),
        )
            .into_response(),
        "nobody" => Json(json!([])).into_response(),
        _ => Json(json!([
            {"id": 1, "name": "hello", "full_name": format!("{}/hello", user)},
            {"id": 2, "name": "world", "full_name": format!("{}/world", user)}
        ]))
        .into_response(),
    }
}

async fn repo_projects(
    State(state): State<MockState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    uri: Uri,
) -> Json<Value> {
    state.record(&headers, &uri);
    if owner == "octocat" && repo == "hello" {
        Json(json!([
            {"id": 1, "name": "Roadmap", "body": "Where we are going"},
            {"id": 2, "name": "Bugs"}
        ]))
    } else {
        Json(json!([]))
    }
}

async fn project_columns(
    State(state): State<MockState>,
    Path(project_id): Path<u64>,
    headers: HeaderMap,
    uri: Uri,
) -> Json<Value> {
    state.record(&headers, &uri);
    match project_id {
        1 => Json(json!([
            {"id": 11, "name": "To do"},
            {"id": 12, "name": "In progress"}
        ])),
        _ => Json(json!([{"id": 21, "name": "To do"}])),
    }
}

async fn column_cards(
    State(state): State<MockState>,
    Path(column_id): Path<u64>,
    headers: HeaderMap,
    uri: Uri,
) -> Json<Value> {
    state.record(&headers, &uri);
    match column_id {
        11 => Json(json!([
            {
                "id": 101,
                "note": "Write docs",
                "html_url": "https://github.com/octocat/hello/projects/1#card-101"
            },
            {
                "id": 102,
                "note": null,
                "content_url": "https://api.github.com/repos/octocat/hello/issues/3",
                "html_url": "https://github.com/octocat/hello/projects/1#card-102"
            }
        ])),
        _ => Json(json!([])),
    }
}

/// Anything outside the endpoints above; recorded so tests can spot escapes
async fn unmatched(State(state): State<MockState>, headers: HeaderMap, uri: Uri) -> Json<Value> {
    state.record(&headers, &uri);
    Json(json!({"unexpected": uri.to_string()}))
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the mock GitHub API
pub async fn spawn_mock_github() -> (String, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/issues", get(issues))
        .route("/users/:user/repos", get(user_repos))
        .route("/repos/:owner/:repo/projects", get(repo_projects))
        .route("/projects/:project_id/columns", get(project_columns))
        .route("/projects/columns/:column_id/cards", get(column_cards))
        .fallback(unmatched)
        .with_state(state.clone());
    (spawn(app).await, state)
}

pub const SERVICE_USER: &str = "svc";
pub const SERVICE_TOKEN: &str = "token";
/// `Basic` header for `svc:token`
pub const SERVICE_AUTHORIZATION: &str = "Basic c3ZjOnRva2Vu";

/// Start the proxy in front of `github_api_url` with the test service credential
pub async fn spawn_proxy(github_api_url: &str) -> String {
    let config = ProxyConfig {
        github_api_url: github_api_url.to_string(),
        service_user: SERVICE_USER.to_string(),
        service_token: SERVICE_TOKEN.to_string(),
    };
    spawn(create_router(AppState::new(&config).unwrap())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghi_binary_exists() {
        let binary = ghi_binary();
        assert!(binary.exists(), "ghi binary should exist at {:?}", binary);
    }
}
