use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::server::AppState;
use super::upstream::{relay, user_error};
use crate::error::Result;
use crate::github::{api, GitHubApi};

/// Query parameters accepted by the proxy endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    pub username: Option<String>,
    pub repository: Option<String>,
    pub project: Option<String>,
    pub column: Option<String>,
}

/// A present, non-empty parameter or the 400 naming it
fn required<'a>(value: &'a Option<String>, name: &str) -> std::result::Result<&'a str, Response> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| user_error(&format!("{} is required", name)))
}

/// Issues assigned to the service account
pub async fn issues(State(state): State<AppState>) -> Response {
    relay(state.upstream.get_text(&api::issues_path()).await)
}

pub async fn repositories(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let username = match required(&query.username, "username") {
        Ok(v) => v,
        Err(response) => return response,
    };
    let path = match api::user_repos_path(username) {
        Ok(path) => path,
        Err(e) => return relay(Err(e)),
    };
    relay(state.upstream.get_text(&path).await)
}

pub async fn projects(State(state): State<AppState>, Query(query): Query<ProxyQuery>) -> Response {
    let repository = match required(&query.repository, "repository") {
        Ok(v) => v,
        Err(response) => return response,
    };
    let path = match api::repo_projects_path(repository) {
        Ok(path) => path,
        Err(e) => return relay(Err(e)),
    };
    relay(state.upstream.get_text(&path).await)
}

pub async fn cards(State(state): State<AppState>, Query(query): Query<ProxyQuery>) -> Response {
    let (repository, project, column) = match (
        required(&query.repository, "repository"),
        required(&query.project, "project"),
        required(&query.column, "column"),
    ) {
        (Ok(r), Ok(p), Ok(c)) => (r, p, c),
        (Err(response), _, _) | (_, Err(response), _) | (_, _, Err(response)) => return response,
    };
    relay(column_cards(&state.upstream, repository, project, column).await)
}

async fn column_cards(
    upstream: &GitHubApi,
    repository: &str,
    project: &str,
    column: &str,
) -> Result<String> {
    let column_id = upstream.resolve_column(repository, project, column).await?;
    tracing::debug!(repository, project, column, column_id, "Resolved project column");
    upstream.get_text(&api::column_cards_path(column_id)).await
}
