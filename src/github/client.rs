use super::api::{self, Credential, GitHubApi};
use super::models::{Card, Issue, Project, Repository};
use crate::error::{ImportError, Result};
use crate::settings::DocumentSettings;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// The four listings the importers need
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Issues assigned to `username`
    async fn issues(&self, username: &str) -> Result<Vec<Issue>>;

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>>;

    /// Projects of an `owner/name` repository
    async fn projects(&self, repository: &str) -> Result<Vec<Project>>;

    /// Cards in `column` of `project` in `repository`
    async fn cards(&self, repository: &str, project: &str, column: &str) -> Result<Vec<Card>>;
}

/// Talks to GitHub with the user's own token
pub struct DirectClient {
    api: GitHubApi,
}

impl DirectClient {
    pub fn new(base_url: &str, credential: Credential) -> Result<Self> {
        Ok(Self {
            api: GitHubApi::new(base_url, Some(credential))?,
        })
    }
}

#[async_trait]
impl GitHubSource for DirectClient {
    async fn issues(&self, _username: &str) -> Result<Vec<Issue>> {
        // `/issues` is scoped by the credential, not by a path parameter
        self.api.get_json(&api::issues_path()).await
    }

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.api.get_json(&api::user_repos_path(username)?).await
    }

    async fn projects(&self, repository: &str) -> Result<Vec<Project>> {
        self.api.get_json(&api::repo_projects_path(repository)?).await
    }

    async fn cards(&self, repository: &str, project: &str, column: &str) -> Result<Vec<Card>> {
        let column_id = self.api.resolve_column(repository, project, column).await?;
        self.api.get_json(&api::column_cards_path(column_id)).await
    }
}

/// Goes through the credential-injecting proxy
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "Proxy request");
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Upstream {
                status: status.as_u16(),
                body: response.text().await?,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl GitHubSource for ProxyClient {
    async fn issues(&self, username: &str) -> Result<Vec<Issue>> {
        self.get("github-issues", &[("username", username)]).await
    }

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get("github-repositories", &[("username", username)])
            .await
    }

    async fn projects(&self, repository: &str) -> Result<Vec<Project>> {
        self.get("github-projects", &[("repository", repository)])
            .await
    }

    async fn cards(&self, repository: &str, project: &str, column: &str) -> Result<Vec<Card>> {
        self.get(
            "github-cards",
            &[
                ("repository", repository),
                ("project", project),
                ("column", column),
            ],
        )
        .await
    }
}

/// Picks the route for one handler invocation from the document settings
pub trait SourceSelector: Send + Sync {
    fn select(&self, settings: &DocumentSettings) -> Result<Arc<dyn GitHubSource>>;
}

/// Direct when the document carries a token, proxy otherwise
#[derive(Debug, Clone)]
pub struct Connector {
    github_api_url: String,
    proxy_url: String,
}

impl Connector {
    pub fn new(github_api_url: impl Into<String>, proxy_url: impl Into<String>) -> Self {
        Self {
            github_api_url: github_api_url.into(),
            proxy_url: proxy_url.into(),
        }
    }
}

impl SourceSelector for Connector {
    fn select(&self, settings: &DocumentSettings) -> Result<Arc<dyn GitHubSource>> {
        match settings.token() {
            Some(token) => {
                // The configured user authenticates even when FOR targets someone else
                let credential = Credential {
                    user: settings.username().unwrap_or_default().to_string(),
                    token: token.to_string(),
                };
                Ok(Arc::new(DirectClient::new(&self.github_api_url, credential)?))
            },
            None => Ok(Arc::new(ProxyClient::new(&self.proxy_url)?)),
        }
    }
}
