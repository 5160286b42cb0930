use super::models::{Column, Project};
use crate::error::{ImportError, Result};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type that unlocks the classic projects endpoints
pub const PROJECTS_PREVIEW_ACCEPT: &str = "application/vnd.github.inertia-preview+json";

const USER_AGENT: &str = concat!("github-import/", env!("CARGO_PKG_VERSION"));

/// Upstream path as a list of segments, each percent-encoded on its own
pub type PathSegments = Vec<String>;

/// Reject caller input that would not stay a single path segment
fn segment(value: &str, name: &str) -> Result<String> {
    if value.is_empty() || value == "." || value == ".." || value.contains('/') {
        return Err(ImportError::InvalidInput(format!(
            "{} must be a single path segment, got '{}'",
            name, value
        )));
    }
    Ok(value.to_string())
}

/// Split `owner/name` into exactly two segments
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, name)) if !name.contains('/') => {
            Ok((segment(owner, "owner")?, segment(name, "repository name")?))
        },
        _ => Err(ImportError::InvalidInput(format!(
            "repository must be owner/name, got '{}'",
            repository
        ))),
    }
}

pub fn issues_path() -> PathSegments {
    vec!["issues".to_string()]
}

pub fn user_repos_path(username: &str) -> Result<PathSegments> {
    Ok(vec![
        "users".to_string(),
        segment(username, "username")?,
        "repos".to_string(),
    ])
}

pub fn repo_projects_path(repository: &str) -> Result<PathSegments> {
    let (owner, name) = split_repository(repository)?;
    Ok(vec!["repos".to_string(), owner, name, "projects".to_string()])
}

pub fn project_columns_path(project_id: u64) -> PathSegments {
    vec![
        "projects".to_string(),
        project_id.to_string(),
        "columns".to_string(),
    ]
}

pub fn column_cards_path(column_id: u64) -> PathSegments {
    vec![
        "projects".to_string(),
        "columns".to_string(),
        column_id.to_string(),
        "cards".to_string(),
    ]
}

/// Basic-auth pair sent with every request
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: String,
    pub token: String,
}

/// Thin GET-only client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubApi {
    http: reqwest::Client,
    base: Url,
    base_url: String,
    credential: Option<Credential>,
}

impl GitHubApi {
    pub fn new(base_url: &str, credential: Option<Credential>) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            ImportError::InvalidInput(format!("Invalid GitHub API URL '{}': {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ImportError::InvalidInput(format!(
                "GitHub API URL must be hierarchical, e.g. https://api.github.com: '{}'",
                base_url
            )));
        }
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each encoded as one segment
    pub fn url(&self, segments: &[String]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `path` and return the body untouched.
    ///
    /// A non-2xx answer becomes [`ImportError::Upstream`] carrying the
    /// status and body as received.
    pub async fn get_text(&self, path: &[String]) -> Result<String> {
        let url = self.url(path);
        let mut request = self.http.get(url.clone()).header(ACCEPT, PROJECTS_PREVIEW_ACCEPT);
        if let Some(credential) = &self.credential {
            request = request.basic_auth(&credential.user, Some(&credential.token));
        }

        tracing::debug!(url = %url, "GitHub request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "GitHub request failed");
            return Err(ImportError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &[String]) -> Result<T> {
        let body = self.get_text(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Walk repository -> project -> column by name and return the column id
    pub async fn resolve_column(&self, repository: &str, project: &str, column: &str) -> Result<u64> {
        let projects: Vec<Project> = self.get_json(&repo_projects_path(repository)?).await?;
        let project_id = projects
            .iter()
            .find(|p| p.name == project)
            .map(|p| p.id)
            .ok_or_else(|| {
                ImportError::NotFound(format!("project {} not found in {}", project, repository))
            })?;

        let columns: Vec<Column> = self.get_json(&project_columns_path(project_id)).await?;
        columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.id)
            .ok_or_else(|| {
                ImportError::NotFound(format!("column {} not found in project {}", column, project))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> GitHubApi {
        GitHubApi::new("http://127.0.0.1:9000", None).unwrap()
    }

    #[test]
    fn test_paths() {
        let api = api();
        assert_eq!(api.url(&issues_path()).path(), "/issues");
        assert_eq!(
            api.url(&user_repos_path("octocat").unwrap()).path(),
            "/users/octocat/repos"
        );
        assert_eq!(
            api.url(&repo_projects_path("octocat/hello").unwrap()).path(),
            "/repos/octocat/hello/projects"
        );
        assert_eq!(api.url(&project_columns_path(7)).path(), "/projects/7/columns");
        assert_eq!(
            api.url(&column_cards_path(9)).path(),
            "/projects/columns/9/cards"
        );
    }

    #[test]
    fn test_input_stays_inside_its_segment() {
        let url = api().url(&user_repos_path("a?b#c d").unwrap());
        assert_eq!(url.path(), "/users/a%3Fb%23c%20d/repos");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_traversal_is_rejected() {
        for username in ["", ".", "..", "../user", "a/b"] {
            let err = user_repos_path(username).unwrap_err();
            assert_eq!(err.to_error_code(), "INVALID_INPUT", "{}", username);
        }
        for repository in [
            "octocat",
            "octocat/",
            "/hello",
            "../hello",
            "octocat/..",
            "../../user/emails?x=",
            "a/b/c",
        ] {
            assert!(repo_projects_path(repository).is_err(), "{}", repository);
        }
    }

    #[test]
    fn test_base_url_path_prefix_is_kept() {
        let api = GitHubApi::new("http://127.0.0.1:9000/api/v3/", None).unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:9000/api/v3");
        assert_eq!(api.url(&issues_path()).path(), "/api/v3/issues");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(GitHubApi::new("not a url", None).is_err());
    }
}
