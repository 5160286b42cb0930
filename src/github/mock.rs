//! In-memory [`GitHubSource`] for unit tests.

use super::client::{GitHubSource, SourceSelector};
use super::models::{Card, Issue, Project, Repository};
use crate::error::{ImportError, Result};
use crate::settings::DocumentSettings;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockGitHub {
    pub issues: Vec<Issue>,
    pub repositories: Vec<Repository>,
    pub projects: Vec<Project>,
    pub cards: Vec<Card>,
    /// When set, every call fails with this upstream status
    pub fail_with: Option<u16>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl MockGitHub {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(status) => Err(ImportError::Upstream {
                status,
                body: r#"{"message":"mock failure"}"#.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHubSource for MockGitHub {
    async fn issues(&self, username: &str) -> Result<Vec<Issue>> {
        self.record(format!("issues {}", username))?;
        Ok(self.issues.clone())
    }

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.record(format!("repositories {}", username))?;
        Ok(self.repositories.clone())
    }

    async fn projects(&self, repository: &str) -> Result<Vec<Project>> {
        self.record(format!("projects {}", repository))?;
        Ok(self.projects.clone())
    }

    async fn cards(&self, repository: &str, project: &str, column: &str) -> Result<Vec<Card>> {
        self.record(format!("cards {} {} {}", repository, project, column))?;
        Ok(self.cards.clone())
    }
}

/// Hands out the same mock regardless of settings, remembering what it saw
pub struct MockSelector {
    pub source: Arc<MockGitHub>,
    pub seen: Mutex<Vec<DocumentSettings>>,
}

impl MockSelector {
    pub fn new(source: MockGitHub) -> Self {
        Self {
            source: Arc::new(source),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl SourceSelector for MockSelector {
    fn select(&self, settings: &DocumentSettings) -> Result<Arc<dyn GitHubSource>> {
        self.seen.lock().unwrap().push(settings.clone());
        Ok(self.source.clone())
    }
}
