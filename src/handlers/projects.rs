use super::{CommandHandler, ImportContext, ImportOutcome};
use crate::command::{ButtonConfig, Keyword};
use crate::error::Result;
use crate::outline::page_ref;
use async_trait::async_trait;
use std::sync::Arc;

/// `Import Github Projects [FOR user] [IN repo]`
///
/// The repository name defaults to the title of the page the button is on.
pub struct ProjectsImporter {
    ctx: Arc<ImportContext>,
}

impl ProjectsImporter {
    pub fn new(ctx: Arc<ImportContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler for ProjectsImporter {
    async fn handle(&self, config: ButtonConfig, block_uid: String) -> Result<ImportOutcome> {
        let settings = self.ctx.settings.load().await?;
        let Some(username) = config.keyword(Keyword::For).or(settings.username()) else {
            return self.ctx.missing(&block_uid, "username").await;
        };
        let repo_name = match config.keyword(Keyword::In) {
            Some(name) => Some(name.to_string()),
            None => self.ctx.outline.page_title(&block_uid).await?,
        };
        let Some(repo_name) = repo_name.filter(|name| !name.is_empty()) else {
            return self.ctx.missing(&block_uid, "repository").await;
        };
        let repository = format!("{}/{}", username, repo_name);

        let source = self.ctx.github.select(&settings)?;
        let projects = source.projects(&repository).await?;
        let bullets = projects.iter().map(|p| page_ref(&p.name)).collect();
        self.ctx
            .finish(&block_uid, bullets, &format!("No projects in {}", repository))
            .await
    }
}
