use super::{CommandHandler, ImportContext, ImportOutcome};
use crate::command::ButtonConfig;
use crate::error::Result;
use crate::github::Issue;
use async_trait::async_trait;
use std::sync::Arc;

/// `Import Github Issues`: issues assigned to the configured user
pub struct IssuesImporter {
    ctx: Arc<ImportContext>,
}

impl IssuesImporter {
    pub fn new(ctx: Arc<ImportContext>) -> Self {
        Self { ctx }
    }
}

pub fn issue_bullet(issue: &Issue) -> String {
    format!("[{}]({})", issue.title, issue.html_url)
}

#[async_trait]
impl CommandHandler for IssuesImporter {
    async fn handle(&self, _config: ButtonConfig, block_uid: String) -> Result<ImportOutcome> {
        let settings = self.ctx.settings.load().await?;
        let Some(username) = settings.username() else {
            return self.ctx.missing(&block_uid, "username").await;
        };

        let source = self.ctx.github.select(&settings)?;
        let issues = source.issues(username).await?;
        let bullets = issues.iter().map(issue_bullet).collect();
        self.ctx
            .finish(&block_uid, bullets, "No issues assigned to you!")
            .await
    }
}
