use super::{CommandHandler, ImportContext, ImportOutcome};
use crate::command::{ButtonConfig, Keyword};
use crate::error::Result;
use crate::outline::page_ref;
use async_trait::async_trait;
use std::sync::Arc;

/// `Import Github Repos [FOR user]`: one page reference per repository
pub struct ReposImporter {
    ctx: Arc<ImportContext>,
}

impl ReposImporter {
    pub fn new(ctx: Arc<ImportContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl CommandHandler for ReposImporter {
    async fn handle(&self, config: ButtonConfig, block_uid: String) -> Result<ImportOutcome> {
        let settings = self.ctx.settings.load().await?;
        let Some(username) = config.keyword(Keyword::For).or(settings.username()) else {
            return self.ctx.missing(&block_uid, "username").await;
        };

        let source = self.ctx.github.select(&settings)?;
        let repositories = source.repositories(username).await?;
        let bullets = repositories.iter().map(|r| page_ref(&r.name)).collect();
        self.ctx
            .finish(
                &block_uid,
                bullets,
                &format!("No repos in {}'s account!", username),
            )
            .await
    }
}
