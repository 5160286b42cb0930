//! The import handlers bound to each button verb.
//!
//! Every handler follows the same shape: read the document settings, resolve
//! its parameters from the button and the surrounding outline, issue one
//! listing request and write one bullet per item back into the outline.

pub mod cards;
pub mod issues;
pub mod projects;
pub mod repos;

pub use cards::CardsImporter;
pub use issues::IssuesImporter;
pub use projects::ProjectsImporter;
pub use repos::ReposImporter;

use crate::command::{ButtonConfig, Verb};
use crate::error::Result;
use crate::github::SourceSelector;
use crate::outline::Outline;
use crate::settings::SettingsSource;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// What a handler did with the triggering block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Bullets written; the count includes the reused triggering block
    Imported { count: usize },
    /// The listing came back empty and an informational message was written
    Empty,
    /// A required parameter could not be resolved
    MissingParameter { name: String },
}

/// A handler bound to a verb
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, config: ButtonConfig, block_uid: String) -> Result<ImportOutcome>;
}

/// Collaborators shared by all importers
pub struct ImportContext {
    pub outline: Arc<dyn Outline>,
    pub settings: Arc<dyn SettingsSource>,
    pub github: Arc<dyn SourceSelector>,
}

impl ImportContext {
    pub fn new(
        outline: Arc<dyn Outline>,
        settings: Arc<dyn SettingsSource>,
        github: Arc<dyn SourceSelector>,
    ) -> Self {
        Self {
            outline,
            settings,
            github,
        }
    }

    /// Write the error message for an unresolved parameter into the block
    pub(crate) async fn missing(&self, block_uid: &str, name: &str) -> Result<ImportOutcome> {
        tracing::info!(block_uid, parameter = name, "Missing required parameter");
        self.outline
            .update_block(
                block_uid,
                &format!("Error: Missing required parameter {}!", name),
            )
            .await?;
        Ok(ImportOutcome::MissingParameter {
            name: name.to_string(),
        })
    }

    /// Write `bullets`, or `empty_message` when there are none
    pub(crate) async fn finish(
        &self,
        block_uid: &str,
        bullets: Vec<String>,
        empty_message: &str,
    ) -> Result<ImportOutcome> {
        if bullets.is_empty() {
            self.outline.update_block(block_uid, empty_message).await?;
            return Ok(ImportOutcome::Empty);
        }
        let count = bullets.len();
        push_bullets(self.outline.as_ref(), &bullets, block_uid).await?;
        tracing::info!(block_uid, count, "Imported bullets");
        Ok(ImportOutcome::Imported { count })
    }
}

/// Replace the block with the first bullet and insert the rest as siblings
/// right after it, preserving order.
pub async fn push_bullets(outline: &dyn Outline, bullets: &[String], block_uid: &str) -> Result<()> {
    let Some((first, rest)) = bullets.split_first() else {
        return Ok(());
    };
    outline.update_block(block_uid, first).await?;
    if rest.is_empty() {
        return Ok(());
    }

    let parent_uid = outline.parent_uid(block_uid).await?;
    let order = outline.block_order(block_uid).await?;
    for (i, text) in rest.iter().enumerate() {
        outline.create_block(&parent_uid, order + i + 1, text).await?;
    }
    Ok(())
}

/// The four importers keyed by verb, in registration order
pub fn default_handlers(ctx: Arc<ImportContext>) -> Vec<(Verb, Arc<dyn CommandHandler>)> {
    vec![
        (
            Verb::ImportCards,
            Arc::new(CardsImporter::new(ctx.clone())) as Arc<dyn CommandHandler>,
        ),
        (Verb::ImportIssues, Arc::new(IssuesImporter::new(ctx.clone()))),
        (
            Verb::ImportProjects,
            Arc::new(ProjectsImporter::new(ctx.clone())),
        ),
        (Verb::ImportRepos, Arc::new(ReposImporter::new(ctx))),
    ]
}
