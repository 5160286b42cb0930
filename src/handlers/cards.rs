use super::{CommandHandler, ImportContext, ImportOutcome};
use crate::command::{ButtonConfig, Keyword};
use crate::error::Result;
use crate::github::Card;
use async_trait::async_trait;
use std::sync::Arc;

/// Column used when the button has no `AS`
pub const DEFAULT_COLUMN: &str = "To do";

const CONTENT_URL_PREFIX: &str = "https://api.github.com/repos/";

/// `Import Github Cards [FOR user] [IN repo] [UNDER project] [AS column]`
///
/// Without `IN` the repository is the first page that lists the current page
/// as a direct child reference; without `UNDER` the project is the current
/// page's title.
pub struct CardsImporter {
    ctx: Arc<ImportContext>,
}

impl CardsImporter {
    pub fn new(ctx: Arc<ImportContext>) -> Self {
        Self { ctx }
    }

    async fn repository_name(
        &self,
        config: &ButtonConfig,
        page_title: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(name) = config.keyword(Keyword::In) {
            return Ok(Some(name.to_string()));
        }
        let Some(title) = page_title else {
            return Ok(None);
        };
        let parents = self.ctx.outline.referencing_parent_pages(title).await?;
        if parents.len() > 1 {
            tracing::debug!(page = title, candidates = ?parents, "Several pages reference this page, using the first");
        }
        Ok(parents.into_iter().next())
    }
}

/// Note text when present, otherwise the `owner/repo/issues/N` tail of the
/// linked content
pub fn card_bullet(card: &Card) -> String {
    let label = match card.note.as_deref().filter(|note| !note.is_empty()) {
        Some(note) => note,
        None => card
            .content_url
            .as_deref()
            .map(|url| url.strip_prefix(CONTENT_URL_PREFIX).unwrap_or(url))
            .unwrap_or_default(),
    };
    format!("[{}]({})", label, card.html_url.as_deref().unwrap_or_default())
}

#[async_trait]
impl CommandHandler for CardsImporter {
    async fn handle(&self, config: ButtonConfig, block_uid: String) -> Result<ImportOutcome> {
        let settings = self.ctx.settings.load().await?;
        let page_title = self.ctx.outline.page_title(&block_uid).await?;

        let Some(username) = config.keyword(Keyword::For).or(settings.username()) else {
            return self.ctx.missing(&block_uid, "username").await;
        };
        let Some(repo_name) = self.repository_name(&config, page_title.as_deref()).await? else {
            return self.ctx.missing(&block_uid, "repository").await;
        };
        let Some(project) = config.keyword(Keyword::Under).or(page_title.as_deref()) else {
            return self.ctx.missing(&block_uid, "project").await;
        };
        let column = config.keyword(Keyword::As).unwrap_or(DEFAULT_COLUMN);
        let repository = format!("{}/{}", username, repo_name);

        let source = self.ctx.github.select(&settings)?;
        let cards = source.cards(&repository, project, column).await?;
        let bullets = cards.iter().map(card_bullet).collect();
        self.ctx
            .finish(&block_uid, bullets, &format!("No cards in {}", repository))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock::MockGitHub;
    use crate::handlers::test_support::{config, settings, Fixture};

    #[test]
    fn test_card_bullet_prefers_note() {
        let card = Card {
            note: Some("Write release notes".into()),
            content_url: None,
            html_url: Some("https://github.com/octocat/hello/projects/1#card-1".into()),
        };
        assert_eq!(
            card_bullet(&card),
            "[Write release notes](https://github.com/octocat/hello/projects/1#card-1)"
        );
    }

    #[test]
    fn test_card_bullet_falls_back_to_content_path() {
        let card = Card {
            note: None,
            content_url: Some("https://api.github.com/repos/octocat/hello/issues/3".into()),
            html_url: Some("https://github.com/octocat/hello/projects/1#card-2".into()),
        };
        assert_eq!(
            card_bullet(&card),
            "[octocat/hello/issues/3](https://github.com/octocat/hello/projects/1#card-2)"
        );
    }

    #[tokio::test]
    async fn test_defaults_from_outline() {
        let fixture = Fixture::new(
            settings(Some("octocat"), None),
            MockGitHub {
                cards: vec![
                    Card {
                        note: Some("first".into()),
                        content_url: None,
                        html_url: Some("u1".into()),
                    },
                    Card {
                        note: Some("second".into()),
                        content_url: None,
                        html_url: Some("u2".into()),
                    },
                ],
                ..Default::default()
            },
        );
        let importer = CardsImporter::new(fixture.ctx.clone());
        let outcome = importer.handle(config(&[]), "btn".into()).await.unwrap();

        assert_eq!(outcome, ImportOutcome::Imported { count: 2 });
        // repository from the page "github" that references [[roam]],
        // project from the current page title, default column
        assert_eq!(
            fixture.selector.source.calls(),
            vec!["cards octocat/github roam To do"]
        );
        assert_eq!(
            fixture.page_texts().await,
            vec!["before", "[first](u1)", "[second](u2)", "after"]
        );
    }

    #[tokio::test]
    async fn test_keywords_override_defaults() {
        let fixture = Fixture::new(settings(Some("me"), Some("ghp_x")), MockGitHub::default());
        let importer = CardsImporter::new(fixture.ctx.clone());
        let outcome = importer
            .handle(
                config(&[
                    ("FOR", "octocat"),
                    ("IN", "my repo"),
                    ("UNDER", "Sprint1"),
                    ("AS", "In progress"),
                ]),
                "btn".into(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, ImportOutcome::Empty);
        assert_eq!(
            fixture.selector.source.calls(),
            vec!["cards octocat/my repo Sprint1 In progress"]
        );
        assert_eq!(fixture.page_texts().await[1], "No cards in octocat/my repo");
    }

    #[tokio::test]
    async fn test_missing_repository_when_nothing_references_page() {
        let fixture = Fixture::new(settings(Some("octocat"), None), MockGitHub::default());
        fixture
            .ctx
            .outline
            .update_block("g2", "no links here")
            .await
            .unwrap();
        let importer = CardsImporter::new(fixture.ctx.clone());
        let outcome = importer.handle(config(&[]), "btn".into()).await.unwrap();

        assert_eq!(
            outcome,
            ImportOutcome::MissingParameter {
                name: "repository".into()
            }
        );
        assert_eq!(
            fixture.page_texts().await[1],
            "Error: Missing required parameter repository!"
        );
    }
}
