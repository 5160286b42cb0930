//! Routes button clicks to the handler registered for their verb.
//!
//! One subscriber receives every click in the document. Registrations are
//! checked in the order they were made and the first verb that opens the
//! button's text wins. A matched block is blanked before the handler starts,
//! then the handler runs on its own task; the dispatcher never waits for it.

use crate::command::{parse_button_config, Verb};
use crate::error::{ImportError, Result};
use crate::handlers::{default_handlers, CommandHandler, ImportContext, ImportOutcome};
use crate::outline::Outline;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A click on some element of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    /// Tag name of the clicked element, e.g. `BUTTON`
    pub tag: String,
    /// Visible text of the element at click time
    pub text: String,
    /// Block the element belongs to, when the host could resolve one
    pub block_uid: Option<String>,
}

impl Click {
    pub fn button(text: impl Into<String>, block_uid: impl Into<String>) -> Self {
        Self {
            tag: "BUTTON".to_string(),
            text: text.into(),
            block_uid: Some(block_uid.into()),
        }
    }

    pub fn is_button(&self) -> bool {
        self.tag.eq_ignore_ascii_case("button")
    }
}

/// Generic surface for failures of a triggered import
pub trait ErrorReporter: Send + Sync {
    fn report(&self, verb: Verb, block_uid: &str, error: &ImportError);
}

/// Reports failures to the log only
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn report(&self, verb: Verb, block_uid: &str, error: &ImportError) {
        tracing::error!(
            verb = %verb,
            block_uid,
            error = %error,
            code = error.to_error_code(),
            "Import failed"
        );
    }
}

struct Registration {
    verb: Verb,
    handler: Arc<dyn CommandHandler>,
}

pub struct Dispatcher {
    outline: Arc<dyn Outline>,
    registrations: Vec<Registration>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Dispatcher {
    pub fn new(outline: Arc<dyn Outline>) -> Self {
        Self {
            outline,
            registrations: Vec::new(),
            reporter: Arc::new(LogErrorReporter),
        }
    }

    /// Dispatcher with the four GitHub importers registered
    pub fn with_importers(ctx: Arc<ImportContext>) -> Self {
        let mut dispatcher = Self::new(ctx.outline.clone());
        for (verb, handler) in default_handlers(ctx) {
            dispatcher.register(verb, handler);
        }
        dispatcher
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn register(&mut self, verb: Verb, handler: Arc<dyn CommandHandler>) -> &mut Self {
        tracing::debug!(verb = %verb, "Registered button verb");
        self.registrations.push(Registration { verb, handler });
        self
    }

    pub fn verbs(&self) -> Vec<Verb> {
        self.registrations.iter().map(|r| r.verb).collect()
    }

    /// Verb of the first registration matching this click, if any
    pub fn match_verb(&self, click: &Click) -> Option<Verb> {
        self.matching(click).map(|r| r.verb)
    }

    fn matching(&self, click: &Click) -> Option<&Registration> {
        if !click.is_button() {
            return None;
        }
        self.registrations
            .iter()
            .find(|registration| registration.verb.matches(&click.text))
    }

    /// Handle one click.
    ///
    /// Returns the spawned handler task, or `None` when the click is not
    /// ours or the block could not be acknowledged.
    pub async fn dispatch(&self, click: Click) -> Option<JoinHandle<Result<ImportOutcome>>> {
        let registration = self.matching(&click)?;
        let verb = registration.verb;
        let Some(block_uid) = click.block_uid else {
            tracing::warn!(verb = %verb, "Button click without a block, ignoring");
            return None;
        };

        let config = parse_button_config(&click.text, verb.as_str());
        tracing::info!(verb = %verb, block_uid = %block_uid, pairs = config.len(), "Button clicked");

        if let Err(error) = self.outline.update_block(&block_uid, "").await {
            self.reporter.report(verb, &block_uid, &error);
            return None;
        }

        let handler = registration.handler.clone();
        let reporter = self.reporter.clone();
        Some(tokio::spawn(async move {
            let result = handler.handle(config, block_uid.clone()).await;
            match &result {
                Ok(outcome) => {
                    tracing::debug!(verb = %verb, block_uid = %block_uid, ?outcome, "Import finished")
                },
                Err(error) => reporter.report(verb, &block_uid, error),
            }
            result
        }))
    }

    /// Consume clicks until every sender is dropped
    pub async fn run(self: Arc<Self>, mut clicks: mpsc::Receiver<Click>) {
        tracing::info!(verbs = self.registrations.len(), "Dispatcher listening for clicks");
        while let Some(click) = clicks.recv().await {
            // fire-and-forget: the handle is dropped and the task detaches
            let _ = self.dispatch(click).await;
        }
        tracing::debug!("Click channel closed");
    }
}
