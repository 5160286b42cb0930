//! `ghi parse`, `ghi click` and `ghi show`.

use crate::command::ButtonCommand;
use crate::config::{document_path, ClientConfig};
use crate::dispatch::{Click, Dispatcher};
use crate::error::{ImportError, Result};
use crate::github::Connector;
use crate::handlers::{ImportContext, ImportOutcome};
use crate::outline::{MemoryOutline, Outline};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

pub fn handle_parse(label: &str) -> Result<()> {
    let command = ButtonCommand::parse(label)
        .ok_or_else(|| ImportError::InvalidInput(format!("Not an import button: '{}'", label)))?;
    println!("{}", serde_json::to_string_pretty(&command)?);
    Ok(())
}

pub struct ClickArgs {
    pub label: String,
    pub block: String,
    pub document: Option<PathBuf>,
    pub api_url: Option<String>,
    pub github_api_url: Option<String>,
    pub format: String,
}

/// Dispatch one click against a document file and save the result
pub async fn handle_click(args: ClickArgs) -> Result<()> {
    let path = document_path(args.document);
    let outline = Arc::new(MemoryOutline::open(&path).await?);
    // Surfaces BlockNotFound before anything is written
    outline.block_text(&args.block).await?;

    let client = ClientConfig::resolve(args.api_url, args.github_api_url);
    let connector = Arc::new(Connector::new(client.github_api_url, client.proxy_url));
    let ctx = Arc::new(ImportContext::new(
        outline.clone(),
        outline.clone(),
        connector,
    ));
    let dispatcher = Dispatcher::with_importers(ctx);

    let click = Click::button(args.label.as_str(), args.block.as_str());
    let verb = dispatcher.match_verb(&click).ok_or_else(|| {
        ImportError::InvalidInput(format!("Not an import button: '{}'", args.label))
    })?;
    let handle = dispatcher
        .dispatch(click)
        .await
        .ok_or_else(|| ImportError::BlockNotFound(args.block.clone()))?;

    let result = handle
        .await
        .map_err(|e| ImportError::IoError(std::io::Error::other(e)))?;
    // The cleared block is part of the document state even when the import failed
    outline.save(&path).await?;
    let outcome = result?;

    if args.format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "verb": verb,
                "block": args.block,
                "result": outcome,
            }))?
        );
        return Ok(());
    }

    match outcome {
        ImportOutcome::Imported { count } => {
            println!("{}: imported {} item(s)", verb, count)
        },
        ImportOutcome::Empty | ImportOutcome::MissingParameter { .. } => {
            println!("{}", outline.block_text(&args.block).await?)
        },
    }
    Ok(())
}

pub async fn handle_show(document: Option<PathBuf>) -> Result<()> {
    let path = document_path(document);
    let outline = MemoryOutline::open(&path).await?;
    let document = outline.snapshot().await;
    if document.pages.is_empty() {
        println!("(empty document)");
    } else {
        print!("{}", document.render_outline());
    }
    Ok(())
}
