use crate::cli::ConfigCommands;
use crate::config::document_path;
use crate::error::Result;
use crate::outline::MemoryOutline;
use crate::settings::{is_sensitive_key, mask_value, SETTING_KEYS};
use serde_json::json;
use std::path::Path;

fn display(key: &str, value: &str) -> String {
    if is_sensitive_key(key) {
        mask_value(value)
    } else {
        value.to_string()
    }
}

/// Handle all `ghi config` subcommands
pub async fn handle_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Set {
            key,
            value,
            document,
            format,
        } => handle_set(&document_path(document), &key, &value, &format).await,
        ConfigCommands::Get {
            key,
            document,
            format,
        } => handle_get(&document_path(document), &key, &format).await,
        ConfigCommands::List { document, format } => {
            handle_list(&document_path(document), &format).await
        },
        ConfigCommands::Unset {
            key,
            document,
            format,
        } => handle_unset(&document_path(document), &key, &format).await,
    }
}

async fn handle_set(path: &Path, key: &str, value: &str, format: &str) -> Result<()> {
    config_set(path, key, value).await?;
    let display_value = display(key, value);

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "key": key,
                "value": display_value,
                "set": true,
            }))?
        );
    } else {
        println!("Set {} = {}", key, display_value);
    }

    Ok(())
}

async fn handle_get(path: &Path, key: &str, format: &str) -> Result<()> {
    let value = config_get(path, key).await?;
    let display_value = value.as_deref().map(|v| display(key, v));

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "key": key,
                "value": display_value,
            }))?
        );
    } else {
        match display_value {
            Some(v) => println!("{} = {}", key, v),
            None => println!("{}: (not set)", key),
        }
    }

    Ok(())
}

async fn handle_list(path: &Path, format: &str) -> Result<()> {
    let entries = config_list(path).await?;

    if format == "json" {
        let items: Vec<serde_json::Value> = entries
            .iter()
            .map(|(k, v)| json!({ "key": k, "value": display(k, v) }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "settings": items }))?
        );
    } else if entries.is_empty() {
        println!("No settings found.");
    } else {
        for (key, value) in &entries {
            println!("{} = {}", key, display(key, value));
        }
    }

    Ok(())
}

async fn handle_unset(path: &Path, key: &str, format: &str) -> Result<()> {
    let deleted = config_delete(path, key).await?;

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "key": key,
                "deleted": deleted,
            }))?
        );
    } else if deleted {
        println!("Unset {}", key);
    } else {
        println!("{}: (not found)", key);
    }

    Ok(())
}

// ============================================================================
// Document operations (the settings section of the document file)
// ============================================================================

pub async fn config_set(path: &Path, key: &str, value: &str) -> Result<()> {
    let outline = MemoryOutline::open(path).await?;
    let mut settings = outline.settings().await;
    settings.set(key, value)?;
    outline.set_settings(settings).await;
    outline.save(path).await?;
    tracing::debug!(key, path = %path.display(), "Setting stored");
    Ok(())
}

pub async fn config_get(path: &Path, key: &str) -> Result<Option<String>> {
    let outline = MemoryOutline::open(path).await?;
    let settings = outline.settings().await;
    Ok(settings.get(key)?.map(String::from))
}

pub async fn config_list(path: &Path) -> Result<Vec<(String, String)>> {
    let outline = MemoryOutline::open(path).await?;
    let settings = outline.settings().await;
    let mut entries = Vec::new();
    for key in SETTING_KEYS {
        if let Some(value) = settings.get(key)? {
            entries.push((key.to_string(), value.to_string()));
        }
    }
    Ok(entries)
}

pub async fn config_delete(path: &Path, key: &str) -> Result<bool> {
    let outline = MemoryOutline::open(path).await?;
    let mut settings = outline.settings().await;
    let deleted = settings.unset(key)?;
    if deleted {
        outline.set_settings(settings).await;
        outline.save(path).await?;
    }
    Ok(deleted)
}
