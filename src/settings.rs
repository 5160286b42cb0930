//! Per-document configuration read by the import handlers.

use crate::error::{ImportError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Keys accepted by the settings area
pub const SETTING_KEYS: &[&str] = &["username", "token"];

/// The `username` / `token` pair a user keeps in the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl DocumentSettings {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|v| !v.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|v| !v.is_empty())
    }

    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        match key {
            "username" => Ok(self.username()),
            "token" => Ok(self.token()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = self.slot(key)?;
        *slot = Some(value.to_string());
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<bool> {
        Ok(self.slot(key)?.take().is_some())
    }

    fn slot(&mut self, key: &str) -> Result<&mut Option<String>> {
        match key {
            "username" => Ok(&mut self.username),
            "token" => Ok(&mut self.token),
            _ => Err(unknown_key(key)),
        }
    }
}

fn unknown_key(key: &str) -> ImportError {
    ImportError::InvalidInput(format!(
        "Unknown setting '{}'. Expected one of: {}",
        key,
        SETTING_KEYS.join(", ")
    ))
}

/// Keys whose values should be masked in output
pub fn is_sensitive_key(key: &str) -> bool {
    key == "token"
}

/// Mask a sensitive value for display: show first 4 chars + ********
pub fn mask_value(value: &str) -> String {
    match value.char_indices().nth(4) {
        Some((cut, _)) => format!("{}...********", &value[..cut]),
        None => "********".to_string(),
    }
}

/// Where handlers read document configuration from.
///
/// Settings are read again on every invocation so edits made between two
/// clicks take effect immediately.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load(&self) -> Result<DocumentSettings>;
}

#[async_trait]
impl SettingsSource for DocumentSettings {
    async fn load(&self) -> Result<DocumentSettings> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_count_as_absent() {
        let settings = DocumentSettings {
            username: Some(String::new()),
            token: Some("ghp_x".into()),
        };
        assert_eq!(settings.username(), None);
        assert_eq!(settings.token(), Some("ghp_x"));
    }

    #[test]
    fn test_set_get_unset() {
        let mut settings = DocumentSettings::default();
        settings.set("username", "octocat").unwrap();
        assert_eq!(settings.get("username").unwrap(), Some("octocat"));
        assert!(settings.unset("username").unwrap());
        assert!(!settings.unset("username").unwrap());
        assert_eq!(settings.get("username").unwrap(), None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut settings = DocumentSettings::default();
        let err = settings.set("password", "x").unwrap_err();
        assert!(matches!(err, ImportError::InvalidInput(_)));
        assert!(settings.get("password").is_err());
    }

    #[test]
    fn test_mask_value() {
        assert_eq!(mask_value("abc"), "********");
        assert_eq!(mask_value("ghp_secret"), "ghp_...********");
        assert!(is_sensitive_key("token"));
        assert!(!is_sensitive_key("username"));
    }
}
