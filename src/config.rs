//! Process-level configuration supplied out-of-band through the environment.
//!
//! Every value can also be given on the command line; a flag wins over the
//! environment, and the environment wins over the built-in default.

use crate::github::{Credential, GITHUB_API_URL};
use std::path::PathBuf;

pub const ENV_API_URL: &str = "GHI_API_URL";
pub const ENV_GITHUB_API_URL: &str = "GHI_GITHUB_API_URL";
pub const ENV_SERVICE_USER: &str = "GHI_SERVICE_USER";
pub const ENV_SERVICE_TOKEN: &str = "GHI_SERVICE_TOKEN";
pub const ENV_DOCUMENT: &str = "GHI_DOCUMENT";

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_SERVICE_USER: &str = "github-import";
pub const DEFAULT_DOCUMENT: &str = "outline.json";

/// Resolve a single value: explicit flag, then env var, then default
fn resolve(flag: Option<String>, env_var: &str, default: &str) -> String {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return value;
    }
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Where the import handlers send their requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub proxy_url: String,
    pub github_api_url: String,
}

impl ClientConfig {
    pub fn resolve(proxy_url: Option<String>, github_api_url: Option<String>) -> Self {
        Self {
            proxy_url: resolve(proxy_url, ENV_API_URL, DEFAULT_PROXY_URL),
            github_api_url: resolve(github_api_url, ENV_GITHUB_API_URL, GITHUB_API_URL),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }
}

/// Upstream target and shared credential of the proxy
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub github_api_url: String,
    pub service_user: String,
    pub service_token: String,
}

impl ProxyConfig {
    pub fn resolve(github_api_url: Option<String>) -> Self {
        let service_token = resolve(None, ENV_SERVICE_TOKEN, "");
        if service_token.is_empty() {
            tracing::warn!(
                "{} is not set, upstream requests will be sent with an empty token",
                ENV_SERVICE_TOKEN
            );
        }
        Self {
            github_api_url: resolve(github_api_url, ENV_GITHUB_API_URL, GITHUB_API_URL),
            service_user: resolve(None, ENV_SERVICE_USER, DEFAULT_SERVICE_USER),
            service_token,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(None)
    }

    pub fn credential(&self) -> Credential {
        Credential {
            user: self.service_user.clone(),
            token: self.service_token.clone(),
        }
    }
}

/// Path of the JSON document the CLI operates on
pub fn document_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(resolve(None, ENV_DOCUMENT, DEFAULT_DOCUMENT)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            ENV_API_URL,
            ENV_GITHUB_API_URL,
            ENV_SERVICE_USER,
            ENV_SERVICE_TOKEN,
            ENV_DOCUMENT,
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let client = ClientConfig::from_env();
        assert_eq!(client.proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(client.github_api_url, GITHUB_API_URL);

        let proxy = ProxyConfig::from_env();
        assert_eq!(proxy.service_user, DEFAULT_SERVICE_USER);
        assert_eq!(proxy.service_token, "");
        assert_eq!(document_path(None), PathBuf::from(DEFAULT_DOCUMENT));
    }

    #[test]
    #[serial]
    fn test_env_overrides_default_and_flag_overrides_env() {
        clear_env();
        std::env::set_var(ENV_API_URL, "https://proxy.example.com");
        std::env::set_var(ENV_SERVICE_TOKEN, "ghp_service");

        let client = ClientConfig::resolve(None, None);
        assert_eq!(client.proxy_url, "https://proxy.example.com");

        let client = ClientConfig::resolve(Some("http://localhost:9999".into()), None);
        assert_eq!(client.proxy_url, "http://localhost:9999");

        let credential = ProxyConfig::from_env().credential();
        assert_eq!(credential.user, DEFAULT_SERVICE_USER);
        assert_eq!(credential.token, "ghp_service");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_values_fall_through() {
        clear_env();
        std::env::set_var(ENV_GITHUB_API_URL, "");
        let client = ClientConfig::resolve(None, Some(String::new()));
        assert_eq!(client.github_api_url, GITHUB_API_URL);
        clear_env();
    }
}
