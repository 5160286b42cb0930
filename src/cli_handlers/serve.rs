use crate::config::ProxyConfig;
use crate::error::{ImportError, Result};
use crate::proxy::ProxyServer;

/// Run the proxy in the foreground until Ctrl-C
pub async fn handle_serve(host: String, port: u16, github_api_url: Option<String>) -> Result<()> {
    let config = ProxyConfig::resolve(github_api_url);
    ProxyServer::new(host, port, config)
        .run()
        .await
        .map_err(|e| ImportError::IoError(std::io::Error::other(format!("{:#}", e))))
}
