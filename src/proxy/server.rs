use crate::config::ProxyConfig;
use crate::github::GitHubApi;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Proxy state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// GitHub client carrying the shared service credential
    pub upstream: GitHubApi,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> crate::error::Result<Self> {
        Ok(Self {
            upstream: GitHubApi::new(&config.github_api_url, Some(config.credential()))?,
            started_at: Utc::now(),
        })
    }
}

/// Proxy server instance
pub struct ProxyServer {
    host: String,
    port: u16,
    config: ProxyConfig,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    upstream: String,
    started_at: String,
}

impl ProxyServer {
    pub fn new(host: impl Into<String>, port: u16, config: ProxyConfig) -> Self {
        Self {
            host: host.into(),
            port,
            config,
        }
    }

    /// Bind and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        tracing::info!("Proxy listening on {}", addr);
        tracing::info!("Upstream: {}", self.config.github_api_url);

        serve(listener, &self.config, shutdown_signal()).await
    }
}

/// Serve the proxy on an already bound listener
pub async fn serve<F>(listener: TcpListener, config: &ProxyConfig, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(config).context("Failed to build upstream client")?;
    let app = create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    use super::routes;

    Router::new()
        .route("/health", get(health_handler))
        .merge(routes::proxy_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "github-import-proxy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: state.upstream.base_url().to_string(),
        started_at: state.started_at.to_rfc3339(),
    })
}

/// 404 Not Found handler
async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "code": "NOT_FOUND"
        })),
    )
}
