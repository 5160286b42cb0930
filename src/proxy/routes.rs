use axum::{routing::get, Router};

use super::handlers;
use super::server::AppState;

/// One route per upstream listing
pub fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route("/github-issues", get(handlers::issues))
        .route("/github-repositories", get(handlers::repositories))
        .route("/github-projects", get(handlers::projects))
        .route("/github-cards", get(handlers::cards))
}

