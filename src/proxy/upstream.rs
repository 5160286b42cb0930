//! Translation of upstream results into proxy responses.

use crate::error::{ImportError, Result};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// 400 with a plain-text explanation
pub fn user_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, TEXT)],
        message.to_string(),
    )
        .into_response()
}

/// Relay an upstream body, or the upstream failure, verbatim
pub fn relay(result: Result<String>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, JSON)], body).into_response(),
        Err(ImportError::Upstream { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
                JSON
            } else {
                TEXT
            };
            (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
        },
        Err(ImportError::InvalidInput(message)) => user_error(&message),
        Err(ImportError::NotFound(message)) => {
            (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, TEXT)], message).into_response()
        },
        Err(e) => {
            tracing::error!("Upstream request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, TEXT)],
                e.to_string(),
            )
                .into_response()
        },
    }
}
