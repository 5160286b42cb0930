use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("GitHub responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ImportError {
    pub fn to_error_code(&self) -> &'static str {
        match self {
            ImportError::Upstream { .. } => "UPSTREAM_ERROR",
            ImportError::Http(_) => "HTTP_ERROR",
            ImportError::BlockNotFound(_) => "BLOCK_NOT_FOUND",
            ImportError::NotFound(_) => "NOT_FOUND",
            ImportError::InvalidInput(_) => "INVALID_INPUT",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
