//! Credential-injecting passthrough to the GitHub REST API.
//!
//! Each endpoint validates its query parameters, performs the upstream
//! request(s) with the shared service credential and relays the upstream
//! answer: status and body are passed through untouched.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod upstream;

pub use server::{create_router, AppState, ProxyServer};
