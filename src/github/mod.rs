//! GitHub REST access: typed items, the raw API client and the two routes
//! (direct with a personal token, or through the proxy) behind one trait.

pub mod api;
pub mod client;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{Credential, GitHubApi, GITHUB_API_URL};
pub use client::{Connector, DirectClient, GitHubSource, ProxyClient, SourceSelector};
pub use models::{Card, Column, Issue, Project, Repository};
