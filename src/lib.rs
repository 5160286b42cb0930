pub mod cli;
pub mod cli_handlers;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod github;
pub mod handlers;
pub mod logging;
pub mod outline;
pub mod proxy;
pub mod settings;
