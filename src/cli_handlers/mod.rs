// CLI command handlers
//
// Imports: parse, click, show
// Settings: config
// Proxy: serve

pub mod click;
pub mod config_commands;
pub mod serve;

pub use click::{handle_click, handle_parse, handle_show, ClickArgs};
pub use config_commands::handle_config_command;
pub use serve::handle_serve;
