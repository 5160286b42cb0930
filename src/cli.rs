use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
github-import - GitHub import buttons for outline documents

A button whose text starts with one of the import verbs pulls a GitHub
listing into the document, one bullet per item, right where it was clicked:

  Import Github Issues                        issues assigned to you
  Import Github Repos FOR octocat             a user's repositories
  Import Github Projects IN hello-world       a repository's projects
  Import Github Cards IN octocat/hello-world UNDER Roadmap AS "In progress"

Documents without a personal token in their settings go through the
proxy (`ghi serve`), which holds a shared service credential.

Environment:
  GHI_API_URL          proxy used by documents without a token
  GHI_GITHUB_API_URL   GitHub REST API base URL
  GHI_SERVICE_USER     proxy service account name
  GHI_SERVICE_TOKEN    proxy service account token
  GHI_DOCUMENT         default document path
"#;

#[derive(Parser, Clone)]
#[command(name = "ghi")]
#[command(about = "Import GitHub issues, repositories, projects and cards into outline documents")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run the GitHub proxy
    ///
    /// Serves /github-issues, /github-repositories, /github-projects and
    /// /github-cards, authenticating upstream with GHI_SERVICE_USER and
    /// GHI_SERVICE_TOKEN.
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// GitHub API base URL (overrides GHI_GITHUB_API_URL)
        #[arg(long)]
        github_api_url: Option<String>,

        /// Write logs to this file instead of stderr
        /// (default when stderr is not a terminal: ~/.github-import/logs/proxy.log)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Show how a button label is understood
    ///
    /// Examples:
    ///   ghi parse 'Import Github Cards IN octocat/hello UNDER Roadmap'
    Parse {
        /// Button text
        label: String,
    },

    /// Click a button block in a document
    ///
    /// The block is replaced by the imported bullets and the document is
    /// saved back in place.
    ///
    /// Examples:
    ///   ghi click 'Import Github Repos FOR octocat' --block b42
    Click {
        /// Button text
        label: String,

        /// UID of the block holding the button
        #[arg(long)]
        block: String,

        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Proxy base URL (overrides GHI_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// GitHub API base URL (overrides GHI_GITHUB_API_URL)
        #[arg(long)]
        github_api_url: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a document as an indented outline
    Show {
        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Manage document settings (username, token)
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Set a setting
    ///
    /// Examples:
    ///   ghi config set username octocat
    ///   ghi config set token ghp_your_token
    Set {
        /// Setting key (username or token)
        key: String,

        /// Setting value
        value: String,

        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Get a setting
    ///
    /// The token is masked.
    Get {
        /// Setting key
        key: String,

        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List all settings
    List {
        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Remove a setting
    Unset {
        /// Setting key
        key: String,

        /// Document path (overrides GHI_DOCUMENT)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
