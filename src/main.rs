use clap::Parser;
use github_import::cli::{Cli, Commands};
use github_import::cli_handlers::{
    handle_click, handle_config_command, handle_parse, handle_serve, handle_show, ClickArgs,
};
use github_import::error::Result;
use github_import::logging::{init_logging, proxy_log_file, LoggingConfig};
use std::io::IsTerminal;

#[tokio::main]
async fn main() {
    // Parse CLI arguments first to get logging configuration
    let cli = Cli::parse();

    let mut log_config = LoggingConfig::from_args(cli.quiet, cli.verbose, cli.json);
    if let Commands::Serve { log_file, .. } = &cli.command {
        // Detached proxies (stderr redirected) log to ~/.github-import/logs
        let log_file = proxy_log_file(log_file.clone(), std::io::stderr().is_terminal());
        log_config = LoggingConfig::for_proxy(&log_config, log_file);
    }

    if let Err(e) = init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        github_import::log_error!(e, "command");
        match serde_json::to_string_pretty(&e.to_error_response()) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("{}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            github_api_url,
            log_file: _,
        } => handle_serve(host, port, github_api_url).await?,

        Commands::Parse { label } => handle_parse(&label)?,

        Commands::Click {
            label,
            block,
            document,
            api_url,
            github_api_url,
            format,
        } => {
            handle_click(ClickArgs {
                label,
                block,
                document,
                api_url,
                github_api_url,
                format,
            })
            .await?
        },

        Commands::Show { document } => handle_show(document).await?,

        Commands::Config(config_cmd) => handle_config_command(config_cmd).await?,
    }

    Ok(())
}
