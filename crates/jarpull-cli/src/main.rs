//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: env
//! loading, tracing, the panel client, and command dispatch.

use anyhow::Result;
use clap::Parser;

use jarpull_cli::{Cli, Commands, handlers};

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Login => {
            let client = handlers::panel_client(cli.panel_url.as_deref(), cli.api_key.as_deref())?;
            handlers::handle_login(client).await
        }
        Commands::Servers { search } => {
            let client = handlers::panel_client(cli.panel_url.as_deref(), cli.api_key.as_deref())?;
            handlers::handle_servers(client, search.as_deref()).await
        }
        Commands::Catalog { software } => handlers::handle_catalog(software.as_deref()),
        Commands::Install {
            server,
            software,
            version,
        } => {
            let client = handlers::panel_client(cli.panel_url.as_deref(), cli.api_key.as_deref())?;
            handlers::handle_install(client, &server, &software, &version).await
        }
    }
}
