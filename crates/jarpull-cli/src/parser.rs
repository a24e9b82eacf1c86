//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for jarpull.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "jarpull")]
#[command(about = "Install server software onto control-panel servers")]
#[command(version)]
pub struct Cli {
    /// Panel base URL (e.g. https://console.example.com)
    #[arg(long = "panel-url", global = true, env = "JARPULL_PANEL_URL")]
    pub panel_url: Option<String>,

    /// Client API key for the panel
    #[arg(
        long = "api-key",
        global = true,
        env = "JARPULL_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "jarpull",
            "--verbose",
            "--panel-url",
            "https://p.example",
            "servers",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.panel_url, Some("https://p.example".to_string()));
    }

    #[test]
    fn test_install_args() {
        let cli = Cli::parse_from(["jarpull", "install", "d3adb33f", "paper", "1.21.8"]);
        match cli.command {
            Commands::Install {
                server,
                software,
                version,
            } => {
                assert_eq!(server, "d3adb33f");
                assert_eq!(software, "paper");
                assert_eq!(version, "1.21.8");
            }
            _ => panic!("expected install subcommand"),
        }
    }
}
