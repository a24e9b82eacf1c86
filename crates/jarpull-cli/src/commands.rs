//! Subcommand definitions.

use clap::Subcommand;

/// All jarpull subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Verify the configured API key against the panel
    Login,

    /// List the servers the API key can manage
    Servers {
        /// Filter by substring of name or identifier
        #[arg(long)]
        search: Option<String>,
    },

    /// Show the software catalog
    Catalog {
        /// Show offered versions for one software identifier
        software: Option<String>,
    },

    /// Install a software version onto a server
    Install {
        /// Panel server identifier (see `jarpull servers`)
        server: String,
        /// Software identifier (see `jarpull catalog`)
        software: String,
        /// Version to install
        version: String,
    },
}
