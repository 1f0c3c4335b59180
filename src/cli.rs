//! CLI definitions for xcrawl.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Configuration file read when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/xcrawl.toml";

/// xcrawl CLI.
#[derive(Parser)]
#[command(name = "xcrawl")]
#[command(about = "XPath web element crawler service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path [default: config/xcrawl.toml, skipped when absent]
    #[arg(short, long, env = "XCRAWL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the crawl server in foreground (default)
    Run {
        /// Server host, overrides server.host
        #[arg(long)]
        host: Option<String>,

        /// First port to try, overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and print the effective settings
    CheckConfig,
}
