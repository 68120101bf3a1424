//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// Landscaper Dashboard - browse component repositories and inspect installation status
#[derive(Parser, Debug, Default)]
#[command(name = "landscaper-dashboard")]
#[command(version)]
#[command(about = "Browse component repositories and inspect Landscaper installation status", long_about = None)]
pub struct Args {
    /// Path to the configuration file (default: ~/.config/landscaper-dashboard/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dashboard server base URL (overrides `server_url`)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Repository context to open at startup (overrides `default_repository_context`)
    #[arg(long)]
    pub context: Option<String>,

    /// Only show installations of this namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Include encompassed sub-installations in the listing (true/false)
    #[arg(long)]
    pub include_subinstallations: Option<bool>,

    /// Serve built-in sample data instead of contacting a server
    #[arg(long)]
    pub demo: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
