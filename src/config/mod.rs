#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::constants::MC_SOLR_STANDALONE_PORT;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mc-solr")]
#[command(about = "Install Solr and start a standalone instance.")]
pub struct CliConfig {
    /// Port.
    #[arg(
        short,
        long,
        default_value_t = MC_SOLR_STANDALONE_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override install.dir from the configuration
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Periodically log CPU and memory usage of the Solr process
    #[arg(long)]
    pub monitor: bool,
}
