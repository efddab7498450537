use std::path::PathBuf;

use clap::Parser;

use super::config::{AppConfig, DEFAULT_CONFIG_FILE};
use super::logging::LogDestination;

/// Browse the mod catalog from a terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Catalog JSON file; overrides `catalog_path`.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Ledger directory; overrides `data_dir`.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Query string to start from, e.g. `?tags=UI&view=discover`.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub url: String,

    /// Log destination; overrides `log_destination`.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog_path = catalog.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(log) = self.log {
            config.log_destination = log;
        }
    }
}
