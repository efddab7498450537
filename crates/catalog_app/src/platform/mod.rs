mod app;
mod cli;
mod config;
mod effects;
mod history;
mod logging;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use catalog_engine::{FileCatalogStore, LedgerStore, DOWNLOAD_STORAGE_KEY};
use catalog_logging::{catalog_info, catalog_warn};
use clap::Parser;

use self::app::App;
use self::cli::Cli;
use self::config::AppConfig;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match AppConfig::load(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    cli.apply_overrides(&mut config);

    logging::initialize(config.log_destination, &config.log_file);
    if let Some(err) = config_error {
        catalog_warn!("{}; using defaults", err);
    }
    catalog_info!("Starting catalog with {:?}", config);

    let store = FileCatalogStore::open(&config.catalog_path)
        .with_context(|| format!("opening catalog {:?}", config.catalog_path))?;
    let ledger = LedgerStore::new(&config.data_dir, DOWNLOAD_STORAGE_KEY);

    let mut app = App::new(
        Arc::new(store),
        ledger,
        &config.base_path,
        &cli.url,
        config.content_top,
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    app.run(stdin.lock(), &mut stdout)
        .context("terminal session failed")?;
    Ok(())
}
