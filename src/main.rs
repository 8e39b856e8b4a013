//! blogdex - metadata indexer for static HTML blogs.

use anyhow::Result;
use blogdex::{cli::Cli, config::Config, indexer, store::DirStore, watch};
use clap::Parser;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static Config = Box::leak(Box::new(load_config(cli)?));

    let store = DirStore::new(&config.index.content);
    indexer::run_pass(&store, config)?;

    if cli.watch {
        watch::watch_for_changes_blocking(config)?;
    }

    Ok(())
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<Config> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        Config::from_path(&config_path)?
    } else {
        Config::default()
    };
    config.config_path = config_path;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
