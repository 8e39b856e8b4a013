//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap. Plain invocation runs one indexing
//! pass and exits; `--watch` keeps re-indexing on change.

use clap::Parser;
use std::path::PathBuf;

/// blogdex static blog indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run one pass, then keep watching the content directory for changes
    #[arg(short, long)]
    pub watch: bool,

    /// Project root (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Content directory with HTML posts (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output path of the index artifact (relative to project root)
    #[arg(short, long)]
    pub artifact: Option<PathBuf>,

    /// Config file name (default: blogdex.toml)
    #[arg(short = 'C', long, default_value = "blogdex.toml")]
    pub config: PathBuf,
}
