//! Configuration management for `blogdex.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[base]`  | Site metadata (title, fallback author)         |
//! | `[index]` | Content dir, artifact path, extraction knobs   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! author = "Alice"
//!
//! [index]
//! content = "posts"
//! artifact = "blog-index.json"
//! words_per_minute = 200
//! ```

mod base;
pub mod defaults;
mod error;
mod index;

pub use base::BaseConfig;
pub use error::ConfigError;
pub use index::IndexConfig;

use crate::cli::Cli;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing blogdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub index: IndexConfig,

    /// Project root; all relative paths resolve against it.
    #[serde(skip)]
    pub root: PathBuf,

    /// Where this config was loaded from (for the watcher).
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Config {
    /// Load and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_owned(), e))?;
        let mut config: Self = toml::from_str(&raw)?;
        config.config_path = path.to_owned();
        Ok(config)
    }

    /// Apply CLI overrides and resolve paths against the project root.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));

        if let Some(content) = &cli.content {
            self.index.content = content.clone();
        }
        if let Some(artifact) = &cli.artifact {
            self.index.artifact = artifact.clone();
        }

        self.index.content = root.join(&self.index.content);
        self.index.artifact = root.join(&self.index.artifact);
        self.root = root;
    }

    /// Check invariants the rest of the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "words_per_minute must be > 0".into(),
            ));
        }
        if self.index.top_tags == 0 {
            return Err(ConfigError::Validation("top_tags must be > 0".into()));
        }
        if !self.index.content.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content directory not found: {}",
                self.index.content.display()
            )));
        }
        Ok(())
    }
}
