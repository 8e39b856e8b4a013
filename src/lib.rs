//! blogdex - metadata indexer for static HTML blogs.
//!
//! The pipeline, leaf-first:
//!
//! - [`extract`] turns one HTML document into one [`extract::PostMeta`]
//!   record through ordered fallback strategies; extraction is total and
//!   never fails.
//! - [`indexer`] runs extraction over a whole [`store::DocStore`] and
//!   persists an [`indexer::IndexArtifact`] (JSON) atomically.
//! - [`loader`] is the runtime consumer: artifact first, then per-document
//!   extraction of a known-post list, then built-in samples.
//!
//! The `blogdex` binary wires these to a directory of posts via
//! `blogdex.toml`; see [`cli`] and [`watch`].

pub mod cli;
pub mod config;
pub mod extract;
pub mod indexer;
pub mod loader;
pub mod logger;
pub mod store;
pub mod utils;
pub mod watch;
