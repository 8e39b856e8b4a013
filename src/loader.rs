//! Runtime post loading with graceful degradation.
//!
//! Three sources, tried in strict order, first success wins:
//!
//! 1. **Indexed** - the persisted artifact, posts used verbatim
//! 2. **Discovered** - per-document extraction over the configured
//!    known-post list
//! 3. **Sample** - literal built-in records
//!
//! The sequence runs once; the returned [`PostSet`] is the session-scoped
//! context the presentation layer holds on to. Nothing here returns an
//! error: every failure is logged and degrades to the next source.

use crate::{
    config::Config,
    extract::{PostMeta, ReadTime, build_post_meta},
    indexer::IndexArtifact,
    log,
    store::DocStore,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Slugs of the built-in sample records, in order.
pub const SAMPLE_SLUGS: [&str; 3] = [
    "welcome-to-the-blog",
    "customizing-your-theme",
    "writing-your-first-post",
];

/// Which source actually produced the posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Indexed,
    Discovered,
    Sample,
}

/// Session-scoped post collection. Load once, pass around; no global state.
#[derive(Debug)]
pub struct PostSet {
    pub source: LoadSource,
    /// Sorted newest-date-first regardless of source
    pub posts: Vec<PostMeta>,
}

/// Obtain the post collection, degrading artifact -> known list -> samples.
pub fn load_posts(store: &dyn DocStore, config: &Config) -> PostSet {
    match read_artifact(&config.index.artifact) {
        Ok(artifact) if !artifact.posts.is_empty() => {
            log!("load"; "{} posts from artifact", artifact.posts.len());
            return PostSet {
                source: LoadSource::Indexed,
                posts: artifact.posts,
            };
        }
        Ok(_) => log!("load"; "artifact is empty, extracting known posts"),
        Err(e) => log!("load"; "artifact unavailable ({e:#}), extracting known posts"),
    }

    let discovered = discover(store, config);
    if !discovered.is_empty() {
        log!("load"; "{} posts from known list", discovered.len());
        return PostSet {
            source: LoadSource::Discovered,
            posts: discovered,
        };
    }

    log!("load"; "no posts loadable, falling back to sample data");
    PostSet {
        source: LoadSource::Sample,
        posts: sample_posts(),
    }
}

/// Read and parse the persisted artifact.
fn read_artifact(path: &Path) -> Result<IndexArtifact> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Extract each configured known post, skipping ones that fail to load.
fn discover(store: &dyn DocStore, config: &Config) -> Vec<PostMeta> {
    let mut posts: Vec<PostMeta> = config
        .index
        .known_posts
        .iter()
        .filter_map(|slug| match store.load(slug) {
            Ok(Some(html)) => Some(build_post_meta(&html, slug, config)),
            Ok(None) => {
                log!("load"; "{slug}: not found, skipped");
                None
            }
            Err(e) => {
                log!("load"; "{slug}: load failed, skipped: {e:#}");
                None
            }
        })
        .collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

/// The terminal fallback: fixed literal records, independent of config.
fn sample_posts() -> Vec<PostMeta> {
    let sample = |slug: &str, title: &str, excerpt: &str, date: &str, tags: &[&str]| PostMeta {
        id: format!("post-{slug}"),
        title: title.to_owned(),
        excerpt: excerpt.to_owned(),
        date: date.to_owned(),
        category: "General".to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        author: "Blog Author".to_owned(),
        read_time: ReadTime(3),
        slug: slug.to_owned(),
        word_count: 0,
    };

    vec![
        sample(
            SAMPLE_SLUGS[0],
            "Welcome to the Blog",
            "A quick tour of what you will find here and how the site is put together.",
            "2025-09-23",
            &["Blog", "Meta"],
        ),
        sample(
            SAMPLE_SLUGS[1],
            "Customizing Your Theme",
            "Colors, fonts and layout tweaks that keep the reading experience clean.",
            "2025-09-20",
            &["Design"],
        ),
        sample(
            SAMPLE_SLUGS[2],
            "Writing Your First Post",
            "From a blank HTML file to a published post with metadata the index understands.",
            "2025-09-18",
            &["Writing", "Blog"],
        ),
    ]
}
