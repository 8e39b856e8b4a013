//! Collection indexing.
//!
//! One pass over a document store produces one [`IndexArtifact`]: every
//! post's metadata, category/tag tallies, and corpus statistics, persisted
//! as pretty JSON. The artifact is rebuilt wholesale on every pass; there is
//! no incremental update.
//!
//! ```text
//! store.list() ──► par build_post_meta ──► sort by date desc
//!                                             │
//!                         ┌───────────────────┼──────────────┐
//!                         ▼                   ▼              ▼
//!                     categories           top-N tags      stats
//!                         └───────────► IndexArtifact ◄─────┘
//!                                            │
//!                              write tmp + rename (atomic)
//! ```

use crate::{
    config::Config,
    extract::{PostMeta, build_post_meta},
    log,
    store::DocStore,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Aggregate snapshot of the whole post collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexArtifact {
    /// RFC 3339 generation timestamp. The only field that differs between
    /// passes over an unchanged collection.
    pub generated: String,
    pub total_posts: usize,
    /// Sorted newest-date-first
    pub posts: Vec<PostMeta>,
    pub categories: Vec<CategoryEntry>,
    /// Top-N by count
    pub tags: Vec<TagEntry>,
    pub stats: IndexStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub count: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_words: u64,
    /// Integer-rounded mean over all posts; absent for an empty collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_read_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_post: Option<String>,
}

// ============================================================================
// Index Pass
// ============================================================================

/// Build the artifact for everything in `store`.
///
/// Documents extract in parallel (they are independent and read-only);
/// aggregation runs after the join. A document that fails to load is
/// logged and skipped, never fatal for the batch.
pub fn build_index(store: &dyn DocStore, config: &Config) -> Result<IndexArtifact> {
    let slugs = store.list().context("listing documents")?;

    let mut posts: Vec<PostMeta> = slugs
        .par_iter()
        .filter_map(|slug| match store.load(slug) {
            Ok(Some(html)) => Some(build_post_meta(&html, slug, config)),
            Ok(None) => {
                log!("index"; "{slug}: not found, skipped");
                None
            }
            Err(e) => {
                log!("index"; "{slug}: load failed, skipped: {e:#}");
                None
            }
        })
        .collect();

    // Stable: equal dates keep encounter order
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let categories = tally(posts.iter().map(|p| p.category.as_str()))
        .into_iter()
        .map(|(name, count)| {
            let description = format!("Posts in the {name} category");
            CategoryEntry { name, count, description }
        })
        .collect();

    let mut tags: Vec<TagEntry> = tally(posts.iter().flat_map(|p| p.tags.iter().map(String::as_str)))
        .into_iter()
        .map(|(name, count)| TagEntry { name, count })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count)); // stable: ties keep first-seen order
    tags.truncate(config.index.top_tags);

    let stats = compute_stats(&posts);

    Ok(IndexArtifact {
        generated: chrono::Utc::now().to_rfc3339(),
        total_posts: posts.len(),
        posts,
        categories,
        tags,
        stats,
    })
}

/// Count values grouped by exact string equality, first-seen order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(name, _)| name == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_owned(), 1)),
        }
    }
    counts
}

fn compute_stats(posts: &[PostMeta]) -> IndexStats {
    let total_words = posts.iter().map(|p| u64::from(p.word_count)).sum();

    let average_read_time = if posts.is_empty() {
        None
    } else {
        let sum: u64 = posts.iter().map(|p| u64::from(p.read_time.minutes())).sum();
        let n = posts.len() as u64;
        Some(((sum + n / 2) / n) as u32)
    };

    IndexStats {
        total_words,
        average_read_time,
        latest_post: posts.first().map(|p| p.date.clone()),
        oldest_post: posts.last().map(|p| p.date.clone()),
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Write the artifact to `path` via a sibling temp file and rename, so a
/// concurrent reader never sees a partial artifact.
pub fn write_artifact(artifact: &IndexArtifact, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(artifact).context("serializing artifact")?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.json".to_owned());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming to {}", path.display()))?;
    Ok(())
}

/// One full indexing pass: build, persist, log the summary.
pub fn run_pass(store: &dyn DocStore, config: &Config) -> Result<()> {
    let artifact = build_index(store, config)?;
    write_artifact(&artifact, &config.index.artifact)?;
    log!(
        "index";
        "{} posts, {} categories, {} tags -> {}",
        artifact.total_posts,
        artifact.categories.len(),
        artifact.tags.len(),
        config.index.artifact.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn post(date: &str, tags: &[&str]) -> String {
        let tags = tags.join(", ");
        format!(
            "<meta name='date' content='{date}'>\
             <meta name='keywords' content='{tags}'>\
             <h1>Post</h1><p>some words here</p>"
        )
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let store = MemStore::new([
            ("a", post("2025-09-20", &["X", "Y"])),
            ("b", post("2025-09-23", &["X"])),
            ("c", post("2025-09-18", &["X"])),
        ]);
        let artifact = build_index(&store, &Config::default()).unwrap();

        let dates: Vec<&str> = artifact.posts.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-09-23", "2025-09-20", "2025-09-18"]);
        assert_eq!(artifact.total_posts, 3);
    }

    #[test]
    fn test_tag_aggregation_and_top_n() {
        let store = MemStore::new([
            ("a", post("2025-01-01", &["X", "Y"])),
            ("b", post("2025-01-02", &["X"])),
        ]);

        let mut config = Config::default();
        let artifact = build_index(&store, &config).unwrap();
        let counts: Vec<(&str, u32)> = artifact
            .tags
            .iter()
            .map(|t| (t.name.as_str(), t.count))
            .collect();
        assert_eq!(counts, vec![("X", 2), ("Y", 1)]);

        config.index.top_tags = 1;
        let artifact = build_index(&store, &config).unwrap();
        assert_eq!(artifact.tags.len(), 1);
        assert_eq!(artifact.tags[0].name, "X");
        assert_eq!(artifact.tags[0].count, 2);
    }

    #[test]
    fn test_category_counts_case_sensitive() {
        let store = MemStore::new([
            ("a", "<meta name='category' content='Tech'><meta name='date' content='2025-01-01'>".to_owned()),
            ("b", "<meta name='category' content='tech'><meta name='date' content='2025-01-02'>".to_owned()),
            ("c", "<meta name='category' content='Tech'><meta name='date' content='2025-01-03'>".to_owned()),
        ]);
        let artifact = build_index(&store, &Config::default()).unwrap();

        let tech = artifact.categories.iter().find(|c| c.name == "Tech").unwrap();
        let lower = artifact.categories.iter().find(|c| c.name == "tech").unwrap();
        assert_eq!(tech.count, 2);
        assert_eq!(lower.count, 1);
        assert!(tech.description.contains("Tech"));
    }

    #[test]
    fn test_empty_collection_stats_omitted() {
        let store = MemStore::new(Vec::<(String, String)>::new());
        let artifact = build_index(&store, &Config::default()).unwrap();

        assert_eq!(artifact.total_posts, 0);
        assert_eq!(artifact.stats.total_words, 0);
        assert_eq!(artifact.stats.average_read_time, None);
        assert_eq!(artifact.stats.latest_post, None);
        assert_eq!(artifact.stats.oldest_post, None);

        let json = serde_json::to_value(&artifact).unwrap();
        assert!(json["stats"].get("averageReadTime").is_none());
    }

    #[test]
    fn test_stats_from_sorted_ends() {
        let store = MemStore::new([
            ("a", post("2025-09-20", &["t"])),
            ("b", post("2025-09-23", &["t"])),
        ]);
        let artifact = build_index(&store, &Config::default()).unwrap();

        assert_eq!(artifact.stats.latest_post.as_deref(), Some("2025-09-23"));
        assert_eq!(artifact.stats.oldest_post.as_deref(), Some("2025-09-20"));
        assert!(artifact.stats.total_words > 0);
        assert_eq!(artifact.stats.average_read_time, Some(1));
    }

    #[test]
    fn test_idempotent_modulo_generated() {
        let store = MemStore::new([
            ("a", post("2025-09-20", &["X"])),
            ("b", post("2025-09-23", &["Y"])),
        ]);
        let config = Config::default();

        let mut first = serde_json::to_value(build_index(&store, &config).unwrap()).unwrap();
        let mut second = serde_json::to_value(build_index(&store, &config).unwrap()).unwrap();
        first.as_object_mut().unwrap().remove("generated");
        second.as_object_mut().unwrap().remove("generated");
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_artifact_atomic_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/blog-index.json");

        let store = MemStore::new([("a", post("2025-09-20", &["X"]))]);
        let artifact = build_index(&store, &Config::default()).unwrap();
        write_artifact(&artifact, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let back: IndexArtifact = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.total_posts, 1);

        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_full_pass_over_directory() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        fs::write(
            posts.join("first-post.html"),
            "<meta name='date' content='2025-09-18'>\
             <meta name='keywords' content='rust'>\
             <h1>First</h1><p>hello world</p>",
        )
        .unwrap();
        fs::write(
            posts.join("second-post.html"),
            "<meta name='date' content='2025-09-23'>\
             <h1>Second</h1><p>more text</p>",
        )
        .unwrap();

        let mut config = Config::default();
        config.index.content = posts.clone();
        config.index.artifact = dir.path().join("blog-index.json");

        let store = crate::store::DirStore::new(&posts);
        run_pass(&store, &config).unwrap();

        let raw = fs::read_to_string(&config.index.artifact).unwrap();
        let artifact: IndexArtifact = serde_json::from_str(&raw).unwrap();
        assert_eq!(artifact.total_posts, 2);
        assert_eq!(artifact.posts[0].slug, "second-post");
        assert_eq!(artifact.posts[1].slug, "first-post");

        // The loader now prefers the artifact
        let set = crate::loader::load_posts(&store, &config);
        assert_eq!(set.source, crate::loader::LoadSource::Indexed);
        assert_eq!(set.posts.len(), 2);
    }

    #[test]
    fn test_tally_first_seen_order() {
        let counts = tally(["b", "a", "b", "c", "a", "b"].into_iter());
        assert_eq!(
            counts,
            vec![("b".to_owned(), 3), ("a".to_owned(), 2), ("c".to_owned(), 1)]
        );
    }
}
