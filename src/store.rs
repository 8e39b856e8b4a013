//! Document storage.
//!
//! The pipeline never touches the filesystem directly; it goes through
//! [`DocStore`], so indexing and loading can run against a directory, a
//! fixture set in tests, or anything else that can hand out HTML by slug.

use crate::utils::text::slug_from_stem;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extensions treated as posts
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// A source of raw HTML documents keyed by slug.
pub trait DocStore: Sync {
    /// Raw markup for a slug, `Ok(None)` when the document does not exist.
    fn load(&self, slug: &str) -> Result<Option<String>>;

    /// All available slugs, in stable order.
    fn list(&self) -> Result<Vec<String>>;
}

// ============================================================================
// Directory Store
// ============================================================================

/// Store over a directory of `.html`/`.htm` files. Slug = sanitized file
/// stem; nested directories are flattened.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the root and pair each post file with its slug, in sorted order
    /// so every pass sees the same encounter order.
    fn entries(&self) -> Vec<(String, PathBuf)> {
        let mut entries: Vec<(String, PathBuf)> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| is_post_file(e.path()))
            .filter_map(|e| {
                let stem = e.path().file_stem()?.to_str()?;
                Some((slug_from_stem(stem), e.into_path()))
            })
            .collect();
        entries.sort();
        entries
    }
}

impl DocStore for DirStore {
    fn load(&self, slug: &str) -> Result<Option<String>> {
        let Some((_, path)) = self.entries().into_iter().find(|(s, _)| s == slug) else {
            return Ok(None);
        };
        let html = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(html))
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries().into_iter().map(|(slug, _)| slug).collect())
    }
}

/// Post files only: html extension, not hidden, not an editor artifact.
pub(crate) fn is_post_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.starts_with('.') || name.ends_with('~') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

// ============================================================================
// In-memory Store
// ============================================================================

/// Fixed set of documents held in memory. Used by tests and embedders.
#[derive(Default)]
pub struct MemStore {
    docs: Vec<(String, String)>,
}

impl MemStore {
    pub fn new<S, H, I>(docs: I) -> Self
    where
        S: Into<String>,
        H: Into<String>,
        I: IntoIterator<Item = (S, H)>,
    {
        Self {
            docs: docs
                .into_iter()
                .map(|(slug, html)| (slug.into(), html.into()))
                .collect(),
        }
    }
}

impl DocStore for MemStore {
    fn load(&self, slug: &str) -> Result<Option<String>> {
        Ok(self
            .docs
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, html)| html.clone()))
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.docs.iter().map(|(slug, _)| slug.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_store_lists_sorted_slugs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Zeta Post.html"), "<p>z</p>").unwrap();
        fs::write(dir.path().join("alpha.htm"), "<p>a</p>").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        fs::write(dir.path().join(".hidden.html"), "skip me").unwrap();

        let store = DirStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec!["alpha", "zeta-post"]);
    }

    #[test]
    fn test_dir_store_walks_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("2025")).unwrap();
        fs::write(dir.path().join("2025/deep.html"), "<p>d</p>").unwrap();

        let store = DirStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec!["deep"]);
        assert!(store.load("deep").unwrap().is_some());
    }

    #[test]
    fn test_dir_store_load_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());
        assert!(store.load("ghost").unwrap().is_none());
    }

    #[test]
    fn test_mem_store() {
        let store = MemStore::new([("a", "<p>A</p>")]);
        assert_eq!(store.list().unwrap(), vec!["a"]);
        assert_eq!(store.load("a").unwrap().as_deref(), Some("<p>A</p>"));
        assert!(store.load("b").unwrap().is_none());
    }

    #[test]
    fn test_is_post_file() {
        assert!(is_post_file(Path::new("a/b/post.html")));
        assert!(is_post_file(Path::new("post.HTM")));
        assert!(!is_post_file(Path::new("post.html~")));
        assert!(!is_post_file(Path::new(".draft.html")));
        assert!(!is_post_file(Path::new("style.css")));
    }
}
