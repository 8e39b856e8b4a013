//! `[index]` section configuration.
//!
//! Controls where posts are read from, where the artifact lands, and the
//! extraction/aggregation knobs.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[index]` section in blogdex.toml.
///
/// # Example
/// ```toml
/// [index]
/// content = "posts"
/// artifact = "blog-index.json"
/// words_per_minute = 200
/// top_tags = 10
/// known_posts = ["welcome", "about"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Directory of HTML posts (relative to project root).
    #[serde(default = "defaults::index::content")]
    #[educe(Default = defaults::index::content())]
    pub content: PathBuf,

    /// Output path of the JSON index artifact.
    #[serde(default = "defaults::index::artifact")]
    #[educe(Default = defaults::index::artifact())]
    pub artifact: PathBuf,

    /// Reading speed used for the `"<N> min read"` field.
    #[serde(default = "defaults::index::words_per_minute")]
    #[educe(Default = defaults::index::words_per_minute())]
    pub words_per_minute: u32,

    /// Excerpt length cap in characters (marker excluded).
    #[serde(default = "defaults::index::excerpt_max")]
    #[educe(Default = defaults::index::excerpt_max())]
    pub excerpt_max: usize,

    /// How many tags the artifact keeps, by descending count.
    #[serde(default = "defaults::index::top_tags")]
    #[educe(Default = defaults::index::top_tags())]
    pub top_tags: usize,

    /// Slugs the loader tries when no artifact is available.
    #[serde(default = "defaults::index::known_posts")]
    #[educe(Default = defaults::index::known_posts())]
    pub known_posts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::Config;
    use std::path::PathBuf;

    #[test]
    fn test_index_config_full() {
        let config = r#"
            [index]
            content = "content/posts"
            artifact = "public/index.json"
            words_per_minute = 250
            excerpt_max = 160
            top_tags = 5
            known_posts = ["a", "b"]
        "#;
        let config: Config = toml::from_str(config).unwrap();

        assert_eq!(config.index.content, PathBuf::from("content/posts"));
        assert_eq!(config.index.artifact, PathBuf::from("public/index.json"));
        assert_eq!(config.index.words_per_minute, 250);
        assert_eq!(config.index.excerpt_max, 160);
        assert_eq!(config.index.top_tags, 5);
        assert_eq!(config.index.known_posts, vec!["a", "b"]);
    }

    #[test]
    fn test_index_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.index.content, PathBuf::from("posts"));
        assert_eq!(config.index.words_per_minute, 200);
        assert_eq!(config.index.excerpt_max, 200);
        assert_eq!(config.index.top_tags, 10);
        assert_eq!(config.index.known_posts.len(), 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let config = r#"
            [index]
            contnet = "typo"
        "#;
        assert!(toml::from_str::<Config>(config).is_err());
    }
}
