//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "My Blog".into()
    }

    /// Fallback author identity used when a post carries no author meta tag.
    pub fn author() -> String {
        "Blog Author".into()
    }
}

// ============================================================================
// [index] Section Defaults
// ============================================================================

pub mod index {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "posts".into()
    }

    pub fn artifact() -> PathBuf {
        "blog-index.json".into()
    }

    pub fn words_per_minute() -> u32 {
        200
    }

    pub fn excerpt_max() -> usize {
        200
    }

    pub fn top_tags() -> usize {
        10
    }

    /// Known post slugs used by the loader when no artifact exists.
    /// A hand-maintained list rather than true discovery; override it in
    /// `blogdex.toml` to match the site.
    pub fn known_posts() -> Vec<String> {
        vec![
            "welcome-to-the-blog".into(),
            "customizing-your-theme".into(),
            "writing-your-first-post".into(),
        ]
    }
}
