//! Plain-text helpers shared by extraction and indexing.

use deunicode::deunicode;

/// Whitespace-delimited token count. This is the single definition of
/// "word count" used for both `wordCount` and read-time.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Cap text at `max` characters, appending `...` when it was longer.
///
/// Counts characters, not bytes, so multibyte text never splits mid-char.
/// Operates on already-extracted plain text only.
pub fn truncate_excerpt(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Strip any leading icon/label text before the last whitespace run.
///
/// `"📁 Tech"` → `"Tech"`. Intentionally literal: multi-word categories
/// coming from element text get clipped to their last word, which matches
/// the documented convention (meta tags are the route for those).
pub fn strip_category_label(text: &str) -> Option<String> {
    text.split_whitespace().last().map(str::to_owned)
}

/// Derive a slug from a file stem: ascii-fold, lowercase, collapse anything
/// that is not alphanumeric into single hyphens.
pub fn slug_from_stem(stem: &str) -> String {
    let folded = deunicode(stem).to_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut prev_hyphen = true;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one two  three\nfour"), 4);
    }

    #[test]
    fn test_truncate_excerpt_short_text_untouched() {
        assert_eq!(truncate_excerpt("short text", 200), "short text");
    }

    #[test]
    fn test_truncate_excerpt_exact_lengths() {
        let long = "a".repeat(250);
        let out = truncate_excerpt(&long, 200);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));

        // Exactly at the cap: no marker
        let exact = "b".repeat(200);
        assert_eq!(truncate_excerpt(&exact, 200), exact);
    }

    #[test]
    fn test_truncate_excerpt_multibyte() {
        let long = "é".repeat(210);
        let out = truncate_excerpt(&long, 200);
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn test_strip_category_label() {
        assert_eq!(strip_category_label("📁 Tech"), Some("Tech".to_owned()));
        assert_eq!(strip_category_label("Tech"), Some("Tech".to_owned()));
        assert_eq!(strip_category_label("  "), None);
    }

    #[test]
    fn test_slug_from_stem() {
        assert_eq!(slug_from_stem("Hello World"), "hello-world");
        assert_eq!(slug_from_stem("2025-09-20_post"), "2025-09-20-post");
        assert_eq!(slug_from_stem("Caffè Über"), "caffe-uber");
        assert_eq!(slug_from_stem("--weird--"), "weird");
    }
}
