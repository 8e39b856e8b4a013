//! Per-field extraction strategies.
//!
//! Each field is recovered by an ordered list of strategies tried
//! first-match-wins, terminating in a literal default. Extraction is total:
//! no function here can fail, and a document that carries no signal at all
//! produces a record made entirely of defaults.
//!
//! | Field    | Strategies (in order)                                      |
//! |----------|------------------------------------------------------------|
//! | title    | `h1` → `title` → `.post-title` → `.title` → default        |
//! | excerpt  | description meta → first `p` (truncated) → default         |
//! | date     | date meta → `article:published_time` → slug scan → today   |
//! | category | category meta → `.category` / `.post-category` → default   |
//! | tags     | keywords meta → `.tag` / `.post-tag` elements → default    |
//! | author   | author meta → configured identity                          |

use super::doc::Doc;
use crate::utils::{date::Date, text};

pub const DEFAULT_TITLE: &str = "Untitled Post";
pub const DEFAULT_EXCERPT: &str = "No excerpt available.";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_TAG: &str = "Blog";

/// One attempt at producing a field value from the document.
type Strategy = fn(&Doc) -> Option<String>;

/// Run strategies in order; `None` when the document is unparsed or every
/// strategy misses.
fn first_match(doc: Option<&Doc>, strategies: &[Strategy]) -> Option<String> {
    let doc = doc?;
    strategies.iter().find_map(|strategy| strategy(doc))
}

pub fn title(doc: Option<&Doc>) -> String {
    first_match(
        doc,
        &[
            |d| d.first_text("h1"),
            |d| d.first_text("title"),
            |d| d.first_text(".post-title"),
            |d| d.first_text(".title"),
        ],
    )
    .unwrap_or_else(|| DEFAULT_TITLE.to_owned())
}

/// Excerpt, length-capped at `max` characters with a `...` marker.
pub fn excerpt(doc: Option<&Doc>, max: usize) -> String {
    let raw = first_match(
        doc,
        &[|d| d.meta("description"), |d| d.first_text("p")],
    )
    .unwrap_or_else(|| DEFAULT_EXCERPT.to_owned());
    text::truncate_excerpt(&raw, max)
}

/// Publication date as `YYYY-MM-DD`. Meta values with a time component are
/// truncated to the date part; a meta value that fails to parse counts as
/// a miss and the next strategy runs.
pub fn date(doc: Option<&Doc>, slug: &str) -> String {
    let strategies: &[fn(&Doc) -> Option<Date>] = &[
        |d| d.meta("date").and_then(|raw| Date::parse(&raw)),
        |d| {
            d.meta_property("article:published_time")
                .and_then(|raw| Date::parse(&raw))
        },
    ];

    doc.and_then(|d| strategies.iter().find_map(|strategy| strategy(d)))
        .or_else(|| Date::from_slug(slug))
        .unwrap_or_else(Date::today)
        .to_string()
}

pub fn category(doc: Option<&Doc>) -> String {
    first_match(
        doc,
        &[
            |d| d.meta("category"),
            |d| d.first_text(".category").and_then(|t| text::strip_category_label(&t)),
            |d| d.first_text(".post-category").and_then(|t| text::strip_category_label(&t)),
        ],
    )
    .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned())
}

/// Tag list, never empty.
pub fn tags(doc: Option<&Doc>) -> Vec<String> {
    if let Some(doc) = doc {
        if let Some(keywords) = doc.meta("keywords") {
            let split: Vec<String> = keywords
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect();
            if !split.is_empty() {
                return split;
            }
        }
        for selector in [".tag", ".post-tag"] {
            let found = doc.all_text(selector);
            if !found.is_empty() {
                return found;
            }
        }
    }
    vec![DEFAULT_TAG.to_owned()]
}

pub fn author(doc: Option<&Doc>, fallback: &str) -> String {
    first_match(doc, &[|d| d.meta("author")]).unwrap_or_else(|| fallback.to_owned())
}

/// Read time in whole minutes, floored at 1.
pub fn read_minutes(word_count: u32, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1);
    word_count.div_ceil(wpm).max(1)
}
