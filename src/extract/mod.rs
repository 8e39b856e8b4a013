//! Post metadata extraction.
//!
//! One HTML document in, one [`PostMeta`] record out. Every field is total:
//! missing or malformed markup degrades per-field to a documented default,
//! never to an absent field or an error. The heavy lifting lives in
//! [`fields`]; this module assembles the record.
//!
//! ```text
//! html ──► Doc::parse ──► fields::{title, excerpt, date, ...} ──► PostMeta
//!             │ (parse failure)
//!             └──────────► all-defaults record (word count 0)
//! ```

pub mod doc;
pub mod fields;

use crate::config::Config;
use self::doc::Doc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Read time in whole minutes (>= 1), carried on the wire as `"<N> min read"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTime(pub u32);

impl ReadTime {
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

impl Serialize for ReadTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReadTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let minutes: u32 = s
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid read time: {s:?}")))?;
        Ok(Self(minutes.max(1)))
    }
}

/// Extracted metadata for one post. Field names serialize camelCase to
/// match the index artifact consumed by the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// `post-<slug>`
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub category: String,
    /// Never empty
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: ReadTime,
    /// Identity key within a collection
    pub slug: String,
    #[serde(default)]
    pub word_count: u32,
}

/// Build one record from raw HTML. Infallible by contract.
pub fn build_post_meta(html: &str, slug: &str, config: &Config) -> PostMeta {
    let doc = Doc::parse(html);
    let doc = doc.as_ref();

    let word_count = doc.map_or(0, Doc::word_count);
    let minutes = fields::read_minutes(word_count, config.index.words_per_minute);

    PostMeta {
        id: format!("post-{slug}"),
        title: fields::title(doc),
        excerpt: fields::excerpt(doc, config.index.excerpt_max),
        date: fields::date(doc, slug),
        category: fields::category(doc),
        tags: fields::tags(doc),
        author: fields::author(doc, &config.base.author),
        read_time: ReadTime(minutes),
        slug: slug.to_owned(),
        word_count,
    }
}
