//! `[base]` section configuration.
//!
//! Basic site information: title, fallback author, description.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in blogdex.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// author = "Alice"
/// description = "Notes on software and coffee"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Fallback author identity for posts without an author meta tag.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description.
    #[serde(default)]
    pub description: String,
}
