//! Parsed-document handle.
//!
//! `Doc` wraps a `tl` DOM over borrowed HTML and exposes the handful of
//! queries the field extractors need: meta-tag content, first/all element
//! text by selector, and the document's plain text for word counting.
//!
//! Lookups return `Option` and never fail; a miss means the caller tries
//! its next strategy.

use crate::utils::text;

/// Queryable handle over one parsed HTML document.
pub struct Doc<'a> {
    dom: tl::VDom<'a>,
}

impl<'a> Doc<'a> {
    /// Parse raw HTML. Returns `None` when the parser rejects the input;
    /// extraction then runs on defaults alone.
    pub fn parse(html: &'a str) -> Option<Self> {
        tl::parse(html, tl::ParserOptions::default())
            .ok()
            .map(|dom| Self { dom })
    }

    /// Content of `<meta name="..." content="...">`.
    pub fn meta(&self, name: &str) -> Option<String> {
        self.meta_attr("name", name)
    }

    /// Content of `<meta property="..." content="...">`.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.meta_attr("property", property)
    }

    fn meta_attr(&self, key: &str, value: &str) -> Option<String> {
        self.dom.nodes().iter().find_map(|node| {
            let tag = node.as_tag()?;
            if !tag.name().as_utf8_str().eq_ignore_ascii_case("meta") {
                return None;
            }

            let mut name_matches = false;
            let mut content = None;
            for (k, v) in tag.attributes().iter() {
                let k: &str = k.as_ref();
                if k == key && v.as_deref() == Some(value) {
                    name_matches = true;
                } else if k == "content" {
                    content = v;
                }
            }

            if name_matches {
                content.and_then(|c| non_empty(&c))
            } else {
                None
            }
        })
    }

    /// Normalized text of the first element matching `selector` (tag name
    /// or `.class`) that has any text at all.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let parser = self.dom.parser();
        self.dom
            .query_selector(selector)?
            .find_map(|handle| non_empty(&handle.get(parser)?.inner_text(parser)))
    }

    /// Normalized text of every element matching `selector`, in document
    /// order, empty ones dropped.
    pub fn all_text(&self, selector: &str) -> Vec<String> {
        let parser = self.dom.parser();
        match self.dom.query_selector(selector) {
            Some(iter) => iter
                .filter_map(|handle| non_empty(&handle.get(parser)?.inner_text(parser)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Plain text of the document: the `<body>` subtree when present,
    /// otherwise everything.
    pub fn body_text(&self) -> String {
        let parser = self.dom.parser();
        if let Some(mut body) = self.dom.query_selector("body")
            && let Some(text) = body
                .find_map(|handle| Some(handle.get(parser)?.inner_text(parser).into_owned()))
        {
            return text;
        }

        self.dom
            .children()
            .iter()
            .filter_map(|handle| Some(handle.get(parser)?.inner_text(parser)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whitespace-delimited token count of [`Self::body_text`].
    pub fn word_count(&self) -> u32 {
        text::word_count(&self.body_text())
    }
}

/// Trim and collapse inner whitespace; `None` when nothing is left.
fn non_empty(text: &str) -> Option<String> {
    let mut words = text.split_whitespace();
    let first = words.next()?;
    let mut out = first.to_owned();
    for word in words {
        out.push(' ');
        out.push_str(word);
    }
    Some(out)
}
