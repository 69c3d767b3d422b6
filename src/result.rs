//! Result types for filtering output.
//!
//! [`FilterResult`] is the pure output of one filtering pass.
//! [`ParseRecord`] is the pipeline record a pass is merged into; only its
//! text, outlinks and the select-copy metadata fields are ever replaced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A link discovered in retained content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlink {
    /// Absolute URL, resolved against the effective base URL.
    pub url: String,

    /// Normalized anchor text (`<a>` content, `alt` for images and areas).
    pub anchor: String,

    /// Lowercase tag of the element the link came from.
    pub tag: String,

    /// `rel` carries a `nofollow` token.
    pub nofollow: bool,
}

/// Meta-tag crawl directives, evaluated upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives {
    /// Text must not be indexed.
    pub no_index: bool,

    /// Links must not be followed.
    pub no_follow: bool,
}

impl Directives {
    /// Neither text nor links may be used; filtering is pointless.
    #[must_use]
    pub fn forbids_all(&self) -> bool {
        self.no_index && self.no_follow
    }
}

/// Output of filtering one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterResult {
    /// Indexable text of the retained content (empty under `no_index`).
    pub text: String,

    /// Outlinks of the retained content in document order (empty under
    /// `no_follow`).
    pub outlinks: Vec<Outlink>,

    /// Select-copy fields. A rule that never matched has no entry.
    pub fields: BTreeMap<String, String>,
}

/// Outcome of parsing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseStatus {
    #[default]
    Success,
    Failed {
        message: String,
    },
}

/// A parsed document as it flows through the crawl pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseRecord {
    /// URL the document was fetched from.
    pub url: String,

    /// Base URL declared for the document (usually the fetch URL after
    /// redirects).
    pub base_url: String,

    pub status: ParseStatus,

    pub title: String,

    /// Indexable text.
    pub text: String,

    pub outlinks: Vec<Outlink>,

    /// Content metadata; select-copy fields are merged in here.
    pub content_meta: BTreeMap<String, String>,

    /// Parser metadata, passed through untouched.
    pub parse_meta: BTreeMap<String, String>,
}

impl ParseRecord {
    /// A fresh, successful record for `url` with `base_url` as its base.
    #[must_use]
    pub fn new(url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Empty failed record carrying `error`. Only the URLs survive.
    #[must_use]
    pub fn failed(&self, error: &Error) -> Self {
        Self {
            url: self.url.clone(),
            base_url: self.base_url.clone(),
            status: ParseStatus::Failed {
                message: error.to_string(),
            },
            ..Self::default()
        }
    }

    /// Replace text and outlinks with `result` and merge its fields into
    /// `content_meta`. Everything else passes through.
    #[must_use]
    pub fn merge(mut self, result: FilterResult) -> Self {
        self.text = result.text;
        self.outlinks = result.outlinks;
        self.content_meta.extend(result.fields);
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}
