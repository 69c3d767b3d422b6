//! # html-node-filter
//!
//! Post-parse filtering for crawled HTML documents.
//!
//! Given an already-parsed document tree, the filters remove or retain
//! element subtrees by tag/attribute/value rules, re-derive the indexable
//! text and the followable outlinks from what is retained, and copy the text
//! of selected elements into named metadata fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use html_node_filter::{filter_html, Options};
//!
//! let html = r#"<html><body>
//!     <div id="nav"><a href="/home">Home</a></div>
//!     <h1 id="title">Big Headline</h1>
//!     <p>Story with a <a href="next.html">link</a>.</p>
//! </body></html>"#;
//!
//! let options = Options {
//!     exclude_mode: Some("blacklist".to_string()),
//!     exclude_list: Some("div;id;nav".to_string()),
//!     select_copy: Some("h1;id;title".to_string()),
//!     ..Options::default()
//! };
//!
//! let result = filter_html(html, "http://example.com/news/", &options)?;
//! assert_eq!(result.text, "Big Headline Story with a link .");
//! assert_eq!(result.outlinks[0].url, "http://example.com/news/next.html");
//! assert_eq!(result.fields["h1_id_title"], "Big Headline");
//! # Ok::<(), html_node_filter::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Blacklist / whitelist**: strip or keep subtrees matching exact
//!   `tag;attribute;value` rules
//! - **Select-copy**: copy the text of matched elements into
//!   `tag_attribute_value` fields
//! - **Index filter**: CSS-like `tag`, `tag#id`, `tag.class` lists feeding a
//!   `strippedContent` field
//! - **Outlinks**: links of the retained content, resolved against the
//!   document base or an in-document `<base href>`

mod error;
mod options;
mod patterns;
mod result;

/// Owned document tree.
pub mod node;

/// HTML to [`Node`] bridge over `dom_query`.
pub mod dom;

/// Rule compilation from configuration strings.
pub mod rules;

/// Rule and selector matching against nodes.
pub mod matcher;

/// Blacklist stripping and whitelist copying.
pub mod filter;

/// Normalized text extraction.
pub mod text;

/// Outlink extraction and base URL handling.
pub mod outlinks;

/// Select-copy field extraction.
pub mod select;

/// Combined select-copy and exclude pipeline.
pub mod engine;

/// Selector-keyed `strippedContent` filter.
pub mod index_filter;

// Public API - re-exports
pub use engine::NodeFilter;
pub use error::{Error, Result};
pub use index_filter::{IndexFilter, STRIPPED_CONTENT_FIELD};
pub use node::{Node, NodeKind};
pub use options::Options;
pub use result::{Directives, FilterResult, Outlink, ParseRecord, ParseStatus};
pub use rules::{ExcludeMode, MatchPolicy, Rule, RuleSet, SelectSpec, SelectorSet};

/// Configuration property keys, as named in crawl configuration files.
pub mod keys {
    pub use crate::options::{
        BLACKLIST_KEY, EXCLUDE_LIST_KEY, EXCLUDE_MODE_KEY, FORM_USE_ACTION_KEY,
        MATCH_POLICY_KEY, OUTLINK_IGNORE_TAGS_KEY, SELECT_COPY_KEY, WHITELIST_KEY,
    };
}

/// Parses `html` and filters it with `options`.
///
/// Convenience for one-off use: it compiles `options` on every call. Build a
/// [`NodeFilter`] once and reuse it when filtering many documents.
///
/// # Errors
///
/// Returns [`Error::BaseUrl`] when `base_url` cannot be parsed.
pub fn filter_html(html: &str, base_url: &str, options: &Options) -> Result<FilterResult> {
    let root = dom::parse(html);
    NodeFilter::new(options).run(&root, base_url, Directives::default())
}
