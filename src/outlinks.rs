//! Outlink Extractor
//!
//! Collects the links of a (filtered) tree in document order, resolved
//! against the effective base URL. An in-document `<base href>` overrides
//! the document's own base URL. Duplicates are kept.

use url::Url;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::options::Options;
use crate::patterns::REL_NOFOLLOW;
use crate::result::Outlink;
use crate::text::{node_text, normalize};

/// Which elements may contribute outlinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams {
    /// Lowercase tags never collected.
    pub ignore_tags: Vec<String>,

    /// Collect `<form action>` of non-POST forms.
    pub follow_forms: bool,
}

impl LinkParams {
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            ignore_tags: options
                .outlink_ignore_tags
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            follow_forms: options.follow_forms,
        }
    }

    /// Name of the attribute carrying the link target of `node`, if `node`
    /// is a link-bearing element that is not ignored.
    #[must_use]
    pub fn link_attribute(&self, node: &Node) -> Option<&'static str> {
        if !node.is_element() {
            return None;
        }
        let tag = node.tag().to_ascii_lowercase();
        if self.ignore_tags.contains(&tag) {
            return None;
        }
        match tag.as_str() {
            "a" | "area" | "link" => Some("href"),
            "frame" | "iframe" | "script" | "img" | "embed" => Some("src"),
            "form" if self.follow_forms && !is_post_form(node) => Some("action"),
            _ => None,
        }
    }
}

/// Parse the document's declared base URL.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url.trim()).map_err(|source| Error::BaseUrl {
        url: base_url.to_string(),
        source,
    })
}

/// The first `<base href>` of `root`, resolved against `document_base`.
#[must_use]
pub fn find_base(root: &Node, document_base: &Url) -> Option<Url> {
    root.descendants()
        .filter(|node| node.is_element() && node.has_tag("base"))
        .filter_map(|node| node.attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .and_then(|href| document_base.join(href).ok())
}

/// `<base href>` if present, otherwise `document_base`.
#[must_use]
pub fn effective_base(root: &Node, document_base: &Url) -> Url {
    match find_base(root, document_base) {
        Some(base) => {
            log::trace!("using <base href> {base} instead of {document_base}");
            base
        }
        None => document_base.clone(),
    }
}

/// Collect every outlink of `root` resolved against `base`.
#[must_use]
pub fn extract_outlinks(base: &Url, root: &Node, params: &LinkParams) -> Vec<Outlink> {
    let outlinks: Vec<Outlink> = root
        .descendants()
        .filter_map(|node| {
            let attribute = params.link_attribute(node)?;
            to_outlink(base, node, attribute)
        })
        .collect();
    log::trace!("found {} outlink(s)", outlinks.len());
    outlinks
}

/// Schemes an outlink may carry. Anything else (`javascript:`, `data:`,
/// `mailto:`, ...) cannot be fetched and is dropped.
pub const CRAWLABLE_SCHEMES: &[&str] = &["http", "https", "ftp", "file"];

/// Resolve `href` against `base`. Handles relative, fragment-only and
/// protocol-relative references. `None` for empty, unresolvable or
/// non-crawlable targets.
#[must_use]
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base.join(href) {
        Ok(url) if CRAWLABLE_SCHEMES.contains(&url.scheme()) => Some(url),
        Ok(url) => {
            log::debug!("skipping non-crawlable link {url}");
            None
        }
        Err(err) => {
            log::debug!("skipping unresolvable link {href:?}: {err}");
            None
        }
    }
}

fn to_outlink(base: &Url, node: &Node, attribute: &str) -> Option<Outlink> {
    let url = resolve(base, node.attr(attribute)?)?;
    let tag = node.tag().to_ascii_lowercase();
    let anchor = match tag.as_str() {
        "a" => node_text(node),
        "img" | "area" => node.attr("alt").map(normalize).unwrap_or_default(),
        _ => String::new(),
    };

    Some(Outlink {
        url: url.to_string(),
        anchor,
        nofollow: node.attr("rel").is_some_and(|rel| REL_NOFOLLOW.is_match(rel)),
        tag,
    })
}

fn is_post_form(node: &Node) -> bool {
    node.attr("method")
        .is_some_and(|m| m.trim().eq_ignore_ascii_case("post"))
}
