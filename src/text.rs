//! Text Extractor
//!
//! Produces the indexable plain text of a tree: text nodes in document order,
//! whitespace runs collapsed to a single space, trimmed, and joined with a
//! single space. `<script>` and `<style>` subtrees and comments contribute
//! nothing.

use crate::node::Node;
use crate::patterns::WHITESPACE_RUN;

/// Elements whose subtree never contributes text.
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Extract normalized text from `root`. An absent root yields `""`.
#[must_use]
pub fn extract_text(root: Option<&Node>) -> String {
    let mut buf = String::new();
    if let Some(root) = root {
        collect(root, &mut buf, false);
    }
    buf
}

/// Normalized text of one explicitly chosen node.
///
/// The node itself is never skipped for being a `<script>` or `<style>`;
/// its descendants follow the usual rules.
#[must_use]
pub fn node_text(node: &Node) -> String {
    let mut buf = String::new();
    collect(node, &mut buf, true);
    buf
}

/// Collapse whitespace runs to one space, then trim spaces and control
/// characters (everything up to U+0020) from both ends.
#[must_use]
pub fn normalize(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text, " ")
        .trim_matches(|c: char| c <= ' ')
        .to_string()
}

fn is_non_content(node: &Node) -> bool {
    node.is_element() && NON_CONTENT_TAGS.iter().any(|tag| node.has_tag(tag))
}

fn collect(node: &Node, buf: &mut String, chosen: bool) {
    if node.is_comment() || (!chosen && is_non_content(node)) {
        return;
    }
    if node.is_text() {
        push_fragment(buf, &normalize(node.value()));
        return;
    }
    for child in node.children() {
        collect(child, buf, false);
    }
}

fn push_fragment(buf: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(fragment);
}
