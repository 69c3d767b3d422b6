//! DOM Bridge
//!
//! Builds owned [`Node`] trees from HTML using the `dom_query` crate.
//! The filters never touch `dom_query` types directly; parsing stays an
//! external concern and this module is the single seam to it.

pub use dom_query::{Document, NodeRef, Selection};

use crate::node::Node;

/// Parse an HTML document into a fragment root holding the `<html>` element.
///
/// The HTML5 parser repairs malformed input the way browsers do; the filters
/// only ever see the repaired tree.
#[must_use]
pub fn parse(html: &str) -> Node {
    let doc = Document::from(html);
    from_selection(&doc.select("html"))
}

/// Parse an HTML snippet, returning a fragment root holding the children of
/// the generated `<body>`. Useful when the input has no document shell.
#[must_use]
pub fn parse_fragment(html: &str) -> Node {
    let doc = Document::from(html);
    let body = doc.select("body");
    let children = body
        .nodes()
        .first()
        .map(|body| body.children().iter().filter_map(convert).collect())
        .unwrap_or_default();
    Node::fragment(children)
}

/// Convert every node of a selection into children of a new fragment root.
#[must_use]
pub fn from_selection(sel: &Selection) -> Node {
    Node::fragment(sel.nodes().iter().filter_map(convert).collect())
}

/// Convert a single `dom_query` node and its subtree.
///
/// Doctypes and processing instructions have no counterpart and yield `None`.
#[must_use]
pub fn convert(node: &NodeRef) -> Option<Node> {
    if node.is_text() {
        return Some(Node::text(node.text().to_string()));
    }
    if node.is_comment() {
        return Some(Node::comment(node.text().to_string()));
    }
    if !node.is_element() {
        return None;
    }

    let tag = node.node_name().map(|t| t.to_string())?;
    let mut element = Node::element(tag);
    for attr in node.attrs() {
        element = element.with_attr(attr.name.local.to_string(), attr.value.to_string());
    }
    for child in node.children() {
        if let Some(child) = convert(&child) {
            element.append_child(child);
        }
    }
    Some(element)
}
