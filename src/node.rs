//! Owned document tree.
//!
//! Every node owns its children, so a child has exactly one parent and
//! `Clone` yields a fully independent subtree (the "content clone").
//! [`Node::shallow_clone`] is the structural clone: tag and attributes only.

/// Closed set of node kinds the filters care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a parsed document fragment.
    Fragment,
    /// An HTML element.
    Element,
    /// Character data.
    Text,
    /// `<!-- ... -->`
    Comment,
}

/// A node of a parsed HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    /// Empty document-fragment root holding `children`.
    #[must_use]
    pub fn fragment(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Fragment,
            tag: "#document-fragment".to_string(),
            attrs: Vec::new(),
            text: String::new(),
            children,
        }
    }

    /// Element node with no attributes or children.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.into(),
            attrs: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            tag: "#text".to_string(),
            attrs: Vec::new(),
            text: value.into(),
            children: Vec::new(),
        }
    }

    /// Comment node.
    #[must_use]
    pub fn comment(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Comment,
            tag: "#comment".to_string(),
            attrs: Vec::new(),
            text: value.into(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute. Later duplicates of the same name are ignored
    /// on lookup, as in HTML.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == NodeKind::Comment
    }

    /// Tag name as stored (not case-folded).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// ASCII case-insensitive tag comparison.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Text value of text and comment nodes; empty for elements.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attrs.is_empty()
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Look up an attribute by name, ignoring ASCII case.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Mutable access to the children, for in-place rewrites of a tree the
    /// caller owns.
    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Clear the text value and detach every child. The node itself stays in
    /// its parent as an empty placeholder.
    pub fn strip(&mut self) {
        self.text.clear();
        self.children.clear();
    }

    /// Structural clone: same kind, tag and attributes; no text, no children.
    #[must_use]
    pub fn shallow_clone(&self) -> Self {
        Self {
            kind: self.kind,
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Depth-first pre-order iterator over this subtree.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
