//! Blacklist stripping.
//!
//! A matching node is emptied (text cleared, children detached) but stays in
//! its parent as a placeholder; the walk does not descend into it.

use crate::matcher::{matching_rules, SelectorKeys};
use crate::node::Node;
use crate::rules::{MatchPolicy, RuleSet, SelectorSet};

/// Strip, in place, every subtree of `root` matching `rules`.
///
/// Returns the number of nodes stripped. Under [`MatchPolicy::AllMatches`]
/// every rule is evaluated against a visited node before it is stripped; the
/// tree that results is the same as with [`MatchPolicy::FirstMatch`].
pub fn strip_blacklisted(root: &mut Node, rules: &RuleSet, policy: MatchPolicy) -> usize {
    strip_where(root, &|node: &Node| {
        let hits = matching_rules(node, rules, policy);
        for rule in &hits {
            log::trace!("stripping <{}> matched by [{rule}]", node.tag());
        }
        !hits.is_empty()
    })
}

/// Strip, in place, every element whose `type`, `type#id` or `type.class`
/// key is in `set`. Returns the number of nodes stripped.
pub fn strip_selected(root: &mut Node, set: &SelectorSet) -> usize {
    strip_where(root, &|node: &Node| {
        if !node.is_element() {
            return false;
        }
        let keys = SelectorKeys::of(node);
        match keys.find_in(set) {
            Some(key) => {
                log::trace!("stripping {key}");
                true
            }
            None => false,
        }
    })
}

fn strip_where<F>(node: &mut Node, is_match: &F) -> usize
where
    F: Fn(&Node) -> bool,
{
    if is_match(node) {
        node.strip();
        return 1;
    }
    node.children_mut()
        .iter_mut()
        .map(|child| strip_where(child, is_match))
        .sum()
}
