//! Whitelist copying.
//!
//! Matching nodes are appended, with their whole subtree, to the target; the
//! walk does not descend into them, so a match nested inside another match is
//! never copied twice. Non-matching nodes are descended but contribute
//! nothing themselves.

use crate::matcher::{matching_rules, SelectorKeys};
use crate::node::Node;
use crate::rules::{MatchPolicy, RuleSet, SelectorSet};

/// Append to `target` a content clone of every highest matching subtree of
/// `source`. Returns the number of subtrees copied.
pub fn copy_whitelisted(
    source: &Node,
    target: &mut Node,
    rules: &RuleSet,
    policy: MatchPolicy,
) -> usize {
    copy_where(source, target, &|node: &Node| {
        let hits = matching_rules(node, rules, policy);
        for rule in &hits {
            log::trace!("keeping <{}> matched by [{rule}]", node.tag());
        }
        !hits.is_empty()
    })
}

/// CSS-like variant of [`copy_whitelisted`].
pub fn copy_selected(source: &Node, target: &mut Node, set: &SelectorSet) -> usize {
    copy_where(source, target, &|node: &Node| {
        if !node.is_element() {
            return false;
        }
        match SelectorKeys::of(node).find_in(set) {
            Some(key) => {
                log::trace!("keeping {key}");
                true
            }
            None => false,
        }
    })
}

fn copy_where<F>(node: &Node, target: &mut Node, is_match: &F) -> usize
where
    F: Fn(&Node) -> bool,
{
    if is_match(node) {
        target.append_child(node.clone());
        return 1;
    }
    node.children()
        .iter()
        .map(|child| copy_where(child, target, is_match))
        .sum()
}
