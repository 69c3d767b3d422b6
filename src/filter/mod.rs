//! Tree Filter
//!
//! Blacklist stripping and whitelist copying, for both the generic
//! `tag;attribute;value` rules and the CSS-like selector set.
//!
//! Neither entry point mutates the tree it is given:
//! - [`blacklist`] deep clones and strips the clone,
//! - [`whitelist`] builds a new tree from a structural clone of the root.
//!
//! [`strip::strip_blacklisted`] works in place for callers that own the
//! tree outright.

pub mod copy;
pub mod strip;

use crate::node::Node;
use crate::rules::{ExcludeMode, MatchPolicy, RuleSet, SelectorSet};

pub use copy::{copy_selected, copy_whitelisted};
pub use strip::{strip_blacklisted, strip_selected};

/// Deep clone `root` and strip every subtree matching `rules`.
#[must_use]
pub fn blacklist(root: &Node, rules: &RuleSet, policy: MatchPolicy) -> Node {
    let mut filtered = root.clone();
    let stripped = strip_blacklisted(&mut filtered, rules, policy);
    log::debug!("blacklist stripped {stripped} node(s)");
    filtered
}

/// Build a tree holding only the subtrees of `root` matching `rules`.
#[must_use]
pub fn whitelist(root: &Node, rules: &RuleSet, policy: MatchPolicy) -> Node {
    let mut filtered = root.shallow_clone();
    let copied = copy_whitelisted(root, &mut filtered, rules, policy);
    log::debug!("whitelist copied {copied} node(s)");
    filtered
}

/// CSS-like variant of [`blacklist`].
#[must_use]
pub fn blacklist_selected(root: &Node, set: &SelectorSet) -> Node {
    let mut filtered = root.clone();
    let stripped = strip_selected(&mut filtered, set);
    log::debug!("selector blacklist stripped {stripped} node(s)");
    filtered
}

/// CSS-like variant of [`whitelist`].
#[must_use]
pub fn whitelist_selected(root: &Node, set: &SelectorSet) -> Node {
    let mut filtered = root.shallow_clone();
    let copied = copy_selected(root, &mut filtered, set);
    log::debug!("selector whitelist copied {copied} node(s)");
    filtered
}

/// Apply `mode` with `rules`. `None` when exclusion is disabled.
#[must_use]
pub fn exclude(root: &Node, mode: ExcludeMode, rules: &RuleSet, policy: MatchPolicy) -> Option<Node> {
    match mode {
        ExcludeMode::Disabled => None,
        ExcludeMode::Blacklist => Some(blacklist(root, rules, policy)),
        ExcludeMode::Whitelist => Some(whitelist(root, rules, policy)),
    }
}
