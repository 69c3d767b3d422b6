//! Tree Matcher
//!
//! Predicates deciding whether a node satisfies a [`Rule`], a [`RuleSet`] or
//! a [`SelectorSet`]. Matching is total: a missing attribute is simply a
//! non-match.
//!
//! Attribute values are compared as a whole. `class="foo bar"` does not match
//! a rule for `class=foo`.

use crate::node::Node;
use crate::rules::{MatchPolicy, Rule, RuleSet, SelectorSet};

/// True iff `node` is an element with the rule's tag carrying the rule's
/// attribute with exactly the rule's value. Tag and attribute names compare
/// ASCII case-insensitively; the value compares with Unicode case folding.
#[must_use]
pub fn rule_matches(node: &Node, rule: &Rule) -> bool {
    if !node.is_element() || !node.has_attributes() || !node.has_tag(rule.tag()) {
        return false;
    }
    node.attr(rule.attribute())
        .is_some_and(|value| eq_ignore_case(value, rule.value()))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Rules of `rules` matching `node`, in rule order.
///
/// Under [`MatchPolicy::FirstMatch`] at most one rule is returned.
#[must_use]
pub fn matching_rules<'r>(node: &Node, rules: &'r RuleSet, policy: MatchPolicy) -> Vec<&'r Rule> {
    let mut hits = rules.rules().iter().filter(|rule| rule_matches(node, rule));
    match policy {
        MatchPolicy::FirstMatch => hits.next().into_iter().collect(),
        MatchPolicy::AllMatches => hits.collect(),
    }
}


/// Lookup keys of a node for the CSS-like engine: `type`, `type#id`,
/// `type.class`, all lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorKeys {
    pub tag: String,
    pub tag_and_id: Option<String>,
    pub tag_and_class: Option<String>,
}

impl SelectorKeys {
    #[must_use]
    pub fn of(node: &Node) -> Self {
        let tag = node.tag().to_lowercase();
        let id = node.attr("id").map(str::to_lowercase);
        let class = node.attr("class").map(str::to_lowercase);

        Self {
            tag_and_id: id.map(|id| format!("{tag}#{id}")),
            tag_and_class: class.map(|class| format!("{tag}.{class}")),
            tag,
        }
    }

    /// The key that hit `set`, checked in `type`, `type#id`, `type.class`
    /// order.
    #[must_use]
    pub fn find_in(&self, set: &SelectorSet) -> Option<&str> {
        std::iter::once(self.tag.as_str())
            .chain(self.tag_and_id.as_deref())
            .chain(self.tag_and_class.as_deref())
            .find(|key| set.contains(key))
    }
}

/// True iff `node` is an element whose `type`, `type#id` or `type.class` key
/// is in `set`.
#[must_use]
pub fn selector_matches(node: &Node, set: &SelectorSet) -> bool {
    node.is_element() && SelectorKeys::of(node).find_in(set).is_some()
}
