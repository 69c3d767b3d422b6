//! Select-Copy Extractor
//!
//! One walk over the original tree per document. A node matching a
//! [`SelectSpec`] rule has its normalized text stored under the rule's field
//! and its children are not visited.

use std::collections::BTreeMap;

use crate::matcher::rule_matches;
use crate::node::Node;
use crate::rules::{MatchPolicy, SelectSpec};
use crate::text::node_text;

/// Extract select-copy fields from `root`.
///
/// Under [`MatchPolicy::FirstMatch`] only the first matching rule captures a
/// node; under [`MatchPolicy::AllMatches`] every matching rule does. When
/// several nodes match the same rule the last one in document order wins.
#[must_use]
pub fn select_copy(root: &Node, spec: &SelectSpec, policy: MatchPolicy) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    if !spec.is_empty() {
        visit(root, spec, policy, &mut fields);
    }
    fields
}

fn visit(node: &Node, spec: &SelectSpec, policy: MatchPolicy, fields: &mut BTreeMap<String, String>) {
    if node.is_element() && node.has_attributes() {
        let mut text: Option<String> = None;
        for select in spec.rules() {
            if !rule_matches(node, &select.rule) {
                continue;
            }
            log::trace!("selecting <{}> into {}", node.tag(), select.field);
            let value = text.get_or_insert_with(|| node_text(node)).clone();
            fields.insert(select.field.clone(), value);
            if policy == MatchPolicy::FirstMatch {
                break;
            }
        }
        if text.is_some() {
            return;
        }
    }
    for child in node.children() {
        visit(child, spec, policy, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn test_select_copy_headline() {
        let root = dom::parse(r#"<body><h1 id="title">Big   Headline</h1><p>body</p></body>"#);
        let spec = SelectSpec::parse("h1;id;title").unwrap();

        let fields = select_copy(&root, &spec, MatchPolicy::FirstMatch);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("h1_id_title").map(String::as_str), Some("Big Headline"));
    }

    #[test]
    fn test_unmatched_rule_has_no_field() {
        let root = dom::parse_fragment(r#"<h1 id="title"></h1>"#);
        let spec = SelectSpec::parse("h1;id;title|h2;id;sub").unwrap();

        let fields = select_copy(&root, &spec, MatchPolicy::FirstMatch);

        assert_eq!(fields.get("h1_id_title").map(String::as_str), Some(""));
        assert!(!fields.contains_key("h2_id_sub"));
    }

    #[test]
    fn test_policy_controls_rules_per_node() {
        let root = dom::parse_fragment(r#"<div id="a" class="b">shared</div>"#);
        let spec = SelectSpec::parse("div;id;a|div;class;b").unwrap();

        let first = select_copy(&root, &spec, MatchPolicy::FirstMatch);
        assert_eq!(first.len(), 1);
        assert!(first.contains_key("div_id_a"));

        let all = select_copy(&root, &spec, MatchPolicy::AllMatches);
        assert_eq!(all.len(), 2);
        assert_eq!(all.get("div_class_b").map(String::as_str), Some("shared"));
    }

    #[test]
    fn test_does_not_descend_into_selected_node() {
        let root = dom::parse_fragment(
            r#"<div class="box">outer <div class="box">inner</div></div><div class="box">last</div>"#,
        );
        let spec = SelectSpec::parse("div;class;box").unwrap();

        let fields = select_copy(&root, &spec, MatchPolicy::FirstMatch);

        assert_eq!(fields.get("div_class_box").map(String::as_str), Some("last"));
    }

    #[test]
    fn test_selected_text_keeps_script_when_chosen() {
        let root = dom::parse(r#"<body><script id="data">{"a":1}</script></body>"#);
        let spec = SelectSpec::parse("script;id;data").unwrap();

        let fields = select_copy(&root, &spec, MatchPolicy::FirstMatch);

        assert_eq!(fields.get("script_id_data").map(String::as_str), Some(r#"{"a":1}"#));
    }
}
