//! Configuration options for node filtering.
//!
//! `Options` holds the raw configuration strings exactly as a crawl
//! configuration supplies them. They are compiled once by
//! [`NodeFilter::new`](crate::NodeFilter::new) and
//! [`IndexFilter::new`](crate::IndexFilter::new).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Property key for the exclude mode (`blacklist` | `whitelist`).
pub const EXCLUDE_MODE_KEY: &str = "parser.html.nodes.exclude.mode";
/// Property key for the `|`-separated `tag;attribute;value` exclude rules.
pub const EXCLUDE_LIST_KEY: &str = "parser.html.nodes.exclude.list";
/// Property key for the `|`-separated `tag;attribute;value` select-copy rules.
pub const SELECT_COPY_KEY: &str = "parser.html.nodes.select.copy";
/// Property key for the rule evaluation policy (`first` | `all`).
pub const MATCH_POLICY_KEY: &str = "parser.html.nodes.match.policy";
/// Property key for the comma-separated CSS-like blacklist.
pub const BLACKLIST_KEY: &str = "parser.html.blacklist";
/// Property key for the comma-separated CSS-like whitelist.
pub const WHITELIST_KEY: &str = "parser.html.whitelist";
/// Property key for tags whose links are never collected.
pub const OUTLINK_IGNORE_TAGS_KEY: &str = "parser.html.outlinks.ignore_tags";
/// Property key enabling `<form action>` outlinks.
pub const FORM_USE_ACTION_KEY: &str = "parser.html.form.use_action";

/// Configuration options for node filtering.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for a filter that does nothing.
///
/// # Example
///
/// ```rust
/// use html_node_filter::Options;
///
/// let options = Options {
///     exclude_mode: Some("blacklist".to_string()),
///     exclude_list: Some("div;id;sidebar|div;class;ads".to_string()),
///     ..Options::default()
/// };
/// assert!(options.select_copy.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Exclude mode, `blacklist` or `whitelist` (case-insensitive).
    ///
    /// Any other value is a configuration error and disables exclusion.
    ///
    /// Default: `None`
    pub exclude_mode: Option<String>,

    /// Exclude rules: `tag;attribute;value` triples separated by `|`.
    ///
    /// Default: `None`
    pub exclude_list: Option<String>,

    /// Select-copy rules: `tag;attribute;value` triples separated by `|`.
    /// Each rule writes to the field `tag_attribute_value`.
    ///
    /// Default: `None`
    pub select_copy: Option<String>,

    /// Rule evaluation policy: `first` stops at the first matching rule per
    /// node, `all` evaluates every rule.
    ///
    /// Default: `None` (`first`)
    pub match_policy: Option<String>,

    /// CSS-like blacklist for the index filter: `tag`, `tag#id` or
    /// `tag.class` tokens separated by `,`.
    ///
    /// Default: `None`
    pub blacklist: Option<String>,

    /// CSS-like whitelist for the index filter. Takes priority over
    /// `blacklist` when both are set.
    ///
    /// Default: `None`
    pub whitelist: Option<String>,

    /// Tags whose links are never collected as outlinks (e.g. `img,script`).
    ///
    /// Default: empty
    pub outlink_ignore_tags: Vec<String>,

    /// Collect `<form action>` targets of non-POST forms as outlinks.
    ///
    /// Default: `false`
    pub follow_forms: bool,
}

impl Options {
    /// Build options from string-keyed crawl configuration properties.
    ///
    /// Unknown keys are ignored. Empty values are treated as absent.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use html_node_filter::Options;
    ///
    /// let mut props = HashMap::new();
    /// props.insert("parser.html.nodes.exclude.mode".to_string(), "whitelist".to_string());
    /// props.insert("parser.html.nodes.exclude.list".to_string(), "div;id;content".to_string());
    ///
    /// let options = Options::from_properties(&props);
    /// assert_eq!(options.exclude_mode.as_deref(), Some("whitelist"));
    /// ```
    #[must_use]
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            props
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            exclude_mode: get(EXCLUDE_MODE_KEY),
            exclude_list: get(EXCLUDE_LIST_KEY),
            select_copy: get(SELECT_COPY_KEY),
            match_policy: get(MATCH_POLICY_KEY),
            blacklist: get(BLACKLIST_KEY),
            whitelist: get(WHITELIST_KEY),
            outlink_ignore_tags: get(OUTLINK_IGNORE_TAGS_KEY)
                .map(|tags| {
                    tags.split(',')
                        .map(|t| t.trim().to_ascii_lowercase())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            follow_forms: get(FORM_USE_ACTION_KEY)
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}
