//! Rule Compiler
//!
//! Turns configuration strings into immutable rule values:
//!
//! - [`RuleSet`]: `tag;attribute;value` triples separated by `|`
//! - [`SelectSpec`]: the same triples, each bound to a derived field name
//! - [`SelectorSet`]: comma-separated `tag`, `tag#id`, `tag.class` tokens
//!
//! Empty input compiles to an empty value. A group that does not split into
//! exactly three non-empty parts is an [`Error::MalformedRule`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between rule groups.
pub const GROUP_SEPARATOR: char = '|';
/// Separator between the parts of one rule group.
pub const FIELD_SEPARATOR: char = ';';
/// Separator between CSS-like selector tokens.
pub const SELECTOR_SEPARATOR: char = ',';

const RULE_ARITY: usize = 3;

/// An exact `(tag, attribute, value)` rule. All three compare
/// case-insensitively; the value must equal the whole attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    tag: String,
    attribute: String,
    value: String,
}

impl Rule {
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Field name used by select-copy: `tag_attribute_value`.
    #[must_use]
    pub fn field_name(&self) -> String {
        format!("{}_{}_{}", self.tag, self.attribute, self.value)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.tag, self.attribute, self.value
        )
    }
}

/// Ordered list of [`Rule`]s for the generic engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile `tag;attribute;value|...` with the default separators.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with(raw, GROUP_SEPARATOR, FIELD_SEPARATOR)
    }

    /// Compile with explicit group and field separators.
    pub fn parse_with(raw: &str, group_sep: char, field_sep: char) -> Result<Self> {
        let rules = split_groups(raw, group_sep)
            .map(|group| parse_rule(group, field_sep))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// A select-copy rule together with the metadata field it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRule {
    pub rule: Rule,
    pub field: String,
}

impl From<Rule> for SelectRule {
    fn from(rule: Rule) -> Self {
        let field = rule.field_name();
        Self { rule, field }
    }
}

/// Select-copy configuration: rules in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectSpec {
    rules: Vec<SelectRule>,
}

impl SelectSpec {
    /// Compile `tag;attribute;value|...` with the default separators.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with(raw, GROUP_SEPARATOR, FIELD_SEPARATOR)
    }

    /// Compile with explicit group and field separators.
    pub fn parse_with(raw: &str, group_sep: char, field_sep: char) -> Result<Self> {
        let rules = RuleSet::parse_with(raw, group_sep, field_sep)?;
        Ok(rules.rules.into_iter().collect())
    }

    #[must_use]
    pub fn rules(&self) -> &[SelectRule] {
        &self.rules
    }

    /// Field names in rule order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.field.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for SelectSpec {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(SelectRule::from).collect(),
        }
    }
}

/// Sorted set of lowercase CSS-like selector tokens (`tag`, `tag#id`,
/// `tag.class`), searched with binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet {
    selectors: Vec<String>,
}

impl SelectorSet {
    /// Compile a comma-separated selector list. Never fails: every token is a
    /// valid (if possibly never-matching) selector.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.to_lowercase()
            .split(SELECTOR_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Exact membership test against a lowercase key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.selectors
            .binary_search_by(|candidate| candidate.as_str().cmp(key))
            .is_ok()
    }

    #[must_use]
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl FromIterator<String> for SelectorSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut selectors: Vec<String> = iter.into_iter().collect();
        selectors.sort_unstable();
        selectors.dedup();
        Self { selectors }
    }
}

/// How the exclude rule set is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExcludeMode {
    /// No exclusion; text and outlinks come from the original tree.
    #[default]
    Disabled,
    /// Keep everything except matching subtrees.
    Blacklist,
    /// Keep only matching subtrees.
    Whitelist,
}

impl FromStr for ExcludeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("blacklist") {
            Ok(Self::Blacklist)
        } else if s.eq_ignore_ascii_case("whitelist") {
            Ok(Self::Whitelist)
        } else {
            Err(Error::InvalidExcludeMode(s.to_string()))
        }
    }
}

impl fmt::Display for ExcludeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "disabled",
            Self::Blacklist => "blacklist",
            Self::Whitelist => "whitelist",
        })
    }
}

/// Whether rule evaluation for a node stops at the first match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Stop at the first matching rule.
    #[default]
    FirstMatch,
    /// Evaluate every rule against every visited node.
    AllMatches,
}

impl FromStr for MatchPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("first") {
            Ok(Self::FirstMatch)
        } else if s.eq_ignore_ascii_case("all") {
            Ok(Self::AllMatches)
        } else {
            Err(Error::InvalidPolicy(s.to_string()))
        }
    }
}

fn split_groups(raw: &str, group_sep: char) -> impl Iterator<Item = &str> {
    raw.split(group_sep).map(str::trim).filter(|g| !g.is_empty())
}

fn parse_rule(group: &str, field_sep: char) -> Result<Rule> {
    let parts: Vec<&str> = group
        .split(field_sep)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [tag, attribute, value] => Ok(Rule::new(*tag, *attribute, *value)),
        _ => Err(Error::MalformedRule {
            group: group.to_string(),
            expected: RULE_ARITY,
            found: parts.len(),
        }),
    }
}
