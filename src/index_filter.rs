//! Selector-keyed index filter.
//!
//! Matches elements by `type`, `type#id` or `type.class` against a
//! comma-separated list and stores the text of the retained content in the
//! `strippedContent` metadata field. Text, outlinks and every other field of
//! the record are left alone.

use crate::filter::{blacklist_selected, whitelist_selected};
use crate::node::Node;
use crate::options::{Options, BLACKLIST_KEY, WHITELIST_KEY};
use crate::result::ParseRecord;
use crate::rules::SelectorSet;
use crate::text::extract_text;

/// Metadata field written by [`IndexFilter::apply`].
pub const STRIPPED_CONTENT_FIELD: &str = "strippedContent";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum SelectorList {
    #[default]
    Unfiltered,
    Blacklist(SelectorSet),
    Whitelist(SelectorSet),
}

/// Compiled selector blacklist or whitelist. The whitelist wins when both
/// are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexFilter {
    selection: SelectorList,
}

impl IndexFilter {
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let whitelist = options
            .whitelist
            .as_deref()
            .map(SelectorSet::parse)
            .filter(|set| !set.is_empty());
        let blacklist = options
            .blacklist
            .as_deref()
            .map(SelectorSet::parse)
            .filter(|set| !set.is_empty());

        let selection = match (whitelist, blacklist) {
            (Some(whitelist), blacklist) => {
                if blacklist.is_some() {
                    log::warn!("both [{WHITELIST_KEY}] and [{BLACKLIST_KEY}] set; using the whitelist");
                }
                log::info!(
                    "configured [{WHITELIST_KEY}] to only use elements {:?}",
                    whitelist.selectors()
                );
                SelectorList::Whitelist(whitelist)
            }
            (None, Some(blacklist)) => {
                log::info!(
                    "configured [{BLACKLIST_KEY}] to ignore elements {:?}",
                    blacklist.selectors()
                );
                SelectorList::Blacklist(blacklist)
            }
            (None, None) => SelectorList::Unfiltered,
        };

        Self { selection }
    }

    /// Whether a blacklist or whitelist is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.selection != SelectorList::Unfiltered
    }

    /// Text of `root` after applying the selector list. Unfiltered text when
    /// no list is configured.
    #[must_use]
    pub fn stripped_content(&self, root: &Node) -> String {
        match &self.selection {
            SelectorList::Unfiltered => extract_text(Some(root)),
            SelectorList::Blacklist(set) => extract_text(Some(&blacklist_selected(root, set))),
            SelectorList::Whitelist(set) => extract_text(Some(&whitelist_selected(root, set))),
        }
    }

    /// Store [`stripped_content`](Self::stripped_content) under
    /// [`STRIPPED_CONTENT_FIELD`]. Passes the record through when no list is
    /// configured.
    #[must_use]
    pub fn apply(&self, mut record: ParseRecord, root: &Node) -> ParseRecord {
        if !self.is_enabled() {
            return record;
        }
        let content = self.stripped_content(root);
        record
            .content_meta
            .insert(STRIPPED_CONTENT_FIELD.to_string(), content);
        record
    }
}
