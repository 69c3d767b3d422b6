//! Per-document filtering pipeline.
//!
//! [`NodeFilter`] compiles its configuration once and is then applied to any
//! number of documents, from any number of threads:
//!
//! 1. select-copy over the original tree,
//! 2. blacklist strip (on a deep clone) or whitelist copy,
//! 3. text and outlinks from the filtered tree (or the original tree when no
//!    exclude mode is configured),
//! 4. merge into the document's [`ParseRecord`].

use crate::error::{Error, Result};
use crate::filter;
use crate::node::Node;
use crate::options::{Options, EXCLUDE_LIST_KEY, EXCLUDE_MODE_KEY, MATCH_POLICY_KEY, SELECT_COPY_KEY};
use crate::outlinks::{effective_base, extract_outlinks, parse_base_url, LinkParams};
use crate::result::{Directives, FilterResult, ParseRecord};
use crate::rules::{ExcludeMode, MatchPolicy, RuleSet, SelectSpec};
use crate::select::select_copy;
use crate::text::extract_text;

/// Compiled select-copy and exclude configuration.
#[derive(Debug)]
pub struct NodeFilter {
    mode: ExcludeMode,
    exclude: RuleSet,
    select: SelectSpec,
    policy: MatchPolicy,
    links: LinkParams,
    config_errors: Vec<Error>,
}

impl NodeFilter {
    /// Compile `options`.
    ///
    /// Never fails: a configuration error is logged and disables only the
    /// feature it belongs to. The errors stay available through
    /// [`config_errors`](Self::config_errors).
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let mut config_errors = Vec::new();

        let policy = match options.match_policy.as_deref().map(str::parse::<MatchPolicy>) {
            None => MatchPolicy::default(),
            Some(Ok(policy)) => policy,
            Some(Err(err)) => {
                log::error!("misconfigured [{MATCH_POLICY_KEY}]: {err}; using first-match");
                config_errors.push(err);
                MatchPolicy::default()
            }
        };

        let select = match options.select_copy.as_deref().map(SelectSpec::parse) {
            None => SelectSpec::default(),
            Some(Ok(spec)) => {
                if !spec.is_empty() {
                    log::info!(
                        "configured [{SELECT_COPY_KEY}] to copy fields {:?}",
                        spec.fields().collect::<Vec<_>>()
                    );
                }
                spec
            }
            Some(Err(err)) => {
                log::error!("misconfigured [{SELECT_COPY_KEY}]: {err}; select-copy disabled");
                config_errors.push(err);
                SelectSpec::default()
            }
        };

        let (mode, exclude) = match compile_exclude(options) {
            Ok((mode, rules)) => {
                if mode != ExcludeMode::Disabled {
                    log::info!(
                        "configured [{EXCLUDE_MODE_KEY}] to {mode} {} rule(s)",
                        rules.len()
                    );
                }
                (mode, rules)
            }
            Err(err) => {
                log::error!("misconfigured [{EXCLUDE_MODE_KEY}]/[{EXCLUDE_LIST_KEY}]: {err}; exclusion disabled");
                config_errors.push(err);
                (ExcludeMode::Disabled, RuleSet::default())
            }
        };

        Self {
            mode,
            exclude,
            select,
            policy,
            links: LinkParams::from_options(options),
            config_errors,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ExcludeMode {
        self.mode
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    #[must_use]
    pub fn select_spec(&self) -> &SelectSpec {
        &self.select
    }

    #[must_use]
    pub fn exclude_rules(&self) -> &RuleSet {
        &self.exclude
    }

    /// Configuration errors encountered by [`new`](Self::new).
    #[must_use]
    pub fn config_errors(&self) -> &[Error] {
        &self.config_errors
    }

    /// Whether select-copy or exclusion is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.mode != ExcludeMode::Disabled || !self.select.is_empty()
    }

    /// Filter one document tree.
    ///
    /// `root` is never modified. Fails only when `base_url` cannot be
    /// parsed, in which case nothing is produced.
    pub fn run(&self, root: &Node, base_url: &str, directives: Directives) -> Result<FilterResult> {
        let document_base = parse_base_url(base_url)?;

        let fields = select_copy(root, &self.select, self.policy);

        let filtered = filter::exclude(root, self.mode, &self.exclude, self.policy);
        let tree = filtered.as_ref().unwrap_or(root);

        let text = if directives.no_index {
            String::new()
        } else {
            extract_text(Some(tree))
        };

        let outlinks = if directives.no_follow {
            Vec::new()
        } else {
            let base = effective_base(tree, &document_base);
            extract_outlinks(&base, tree, &self.links)
        };

        log::debug!(
            "filtered {base_url}: {} chars, {} outlink(s), {} field(s)",
            text.len(),
            outlinks.len(),
            fields.len()
        );

        Ok(FilterResult {
            text,
            outlinks,
            fields,
        })
    }

    /// Filter one document and merge the result into its record.
    ///
    /// The record passes through unchanged when nothing is configured or
    /// when the directives forbid both indexing and following. A bad base
    /// URL turns the record into an empty failed record.
    #[must_use]
    pub fn filter(&self, record: ParseRecord, root: &Node, directives: Directives) -> ParseRecord {
        if !self.is_enabled() || directives.forbids_all() {
            return record;
        }

        match self.run(root, &record.base_url, directives) {
            Ok(result) => record.merge(result),
            Err(err) => {
                log::warn!("cannot filter {}: {err}", record.url);
                record.failed(&err)
            }
        }
    }
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

fn compile_exclude(options: &Options) -> Result<(ExcludeMode, RuleSet)> {
    let mode = options.exclude_mode.as_deref().map(str::trim).filter(|m| !m.is_empty());
    let list = options.exclude_list.as_deref().filter(|l| !l.trim().is_empty());

    match (mode, list) {
        (Some(mode), Some(list)) => {
            let mode = mode.parse::<ExcludeMode>()?;
            let rules = RuleSet::parse(list)?;
            if rules.is_empty() {
                return Ok((ExcludeMode::Disabled, rules));
            }
            Ok((mode, rules))
        }
        (Some(mode), None) => {
            log::warn!("[{EXCLUDE_MODE_KEY}] is {mode:?} but [{EXCLUDE_LIST_KEY}] is empty; exclusion disabled");
            Ok((ExcludeMode::Disabled, RuleSet::default()))
        }
        (None, Some(_)) => {
            log::warn!("[{EXCLUDE_LIST_KEY}] is set but [{EXCLUDE_MODE_KEY}] is not; exclusion disabled");
            Ok((ExcludeMode::Disabled, RuleSet::default()))
        }
        (None, None) => Ok((ExcludeMode::Disabled, RuleSet::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn options(mode: &str, list: &str) -> Options {
        Options {
            exclude_mode: Some(mode.to_string()),
            exclude_list: Some(list.to_string()),
            ..Options::default()
        }
    }

    #[test]
    fn test_new_compiles_exclude_and_select() {
        let engine = NodeFilter::new(&Options {
            select_copy: Some("h1;id;title".to_string()),
            match_policy: Some("all".to_string()),
            ..options("Whitelist", "div;id;content")
        });

        assert_eq!(engine.mode(), ExcludeMode::Whitelist);
        assert_eq!(engine.exclude_rules().len(), 1);
        assert_eq!(engine.select_spec().fields().collect::<Vec<_>>(), vec!["h1_id_title"]);
        assert_eq!(engine.policy(), MatchPolicy::AllMatches);
        assert!(engine.config_errors().is_empty());
        assert!(engine.is_enabled());
    }

    #[test]
    fn test_invalid_mode_disables_exclusion_only() {
        let engine = NodeFilter::new(&Options {
            select_copy: Some("h1;id;title".to_string()),
            ..options("greylist", "div;id;content")
        });

        assert_eq!(engine.mode(), ExcludeMode::Disabled);
        assert!(!engine.select_spec().is_empty());
        assert_eq!(engine.config_errors().len(), 1);
        assert!(matches!(engine.config_errors()[0], Error::InvalidExcludeMode(_)));
    }

    #[test]
    fn test_malformed_rule_disables_feature() {
        let engine = NodeFilter::new(&Options {
            select_copy: Some("h1;id".to_string()),
            ..options("blacklist", "div;id;a|div")
        });

        assert_eq!(engine.mode(), ExcludeMode::Disabled);
        assert!(engine.select_spec().is_empty());
        assert_eq!(engine.config_errors().len(), 2);
        assert!(!engine.is_enabled());
    }

    #[test]
    fn test_mode_without_list_is_disabled() {
        let engine = NodeFilter::new(&Options {
            exclude_mode: Some("blacklist".to_string()),
            ..Options::default()
        });
        assert_eq!(engine.mode(), ExcludeMode::Disabled);
        assert!(engine.config_errors().is_empty());
    }

    #[test]
    fn test_invalid_policy_falls_back_to_first_match() {
        let engine = NodeFilter::new(&Options {
            match_policy: Some("most".to_string()),
            ..Options::default()
        });
        assert_eq!(engine.policy(), MatchPolicy::FirstMatch);
        assert!(matches!(engine.config_errors()[0], Error::InvalidPolicy(_)));
    }

    #[test]
    fn test_run_respects_directives() {
        let engine = NodeFilter::new(&options("blacklist", "div;id;nav"));
        let root = dom::parse(r#"<body><div id="nav"><a href="/n">N</a></div><p>Text <a href="/t">T</a></p></body>"#);

        let no_index = engine
            .run(&root, "http://example.com/", Directives { no_index: true, no_follow: false })
            .unwrap();
        assert!(no_index.text.is_empty());
        assert_eq!(no_index.outlinks.len(), 1);

        let no_follow = engine
            .run(&root, "http://example.com/", Directives { no_index: false, no_follow: true })
            .unwrap();
        assert_eq!(no_follow.text, "Text T");
        assert!(no_follow.outlinks.is_empty());
    }

    #[test]
    fn test_run_bad_base_url_is_error() {
        let engine = NodeFilter::new(&options("blacklist", "div;id;nav"));
        let root = dom::parse_fragment("<p>x</p>");
        let err = engine.run(&root, "not a url", Directives::default()).unwrap_err();
        assert!(matches!(err, Error::BaseUrl { .. }));
    }

    #[test]
    fn test_filter_passes_through_when_disabled() {
        let engine = NodeFilter::default();
        let root = dom::parse_fragment("<p>x</p>");
        let mut record = ParseRecord::new("http://example.com/", "not a url");
        record.text = "parser text".to_string();

        let out = engine.filter(record.clone(), &root, Directives::default());
        assert_eq!(out, record);
    }

    #[test]
    fn test_filter_passes_through_when_directives_forbid_all() {
        let engine = NodeFilter::new(&options("blacklist", "p;id;x"));
        let root = dom::parse_fragment(r#"<p id="x">x</p>"#);
        let record = ParseRecord::new("http://example.com/", "http://example.com/");

        let out = engine.filter(
            record.clone(),
            &root,
            Directives { no_index: true, no_follow: true },
        );
        assert_eq!(out, record);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NodeFilter>();
    }
}
