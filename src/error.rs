//! Error types for html-node-filter.
//!
//! Configuration errors are non-fatal: the engine logs them and disables the
//! affected feature. A bad document base URL is fatal for that document only.

/// Error type for rule compilation and document filtering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Exclude mode was neither `blacklist` nor `whitelist`.
    #[error("invalid exclude mode: {0:?} (expected \"blacklist\" or \"whitelist\")")]
    InvalidExcludeMode(String),

    /// Match policy was neither `first` nor `all`.
    #[error("invalid match policy: {0:?} (expected \"first\" or \"all\")")]
    InvalidPolicy(String),

    /// A rule group did not split into the expected number of parts.
    #[error("malformed rule {group:?}: expected {expected} non-empty parts, found {found}")]
    MalformedRule {
        /// The offending rule group, as written.
        group: String,
        /// Number of parts a group must have.
        expected: usize,
        /// Number of non-empty parts actually found.
        found: usize,
    },

    /// The document's base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        /// The base URL as supplied by the pipeline.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Whether this error came from configuration (and only disables a feature).
    #[must_use]
    pub fn is_config(&self) -> bool {
        !matches!(self, Self::BaseUrl { .. })
    }
}

/// Result type alias for filtering operations.
pub type Result<T> = std::result::Result<T, Error>;
