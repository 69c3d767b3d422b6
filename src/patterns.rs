//! Compiled regex patterns.
//!
//! All patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// A run of ASCII whitespace (space, tab, newline, vertical tab, form feed,
/// carriage return). Non-breaking spaces are content and are kept.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("WHITESPACE_RUN regex"));

/// `nofollow` as a whole token of a `rel` attribute.
pub static REL_NOFOLLOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)nofollow(?:\s|$)").expect("REL_NOFOLLOW regex"));
