//! Whitespace canonicalization applied to extracted text before chunking

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Collapse whitespace runs to a single space, newline runs to a single
/// newline, and trim the ends. Pure and idempotent.
pub fn normalize(raw: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(raw, " ");
    let collapsed = NEWLINE_RUNS.replace_all(&collapsed, "\n");
    collapsed.trim().to_string()
}
