//! Symbolic asset references embedded in shot prompts.
//!
//! A reference is written `{{CODE}}` where `CODE` is one or more uppercase
//! ASCII letters, digits, or underscores. The code is the identity token's
//! `reference_code`.

use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern matching `{{CODE}}` references; group 1 is the code.
pub const REFERENCE_PATTERN: &str = r"\{\{([A-Z0-9_]+)\}\}";

/// Compiled once and shared read-only; `Regex` carries no per-search state.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REFERENCE_PATTERN).expect("valid regex"));

/// Extract every reference code from `text`, in order of appearance.
///
/// Duplicates are preserved. Text without references yields an empty vec.
pub fn extract_references(text: &str) -> Vec<&str> {
    REFERENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
