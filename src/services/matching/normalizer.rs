//! Text normalization for budget line-item descriptions.
//! Handles accent stripping, symbol removal, and whitespace collapsing.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for stripping everything outside `[a-z0-9 ]`.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("Invalid regex"));

/// Canonicalize free text for comparison.
///
/// Pipeline:
/// 1. Transliterate accented/non-Latin characters via deunicode
/// 2. Lowercase
/// 3. Replace non-alphanumeric symbols with a space (avoids word fusion)
/// 4. Collapse whitespace runs and trim
///
/// The same function runs on both sides of every comparison, query and
/// candidate alike, so the scorer never compares a normalized string against a
/// raw one. Idempotent.
pub fn normalize(text: &str) -> String {
    let latin = deunicode(text).to_lowercase();
    let clean = RE_NON_ALNUM.replace_all(&latin, " ");
    clean.split_whitespace().collect::<Vec<_>>().join(" ")
}
