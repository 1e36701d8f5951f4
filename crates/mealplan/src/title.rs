use std::sync::LazyLock;

use regex::Regex;

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthesized regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("spaces regex"));

/// Comparison key for recipe titles: parenthesized parts removed, case and
/// typographic quotes folded.
pub fn normalize_title(title: &str) -> String {
    let title = PARENTHESIZED.replace_all(title, "");
    let title = SPACES.replace_all(title.trim(), " ");

    title
        .to_lowercase()
        .replace(['\u{2018}', '\u{2019}', '`'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
}
