/// Domain input handling for the checker dashboard
use regex::Regex;
use std::sync::LazyLock;

static LEADING_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid scheme pattern"));

static TRAILING_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/$").expect("valid slash pattern"));

/// Split textarea input into domains, one per line
///
/// Blank and whitespace-only lines are dropped; the remaining lines are
/// trimmed. Order is preserved and duplicates are kept, the backend decides
/// what to do with them.
pub fn parse_domains(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Label shown under the textarea, e.g. "3 domains"
pub fn domain_count_label(text: &str) -> String {
    pluralize(parse_domains(text).len(), "domain")
}

/// Strip a leading `http://` / `https://` and a single trailing slash
///
/// Examples:
/// - https://example.com/ → example.com
/// - http://blog.example.com → blog.example.com
/// - example.com → example.com
pub fn strip_scheme(domain: &str) -> String {
    let without_scheme = LEADING_SCHEME.replace(domain, "");
    TRAILING_SLASH.replace(&without_scheme, "").into_owned()
}

/// "1 result", "2 results", "0 results"
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
