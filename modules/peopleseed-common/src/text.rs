use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip HTML markup, keeping text content. Attribution strings on
/// Commons are routinely wrapped in anchor/span tags.
pub fn strip_html(text: &str) -> String {
    TAG_RE.replace_all(text, "").trim().to_string()
}

/// Normalize a person name for fuzzy collision detection: lowercase,
/// drop everything but ASCII alphanumerics and spaces, collapse runs
/// of whitespace.
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = NON_ALNUM_RE.replace_all(lower.trim(), "");
    WS_RE.replace_all(&stripped, " ").trim().to_string()
}
