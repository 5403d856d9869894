use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScaffoldError;

// ASCII lowercase, digits, CJK unified ideographs (U+4E00..U+9FA5), whitespace, `_` and `-`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\x{4e00}-\x{9fa5}\s_-]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turn a page title into the identifier used for both file names and the collection lookup.
///
/// May return an empty string; use [`derive`] when an empty slug must be rejected.
pub(crate) fn to_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}

pub(crate) fn derive(title: &str) -> Result<String, ScaffoldError> {
    let slug = to_slug(title);
    if slug.is_empty() {
        return Err(ScaffoldError::EmptySlug(title.to_string()));
    }
    Ok(slug)
}
