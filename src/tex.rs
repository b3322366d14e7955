//! Conservative TeX markup removal for bibliography text fields.
//!
//! This is not a TeX parser. It unwraps `\command{...}`, drops accent
//! commands while keeping the accented letter, and strips leftover
//! backslashes and braces.

use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[A-Za-z@]+(?:\s*\*)?\s*\{([^}]*)\}").unwrap());

static ACCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\\[`'"^~=.uvHcdbk]?\{?([A-Za-z])\}?"#).unwrap());

static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\{}]").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips TeX markup from `s`, returning plain text with collapsed whitespace.
///
/// Accents are dropped rather than composed: `\'{e}` becomes `e`.
/// Empty input yields an empty string.
///
/// # Example
///
/// ```
/// use bib2html::tex_normalize;
///
/// assert_eq!(tex_normalize(r"\textbf{Hello} \'a world"), "Hello a world");
/// ```
pub fn tex_normalize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let s = COMMAND_RE.replace_all(s, "$1");
    let s = ACCENT_RE.replace_all(&s, "$1");
    let s = MARKUP_RE.replace_all(&s, "");
    WHITESPACE_RE.replace_all(&s, " ").trim().to_string()
}
