//! Author list handling: brace-aware splitting, name parsing, and the
//! full and short renderings used in the reference list.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tex::tex_normalize;

/// Default author count at which the short form collapses to "First et al.".
pub const DEFAULT_LONG_THRESHOLD: usize = 3;

const SEPARATOR: &str = " and ";

static OTHERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^others?(\.|,|\s|$)").unwrap());

static ET_AL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^et\s+al\.?").unwrap());

static INITIALS_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-]+").unwrap());

/// A single author name split into family and given parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub family: String,
    pub given: String,
}

impl Name {
    fn is_empty(&self) -> bool {
        self.family.is_empty() && self.given.is_empty()
    }

    /// "Family, Given", or just "Family" when there is no given name.
    fn full(&self) -> Option<String> {
        match (self.family.is_empty(), self.given.is_empty()) {
            (false, false) => Some(format!("{}, {}", self.family, self.given)),
            (false, true) => Some(self.family.clone()),
            _ => None,
        }
    }

    /// "I. Family" form used for compact display.
    fn short(&self) -> String {
        format!("{} {}", initials(&self.given), self.family)
            .trim()
            .to_string()
    }
}

/// The two renderings of one author field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorList {
    /// Compact display form, e.g. `A. Smith & B. Jones`.
    pub short: String,
    /// Citation form, e.g. `Smith, Alice; Jones, Bob`.
    pub full: String,
}

/// Splits a BibTeX author field on ` and ` separators at brace depth zero.
///
/// Separators are matched case-insensitively. Text inside braces is never
/// split, so `{Bob and Sons}` survives as a single token. Tokens are trimmed
/// and empty tokens are dropped.
pub fn split_authors(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut rest = s;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && starts_with_separator(rest) => {
                push_token(&mut out, &current);
                current.clear();
                rest = &rest[SEPARATOR.len()..];
                continue;
            }
            _ => {}
        }
        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    push_token(&mut out, &current);

    out
}

fn starts_with_separator(s: &str) -> bool {
    s.get(..SEPARATOR.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(SEPARATOR))
}

fn push_token(out: &mut Vec<String>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        out.push(token.to_string());
    }
}

/// Parses one raw author token into a [`Name`].
///
/// `Family, Given` is used when the token contains a comma; otherwise the
/// last whitespace-separated word is the family name.
pub fn parse_name(raw: &str) -> Name {
    let text = tex_normalize(raw);

    if text.contains(',') {
        let mut parts = text.split(',').map(str::trim).filter(|p| !p.is_empty());
        let family = parts.next().unwrap_or_default().to_string();
        let given = parts.collect::<Vec<_>>().join(", ");
        return Name { family, given };
    }

    let mut words: Vec<&str> = text.split_whitespace().collect();
    match words.pop() {
        None => Name::default(),
        Some(family) => Name {
            family: family.to_string(),
            given: words.join(" "),
        },
    }
}

/// Reduces a given-name string to initials: `John Michael` becomes `J. M.`.
///
/// Hyphenated names yield one initial per part.
pub fn initials(given: &str) -> String {
    INITIALS_SPLIT_RE
        .split(given.trim())
        .filter_map(|part| part.chars().next())
        .map(|c| format!("{}.", c.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_others_marker(token: &str) -> bool {
    OTHERS_RE.is_match(token) || ET_AL_RE.is_match(token)
}

/// Renders a raw author field into its full and short forms.
///
/// `others` / `et al.` tokens are removed from the name list and turn into a
/// trailing `et al.` in the full form. The short form lists one or two
/// authors; from `long_threshold` authors upward it shows only the first
/// followed by `et al.`.
///
/// # Example
///
/// ```
/// use bib2html::format_authors;
///
/// let authors = format_authors("Alice Smith and Bob Jones", 3);
/// assert_eq!(authors.short, "A. Smith & B. Jones");
/// assert_eq!(authors.full, "Smith, Alice; Jones, Bob");
/// ```
pub fn format_authors(s: &str, long_threshold: usize) -> AuthorList {
    if s.is_empty() {
        return AuthorList::default();
    }

    let mut saw_others = false;
    let names: Vec<Name> = split_authors(s)
        .iter()
        .filter(|token| {
            let others = is_others_marker(token);
            saw_others |= others;
            !others
        })
        .map(|token| parse_name(token))
        .filter(|name| !name.is_empty())
        .collect();

    let mut full = names
        .iter()
        .filter_map(Name::full)
        .collect::<Vec<_>>()
        .join("; ");
    if saw_others {
        full = if full.is_empty() {
            "et al.".to_string()
        } else {
            format!("{}; et al.", full)
        };
    }

    // Only names with a family part count towards the short form.
    let short_names: Vec<&Name> = names.iter().filter(|n| !n.family.is_empty()).collect();
    let short = match short_names.as_slice() {
        [] if saw_others => "et al.".to_string(),
        [] => String::new(),
        [only] => only.short(),
        [first, second] => format!("{} & {}", first.short(), second.short()),
        [first, ..] if short_names.len() >= long_threshold => format!("{} et al.", first.short()),
        all => all.iter().map(|n| n.short()).collect::<Vec<_>>().join(", "),
    };

    AuthorList { short, full }
}
