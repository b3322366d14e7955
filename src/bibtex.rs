//! BibTeX loading.
//!
//! Turns raw `.bib` text into ordered [`EntryRecord`]s. The structural parse
//! is delegated to the `biblatex` crate behind the [`EntryParser`] trait;
//! everything downstream only sees field-name to raw-string mappings, with
//! TeX markup left in place for the formatter to strip.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use biblatex::{RawBibliography, RawChunk, Spanned};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bibliography.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid BibTeX: {0}")]
    ParseError(String),

    #[error("Invalid BibTeX: undefined string {0:?}")]
    UnknownAbbreviation(String),
}

/// One bibliography entry: its citation key and raw field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: String,
    /// Lowercased field name to unescaped raw value.
    pub fields: BTreeMap<String, String>,
}

impl EntryRecord {
    pub fn new(id: impl Into<String>) -> Self {
        EntryRecord {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter, mostly useful in tests.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_lowercase(), value.into());
        self
    }

    /// Returns the raw value of `name`, or `""` if the field is absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }
}

/// Parses BibTeX source text into entry records, preserving source order.
pub trait EntryParser {
    fn parse(&self, text: &str) -> Result<Vec<EntryRecord>, BibError>;
}

/// [`EntryParser`] backed by the `biblatex` crate's raw parser.
///
/// Field text is kept exactly as written: TeX commands, inner braces and
/// `--` all reach the formatter untouched. `@string` abbreviations, the
/// `#` concatenation operator and the standard month macros (`jan` ..
/// `dec`) are expanded here. Entries sharing a citation key are all kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiblatexParser;

impl EntryParser for BiblatexParser {
    fn parse(&self, text: &str) -> Result<Vec<EntryRecord>, BibError> {
        let raw =
            RawBibliography::parse(text).map_err(|e| BibError::ParseError(e.to_string()))?;

        let mut strings: HashMap<String, String> = MONTHS
            .iter()
            .map(|(abbr, month)| (abbr.to_string(), month.to_string()))
            .collect();
        for pair in &raw.abbreviations {
            let value = expand_field(&pair.value.v, &strings)?;
            strings.insert(pair.key.v.to_lowercase(), value);
        }

        raw.entries
            .iter()
            .map(|entry| {
                let mut record = EntryRecord::new(entry.v.key.v);
                for pair in &entry.v.fields {
                    let value = expand_field(&pair.value.v, &strings)?;
                    record.fields.insert(pair.key.v.to_lowercase(), value);
                }
                Ok(record)
            })
            .collect()
    }
}

/// Month macros predefined by BibTeX.
const MONTHS: &[(&str, &str)] = &[
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Joins the parts of a raw field, substituting abbreviations.
///
/// Abbreviation names are case-insensitive.
fn expand_field(
    field: &[Spanned<RawChunk<'_>>],
    strings: &HashMap<String, String>,
) -> Result<String, BibError> {
    let mut out = String::new();
    for chunk in field {
        match &chunk.v {
            RawChunk::Normal(s) => out.push_str(s),
            RawChunk::Abbreviation(name) => {
                let value = strings
                    .get(&name.to_lowercase())
                    .ok_or_else(|| BibError::UnknownAbbreviation(name.to_string()))?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

static NONSTANDARD_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@(?:software|online|dataset)\s*\{").unwrap());

/// Rewrites `@software`, `@online` and `@dataset` entries to `@misc`.
pub fn normalize_entry_types(text: &str) -> Cow<'_, str> {
    NONSTANDARD_TYPE_RE.replace_all(text, "@misc{")
}

/// Parses BibTeX text with the default parser after normalizing entry types.
pub fn parse_bibliography(text: &str) -> Result<Vec<EntryRecord>, BibError> {
    parse_with(&BiblatexParser, text)
}

/// Parses BibTeX text with `parser` after normalizing entry types.
pub fn parse_with<P: EntryParser + ?Sized>(
    parser: &P,
    text: &str,
) -> Result<Vec<EntryRecord>, BibError> {
    let text = normalize_entry_types(text);
    let records = parser.parse(&text)?;
    debug!(entries = records.len(), "parsed bibliography");
    Ok(records)
}

/// Loads and parses a UTF-8 BibTeX file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid BibTeX.
pub fn load_entries(path: &Path) -> Result<Vec<EntryRecord>, BibError> {
    let content = fs::read_to_string(path)?;
    parse_bibliography(&content)
}
