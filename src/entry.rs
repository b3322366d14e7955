//! Entry formatting: one [`EntryRecord`] in, one display-ready
//! [`RenderedEntry`] out.
//!
//! Absent fields are treated as empty strings throughout, so a sparse or odd
//! entry still renders whatever it has.

use serde::Serialize;
use tracing::debug;

use crate::authors::{format_authors, DEFAULT_LONG_THRESHOLD};
use crate::bibtex::EntryRecord;
use crate::tex::tex_normalize;

/// Options controlling entry rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Author count at which the short author form becomes "First et al.".
    pub long_threshold: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            long_threshold: DEFAULT_LONG_THRESHOLD,
        }
    }
}

/// A formatted entry plus the metadata exposed to client-side code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEntry {
    /// Citation text, e.g. `Smith, A. (2020). A Study. Nature, 5, 1-10.`
    #[serde(rename = "text")]
    pub pretty_text: String,
    pub short_authors: String,
    pub title: String,
    pub venue: String,
    pub year: String,
    pub url: String,
}

/// Returns the first non-empty value among `names`, or `""`.
fn first_of<'a>(record: &'a EntryRecord, names: &[&str]) -> &'a str {
    names
        .iter()
        .map(|name| record.get(name))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Formats one entry into its citation text and metadata.
///
/// The citation reads `Authors. (Year). Title. Venue, Volume, Pages.`, with
/// each part omitted when its field is empty.
pub fn render_entry(record: &EntryRecord, options: &FormatOptions) -> RenderedEntry {
    let authors = format_authors(
        first_of(record, &["author", "editor"]),
        options.long_threshold,
    );
    let year = record.get("year");
    let title = tex_normalize(record.get("title"));
    let venue = tex_normalize(first_of(record, &["journal", "booktitle", "publisher"]));
    let volume = record.get("volume");
    let pages = first_of(record, &["pages", "page"]);

    let mut out = String::new();
    if !authors.full.is_empty() {
        out.push_str(&authors.full);
        // "et al." and initials already end in a period
        if authors.full.trim_end().ends_with('.') {
            out.push(' ');
        } else {
            out.push_str(". ");
        }
    }
    if !year.is_empty() {
        out.push_str(&format!("({}). ", year));
    }
    if !title.is_empty() {
        out.push_str(&title);
        out.push_str(". ");
    }

    let source = [venue.as_str(), volume, pages]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !source.is_empty() {
        out.push_str(&source);
        out.push('.');
    }

    let url = first_of(record, &["url", "howpublished"]).trim().to_string();

    let rendered = RenderedEntry {
        pretty_text: out.trim().to_string(),
        short_authors: authors.short,
        title,
        venue,
        year: year.to_string(),
        url,
    };
    debug!(id = %record.id, text = %rendered.pretty_text, "rendered entry");
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> EntryRecord {
        EntryRecord::new("smith2020")
            .with_field("author", "Smith, A.")
            .with_field("year", "2020")
            .with_field("title", "A Study")
            .with_field("journal", "Nature")
            .with_field("volume", "5")
            .with_field("pages", "1-10")
    }

    #[test]
    fn test_render_entry_full_article() {
        // Given: an article with every field set
        let record = article();

        // When: we render it
        let rendered = render_entry(&record, &FormatOptions::default());

        // Then: the author initial period is not doubled and parts appear in order
        assert_eq!(
            rendered.pretty_text,
            "Smith, A. (2020). A Study. Nature, 5, 1-10."
        );
        assert_eq!(rendered.short_authors, "A. Smith");
        assert_eq!(rendered.venue, "Nature");
        assert_eq!(rendered.year, "2020");
    }

    #[test]
    fn test_render_entry_adds_period_after_authors() {
        let record = EntryRecord::new("x")
            .with_field("author", "Alice Smith")
            .with_field("title", "Paper");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.pretty_text, "Smith, Alice. Paper.");
    }

    #[test]
    fn test_render_entry_falls_back_to_editor() {
        let record = EntryRecord::new("x")
            .with_field("editor", "Bob Jones")
            .with_field("year", "1999");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.pretty_text, "Jones, Bob. (1999).");
        assert_eq!(rendered.short_authors, "B. Jones");
    }

    #[test]
    fn test_render_entry_empty_author_uses_editor() {
        let record = EntryRecord::new("x")
            .with_field("author", "")
            .with_field("editor", "Bob Jones");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.short_authors, "B. Jones");
    }

    #[test]
    fn test_render_entry_venue_priority() {
        let record = EntryRecord::new("x")
            .with_field("booktitle", r"Proc. of \emph{ICML}")
            .with_field("publisher", "PMLR");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.venue, "Proc. of ICML");
        assert_eq!(rendered.pretty_text, "Proc. of ICML.");
    }

    #[test]
    fn test_render_entry_volume_without_venue() {
        let record = EntryRecord::new("x")
            .with_field("volume", "12")
            .with_field("page", "33");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.pretty_text, "12, 33.");
    }

    #[test]
    fn test_render_entry_url_fallback_and_trim() {
        let record = EntryRecord::new("x").with_field("howpublished", "  https://example.org  ");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.url, "https://example.org");

        let record = record.with_field("url", "https://a.example");
        assert_eq!(
            render_entry(&record, &FormatOptions::default()).url,
            "https://a.example"
        );
    }

    #[test]
    fn test_render_entry_others_ends_with_single_space() {
        let record = EntryRecord::new("x")
            .with_field("author", "Alice Smith and others")
            .with_field("year", "2001");
        let rendered = render_entry(&record, &FormatOptions::default());
        assert_eq!(rendered.pretty_text, "Smith, Alice; et al. (2001).");
    }

    #[test]
    fn test_render_entry_empty_record() {
        let rendered = render_entry(&EntryRecord::new("x"), &FormatOptions::default());
        assert_eq!(rendered, RenderedEntry::default());
    }

    #[test]
    fn test_render_entry_respects_long_threshold() {
        let record = EntryRecord::new("x").with_field("author", "A One and B Two and C Three");
        let options = FormatOptions { long_threshold: 5 };
        let rendered = render_entry(&record, &options);
        assert_eq!(rendered.short_authors, "A. One, B. Two, C. Three");
    }

    #[test]
    fn test_rendered_entry_serializes_camel_case() {
        let rendered = render_entry(&article(), &FormatOptions::default());
        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["shortAuthors"], "A. Smith");
        assert_eq!(json["text"], "Smith, A. (2020). A Study. Nature, 5, 1-10.");
    }
}
