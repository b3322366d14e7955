//! HTML generation for the reference list.
//!
//! Produces an `<ol id="refs-list">` fragment with one `<li>` per entry.
//! Each item carries `data-*` attributes that client-side scripts read to
//! build citation popups.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::bibtex::EntryRecord;
use crate::entry::{render_entry, FormatOptions, RenderedEntry};

static ID_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-:]").unwrap());

static ARXIV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)arxiv").unwrap());

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Normalizes an entry key for use in a DOM id.
///
/// Keeps ASCII letters, digits, `_`, `-` and `:`, then lowercases.
pub fn normalize_id(raw: &str) -> String {
    ID_STRIP_RE.replace_all(raw, "").to_lowercase()
}

/// Venue text for `data-venue`; arXiv is not shown as a venue.
fn display_venue(venue: &str) -> &str {
    let venue = venue.trim();
    if ARXIV_RE.is_match(venue) {
        ""
    } else {
        venue
    }
}

/// Renders one `<li>` element for an already formatted entry.
pub fn render_item(id: &str, entry: &RenderedEntry) -> String {
    let norm_id = normalize_id(id);
    let visible = if entry.pretty_text.is_empty() {
        warn!(id = %id, "entry has no displayable fields, showing its key");
        norm_id.as_str()
    } else {
        entry.pretty_text.as_str()
    };

    let mut li = format!(
        r#"<li id="ref-{}" data-title="{}" data-short-authors="{}" data-venue="{}" data-year="{}""#,
        norm_id,
        escape_html(&entry.title),
        escape_html(&entry.short_authors),
        escape_html(display_venue(&entry.venue)),
        escape_html(&entry.year),
    );
    if !entry.url.is_empty() {
        li.push_str(&format!(r#" data-url="{}""#, escape_html(&entry.url)));
    }
    li.push('>');
    li.push_str(&escape_html(visible));
    li.push_str("</li>");
    li
}

/// Renders all records into the reference list fragment, in input order.
///
/// # Example
///
/// ```
/// use bib2html::{render_html, EntryRecord, FormatOptions};
///
/// let record = EntryRecord::new("Smith2020").with_field("title", "A Study");
/// let html = render_html(&[record], &FormatOptions::default());
/// assert!(html.starts_with("<ol id=\"refs-list\">\n<li id=\"ref-smith2020\""));
/// assert!(html.ends_with("</ol>"));
/// ```
pub fn render_html(records: &[EntryRecord], options: &FormatOptions) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(r#"<ol id="refs-list">"#.to_string());
    for record in records {
        let entry = render_entry(record, options);
        lines.push(render_item(&record.id, &entry));
    }
    lines.push("</ol>".to_string());
    lines.join("\n")
}
