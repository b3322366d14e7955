//! bib2html: convert a BibTeX bibliography into an HTML reference list.
//!
//! This library provides functionality to:
//! - Load BibTeX files into ordered entry records
//! - Strip TeX markup from text fields
//! - Format author lists into full citation and short display forms
//! - Render entries as `<li>` items with `data-*` metadata for client-side use

pub mod authors;
pub mod bibtex;
pub mod entry;
pub mod html;
pub mod tex;

pub use authors::{
    format_authors, initials, parse_name, split_authors, AuthorList, Name, DEFAULT_LONG_THRESHOLD,
};
pub use bibtex::{
    load_entries, normalize_entry_types, parse_bibliography, parse_with, BibError,
    BiblatexParser, EntryParser, EntryRecord,
};
pub use entry::{render_entry, FormatOptions, RenderedEntry};
pub use html::{escape_html, normalize_id, render_html, render_item};
pub use tex::tex_normalize;
