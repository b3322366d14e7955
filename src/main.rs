//! CLI for bib2html - Convert a BibTeX file into an HTML reference list.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bib2html::{load_entries, render_entry, render_html, FormatOptions, RenderedEntry};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Convert a BibTeX bibliography into an HTML reference list
#[derive(Parser)]
#[command(name = "bib2html")]
#[command(version)]
#[command(after_help = "\
Examples:
  bib2html references.bib bib.html
  bib2html references.bib bib.html --long-threshold 4
  bib2html references.bib refs.json --format json")]
struct Cli {
    /// Input BibTeX file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// Number of authors at which the short form becomes "First et al."
    #[arg(long, default_value_t = bib2html::DEFAULT_LONG_THRESHOLD,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    long_threshold: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `<ol id="refs-list">` fragment with data attributes
    Html,
    /// JSON array of rendered entries
    Json,
}

// ---------------------------------------------------------------------------
// AppError — exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 1 — input file does not exist
    InputNotFound(String),
    /// Exit 1 — input file unreadable or not valid BibTeX
    BibFile(String),
    /// Exit 1 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputNotFound(_) | AppError::BibFile(_) | AppError::OutputFile(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputNotFound(msg) => {
                write!(f, "input file not found: {}", msg)
            }
            AppError::BibFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: the input must be a UTF-8 BibTeX file",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bib2html=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let options = FormatOptions {
        long_threshold: cli.long_threshold,
    };
    convert_command(&cli.input, &cli.output, cli.format, &options)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Row written by `--format json`.
#[derive(Serialize)]
struct JsonEntry<'a> {
    id: &'a str,
    #[serde(flatten)]
    entry: RenderedEntry,
}

/// Convert `input` to `output` and report the entry count.
fn convert_command(
    input: &Path,
    output: &Path,
    format: Format,
    options: &FormatOptions,
) -> Result<(), AppError> {
    // 1. Check the input exists
    if !input.exists() {
        return Err(AppError::InputNotFound(input.display().to_string()));
    }

    // 2. Load and parse entries
    let records = load_entries(input)
        .map_err(|e| AppError::BibFile(format!("'{}': {}", input.display(), e)))?;
    info!(entries = records.len(), input = %input.display(), "loaded bibliography");

    // 3. Render
    let content = match format {
        Format::Html => render_html(&records, options),
        Format::Json => {
            let rows: Vec<JsonEntry> = records
                .iter()
                .map(|record| JsonEntry {
                    id: &record.id,
                    entry: render_entry(record, options),
                })
                .collect();
            serde_json::to_string_pretty(&rows)
                .map_err(|e| AppError::OutputFile(format!("serializing entries: {}", e)))?
        }
    };

    // 4. Write
    fs::write(output, &content)
        .map_err(|e| AppError::OutputFile(format!("'{}': {}", output.display(), e)))?;
    info!(output = %output.display(), "wrote reference list");

    println!("Wrote {} ({} entries)", output.display(), records.len());
    Ok(())
}
