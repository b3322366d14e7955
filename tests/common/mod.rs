//! Shared test constants and helpers for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Three-entry bibliography exercising an `@string` abbreviation, an arXiv
/// venue, and a nonstandard `@software` entry type.
///
/// Keys in source order: `Smith:2020`, `lee2021`, `tool2022`.
pub const SAMPLE_BIB: &str = r#"@string{nat = "Nature"}

@article{Smith:2020,
  author = {Alice Smith and Bob Jones},
  title = {A Study of Things},
  journal = nat,
  volume = {5},
  pages = {1-10},
  year = {2020},
}

@article{lee2021,
  author = {Carol Lee and Dan Park and Eve Moore},
  title = {Preprint Results},
  journal = {arXiv preprint arXiv:2101.00001},
  year = {2021},
}

@software{tool2022,
  author = {Zed Quinn and others},
  title = {Tool},
  url = {https://example.org/tool?a=1&b=2},
  year = {2022},
}
"#;

/// Bibliography with TeX markup left for the formatter: accents, `\emph`,
/// `--` in pages, a brace-protected corporate author, and a duplicated key.
///
/// Keys in source order: `godel1931`, `acme`, `acme`.
pub const TEX_BIB: &str = r#"@article{godel1931,
  author = {Kurt G{\"o}del and Paul Erd\H{o}s},
  title = {On \emph{Formally} Undecidable Propositions},
  journal = {Monatshefte f{\"u}r Mathematik},
  pages = {1--10},
  year = {1931},
}

@techreport{acme,
  author = {{Bob and Sons} and Ann Lee},
  title = {Annual Report},
  year = {2019},
}

@misc{acme,
  title = {Duplicate Key},
}
"#;

/// Create a temporary file with `content` and the given extension.
pub fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
