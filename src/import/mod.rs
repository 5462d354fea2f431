//! Import - turn author-maintained quote files into stored collection documents.
//!
//! Two file layouts are understood:
//!
//! - general quotes: a JSON array of strings, each `"text - author, source"`
//!   (author and source are optional);
//! - sci-fi quotes: `{ "quotes": [{ "line", "name", "source" }] }`.
//!
//! Each import replaces the kind's collection document whole.

mod seed;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::quote::{CollectionDocument, Kind, Quote};
use crate::store::{QuoteStore, StoreError};

pub use seed::SeedFiles;

/// Author recorded for general quotes that name nobody.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Error type for quote imports.
#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ImportError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ImportError::Store(e) => write!(f, "failed to store quotes: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Parse { source, .. } => Some(source),
            ImportError::Store(e) => Some(e),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::Store(err)
    }
}

/// Outcome of importing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub kind: Kind,
    pub imported: usize,
    /// Version of the stored document after the write; 1 means it was created.
    pub version: u64,
}

#[derive(Deserialize)]
struct ScifiFile {
    quotes: Vec<ScifiEntry>,
}

#[derive(Deserialize)]
struct ScifiEntry {
    line: String,
    name: String,
    source: String,
}

impl ScifiEntry {
    fn into_quote(self) -> Quote {
        Quote {
            text: self.line,
            author: format!("{} ({})", self.name, self.source),
            source: Some(self.source),
        }
    }
}

/// Parse one `"text - author, source"` line.
///
/// The last `" - "` separates the text from the attribution; the first comma
/// in the attribution separates author from source.
pub fn parse_general_line(line: &str) -> Quote {
    let Some(dash) = line.rfind(" - ") else {
        return Quote::new(line.trim(), UNKNOWN_AUTHOR);
    };

    let text = line[..dash].trim();
    let attribution = line[dash + 3..].trim();

    match attribution.split_once(',') {
        Some((author, source)) => {
            let quote = Quote::new(text, author.trim());
            match source.trim() {
                "" => quote,
                source => quote.with_source(source),
            }
        }
        None => Quote::new(text, attribution),
    }
}

/// Parse the general quotes file layout.
pub fn parse_general(json: &str) -> Result<Vec<Quote>, serde_json::Error> {
    let lines: Vec<String> = serde_json::from_str(json)?;
    Ok(lines.iter().map(|line| parse_general_line(line)).collect())
}

/// Parse the sci-fi quotes file layout.
pub fn parse_scifi(json: &str) -> Result<Vec<Quote>, serde_json::Error> {
    let file: ScifiFile = serde_json::from_str(json)?;
    Ok(file.quotes.into_iter().map(ScifiEntry::into_quote).collect())
}

/// Read a quote file of the given kind into a collection document.
pub fn load_collection(kind: Kind, path: &Path) -> Result<CollectionDocument, ImportError> {
    debug!(kind = %kind, path = %path.display(), "reading quote file");
    let raw = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let quotes = match kind {
        Kind::General => parse_general(&raw),
        Kind::Scifi => parse_scifi(&raw),
    }
    .map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(CollectionDocument::new(kind, quotes))
}

/// Import a quote file into `store`, replacing the kind's collection document.
pub fn import_file<S>(store: &S, kind: Kind, path: &Path) -> Result<ImportReport, ImportError>
where
    S: QuoteStore + ?Sized,
{
    let document = load_collection(kind, path)?;
    let imported = document.quotes.len();
    let version = store.replace_collection(&document)?;

    if version > 1 {
        info!(kind = %kind, imported, version, "replaced quote collection");
    } else {
        info!(kind = %kind, imported, "created quote collection");
    }

    Ok(ImportReport {
        kind,
        imported,
        version,
    })
}
