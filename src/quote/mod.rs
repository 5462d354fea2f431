//! Quote model - quotes, collection kinds, and the stored collection document.
//!
//! Every kind of quote lives in exactly one [`CollectionDocument`], stored under
//! the kind's document key. The document is replaced whole by the import
//! process and is only ever read by the selector.
//!
//! ## Example
//!
//! ```ignore
//! use quotehub::{CollectionDocument, Kind, Quote};
//!
//! let doc = CollectionDocument::new(
//!     Kind::General,
//!     vec![Quote::new("Stay hungry.", "Stewart Brand")],
//! );
//! assert_eq!(doc.id(), "quotes_collection");
//! assert_eq!(doc.count, 1);
//! ```

mod kind;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use kind::{Kind, ParseKindError};

/// A single quote.
///
/// Documents written by older import runs use the short field names `q` and
/// `a`; both spellings are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    #[serde(alias = "q")]
    pub text: String,
    #[serde(alias = "a")]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// The stored aggregate holding every quote of one kind.
///
/// `count` is expected to equal `quotes.len()`. Documents built through
/// [`CollectionDocument::new`] always satisfy this; documents read back from a
/// store are not re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDocument {
    #[serde(alias = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub count: u64,
    pub created_at: DateTime<Utc>,
}

impl CollectionDocument {
    /// Build a document for `kind`, stamping `count` and `createdAt`.
    pub fn new(kind: Kind, quotes: Vec<Quote>) -> Self {
        Self {
            kind,
            count: quotes.len() as u64,
            quotes,
            created_at: Utc::now(),
        }
    }

    /// Storage key of this document.
    pub fn id(&self) -> &'static str {
        self.kind.document_id()
    }

    /// Whether the stored `count` matches the actual number of quotes.
    pub fn is_consistent(&self) -> bool {
        self.count == self.quotes.len() as u64
    }
}
