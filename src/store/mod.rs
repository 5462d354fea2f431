//! Quote storage - the document-store capabilities the selector depends on.
//!
//! A store holds one [`CollectionDocument`] per [`Kind`]. Readers only need
//! three capabilities, so that is all [`QuoteStore`] asks of a backend:
//!
//! - the stored `count` of the document matching a kind,
//! - the quote at an offset within that document's `quotes` array,
//! - the whole document by kind.
//!
//! [`QuoteStore::replace_collection`] is the single write path, used by the
//! import process.
//!
//! ## Example
//!
//! ```ignore
//! use quotehub::{CollectionDocument, InMemoryQuoteStore, Kind, Quote, QuoteStore};
//!
//! let store = InMemoryQuoteStore::new();
//! store.replace_collection(&CollectionDocument::new(
//!     Kind::General,
//!     vec![Quote::new("A", "x"), Quote::new("B", "y")],
//! ))?;
//! assert_eq!(store.count(Kind::General)?, Some(2));
//! ```

mod handle;
mod in_memory;

use std::fmt;

use crate::quote::{CollectionDocument, Kind, Quote};

/// Read access to stored quote collections, plus whole-document replacement.
///
/// Implementations must be safe for concurrent reads.
pub trait QuoteStore: Send + Sync {
    /// Stored `count` of the collection document matching `kind`.
    /// Returns None if no such document exists.
    fn count(&self, kind: Kind) -> Result<Option<u64>, StoreError>;

    /// Quote at `offset` within the `quotes` array of the document matching
    /// `kind`. Returns None if the document or the offset does not exist.
    fn quote_at(&self, kind: Kind, offset: u64) -> Result<Option<Quote>, StoreError>;

    /// Fetch the entire collection document for `kind`.
    fn get_collection(&self, kind: Kind) -> Result<Option<CollectionDocument>, StoreError>;

    /// Insert or replace the collection document for `document.kind`.
    /// Returns the new document version.
    fn replace_collection(&self, document: &CollectionDocument) -> Result<u64, StoreError>;
}

/// Error type for quote store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No connection to the store could be established.
    Unavailable(String),
    /// A store operation failed; retrying or using another path may succeed.
    Transient {
        operation: &'static str,
        message: String,
    },
    /// Serialization/deserialization error.
    Serde(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "quote store unavailable: {}", msg),
            StoreError::Transient { operation, message } => {
                write!(f, "quote store {} failed: {}", operation, message)
            }
            StoreError::Serde(msg) => write!(f, "quote store serialization error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "quote store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use handle::{Connector, StoreHandle};
pub use in_memory::InMemoryQuoteStore;
