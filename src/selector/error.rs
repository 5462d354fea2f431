//! Error types for quote selection.

use std::error::Error;
use std::fmt;

use super::Strategy;
use crate::quote::Kind;
use crate::store::StoreError;

/// Error type for quote selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The kind's collection is missing or holds no quotes.
    NotFound { kind: Kind },
    /// The store failed on the last path tried for the kind.
    Store {
        kind: Kind,
        path: Strategy,
        source: StoreError,
    },
    /// Every kind was tried and none produced a quote.
    NoQuotesAvailable { failures: Vec<SelectError> },
}

impl SelectError {
    /// True if the failure only ever saw empty collections, never a store error.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            SelectError::NotFound { .. } => true,
            SelectError::Store { .. } => false,
            SelectError::NoQuotesAvailable { failures } => {
                failures.iter().all(SelectError::is_empty_collection)
            }
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        if self.is_empty_collection() {
            404
        } else {
            500
        }
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::NotFound { kind } => write!(f, "no quotes found for kind {}", kind),
            SelectError::Store { kind, path, source } => write!(
                f,
                "store error on {} path for kind {}: {}",
                path, kind, source
            ),
            SelectError::NoQuotesAvailable { failures } => {
                write!(f, "no quotes available from any collection")?;
                for (i, failure) in failures.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, failure)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for SelectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SelectError::Store { source, .. } => Some(source),
            _ => None,
        }
    }
}
