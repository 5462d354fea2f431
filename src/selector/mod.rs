//! Quote Selector - uniform random quote selection with path and kind fallback.
//!
//! For a kind, the selector first tries the cheap indexed path (stored count,
//! random offset, fetch one element) and falls back to fetching the whole
//! collection document. If both paths fail for the chosen kind, the other kind
//! is tried once before giving up.
//!
//! The random source is passed in, so a seeded RNG makes selection
//! reproducible.
//!
//! ## Example
//!
//! ```ignore
//! use quotehub::{select_random_quote, InMemoryQuoteStore, Kind};
//!
//! let store = InMemoryQuoteStore::new();
//! let mut rng = rand::rng();
//! match select_random_quote(&store, Some(Kind::General), &mut rng) {
//!     Ok(selection) => println!("{}: {}", selection.quote.author, selection.quote.text),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod error;
mod strategy;

use rand::Rng;
use tracing::{debug, warn};

use crate::quote::{Kind, Quote};
use crate::store::QuoteStore;

pub use error::SelectError;
pub use strategy::{first_success, AttemptError, Strategy};

/// A selected quote and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub quote: Quote,
    pub kind: Kind,
    pub path: Strategy,
}

/// Draw an index uniformly from `[0, count)`. None when `count` is zero.
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, count: u64) -> Option<u64> {
    if count == 0 {
        None
    } else {
        Some(rng.random_range(0..count))
    }
}

/// Select a random quote of a single kind, trying each [`Strategy`] in order.
///
/// An empty or missing collection is reported as [`SelectError::NotFound`];
/// a store failure on the last path as [`SelectError::Store`].
pub fn select_from_kind<S, R>(
    store: &S,
    kind: Kind,
    rng: &mut R,
) -> Result<Selection, SelectError>
where
    S: QuoteStore + ?Sized,
    R: Rng + ?Sized,
{
    let outcome = first_success(&Strategy::ORDER, |path| {
        let result = path.attempt(store, kind, rng);
        if let Err(e) = &result {
            warn!(kind = %kind, path = %path, error = %e, "quote selection path failed");
        }
        result
    });

    match outcome {
        Ok((path, quote)) => {
            debug!(kind = %kind, path = %path, "selected quote");
            Ok(Selection { quote, kind, path })
        }
        Err(mut failures) => match failures.pop() {
            Some((path, AttemptError::Store(source))) => {
                Err(SelectError::Store { kind, path, source })
            }
            _ => Err(SelectError::NotFound { kind }),
        },
    }
}

/// Select a random quote, preferring `preferred` (or a uniformly chosen kind
/// when None) and retrying once against each other known kind.
pub fn select_random_quote<S, R>(
    store: &S,
    preferred: Option<Kind>,
    rng: &mut R,
) -> Result<Selection, SelectError>
where
    S: QuoteStore + ?Sized,
    R: Rng + ?Sized,
{
    let primary =
        preferred.unwrap_or_else(|| Kind::ALL[rng.random_range(0..Kind::ALL.len())]);
    debug!(kind = %primary, preferred = preferred.is_some(), "selecting random quote");

    let mut failures = Vec::new();
    for kind in std::iter::once(primary).chain(primary.alternates()) {
        match select_from_kind(store, kind, rng) {
            Ok(selection) => return Ok(selection),
            Err(e) => {
                warn!(kind = %kind, error = %e, "no quote from kind, trying alternative");
                failures.push(e);
            }
        }
    }

    Err(SelectError::NoQuotesAvailable { failures })
}
