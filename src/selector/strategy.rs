//! Selection strategies and the first-success combinator that chains them.

use std::fmt;

use rand::Rng;

use super::random_index;
use crate::quote::{Kind, Quote};
use crate::store::{QuoteStore, StoreError};

/// One way of drawing a random quote of a kind from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Read the stored count, draw an offset, fetch only that element.
    IndexedQuery,
    /// Fetch the whole collection document and draw from it in memory.
    DocumentFetch,
}

/// Why a single strategy attempt produced no quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// The store answered, but there was nothing to draw from.
    Empty,
    Store(StoreError),
}

impl From<StoreError> for AttemptError {
    fn from(err: StoreError) -> Self {
        AttemptError::Store(err)
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Empty => f.write_str("no quotes returned"),
            AttemptError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Strategy {
    /// Strategies in the order they are tried for a kind.
    pub const ORDER: [Strategy; 2] = [Strategy::IndexedQuery, Strategy::DocumentFetch];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::IndexedQuery => "indexed-query",
            Strategy::DocumentFetch => "document-fetch",
        }
    }

    /// Try to draw one quote of `kind` from `store`.
    pub fn attempt<S, R>(
        &self,
        store: &S,
        kind: Kind,
        rng: &mut R,
    ) -> Result<Quote, AttemptError>
    where
        S: QuoteStore + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Strategy::IndexedQuery => {
                let count = store.count(kind)?.unwrap_or(0);
                let offset = random_index(rng, count).ok_or(AttemptError::Empty)?;
                store.quote_at(kind, offset)?.ok_or(AttemptError::Empty)
            }
            Strategy::DocumentFetch => {
                let document = store.get_collection(kind)?.ok_or(AttemptError::Empty)?;
                let mut quotes = document.quotes;
                let index =
                    random_index(rng, quotes.len() as u64).ok_or(AttemptError::Empty)?;
                Ok(quotes.swap_remove(index as usize))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `attempt` over `strategies` in order and return the first success along
/// with the strategy that produced it. If every strategy fails, all failures
/// are returned in the order they happened.
pub fn first_success<S, T, E, F>(
    strategies: &[S],
    mut attempt: F,
) -> Result<(S, T), Vec<(S, E)>>
where
    S: Copy,
    F: FnMut(S) -> Result<T, E>,
{
    let mut failures = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        match attempt(strategy) {
            Ok(value) => return Ok((strategy, value)),
            Err(e) => failures.push((strategy, e)),
        }
    }
    Err(failures)
}
