//! InMemoryQuoteStore - HashMap-backed quote store for serving seeded data and testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use super::{QuoteStore, StoreError};
use crate::quote::{CollectionDocument, Kind, Quote};

/// Internal stored representation of a collection document.
struct StoredDocument {
    bytes: Vec<u8>,
    version: u64,
}

/// Projection used for count lookups; other fields are skipped.
#[derive(Deserialize)]
struct CountOnly {
    #[serde(default)]
    count: Option<u64>,
}

/// Projection used for offset fetches. Only the quote at `offset` is decoded;
/// every other field and array element is skipped.
struct QuoteAtOffset {
    offset: u64,
}

impl<'de> DeserializeSeed<'de> for QuoteAtOffset {
    type Value = Option<Quote>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for QuoteAtOffset {
    type Value = Option<Quote>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a collection document")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut quote = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "quotes" {
                quote = map.next_value_seed(NthQuote(self.offset))?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(quote)
    }
}

/// Walks the `quotes` array, decoding only element `.0`.
struct NthQuote(u64);

impl<'de> DeserializeSeed<'de> for NthQuote {
    type Value = Option<Quote>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for NthQuote {
    type Value = Option<Quote>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of quotes")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        for _ in 0..self.0 {
            if seq.next_element::<IgnoredAny>()?.is_none() {
                return Ok(None);
            }
        }
        let quote = seq.next_element::<Quote>()?;
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(quote)
    }
}

/// In-memory quote store backed by a HashMap.
///
/// Storage key is the kind's document id. Documents are kept as JSON bytes so
/// reads go through the same serde path a remote document store would.
/// Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryQuoteStore {
    storage: Arc<RwLock<HashMap<String, StoredDocument>>>,
}

impl Default for InMemoryQuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryQuoteStore {
    /// Create a new empty quote store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a store pre-populated with the given documents.
    pub fn with_collections(
        documents: impl IntoIterator<Item = CollectionDocument>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        for document in documents {
            store.replace_collection(&document)?;
        }
        Ok(store)
    }

    /// Current version of a kind's document, if stored.
    pub fn version(&self, kind: Kind) -> Result<Option<u64>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("version"))?;
        Ok(storage.get(kind.document_id()).map(|s| s.version))
    }

    fn read_document<T, F>(
        &self,
        kind: Kind,
        operation: &'static str,
        f: F,
    ) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&[u8]) -> Result<Option<T>, StoreError>,
    {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))?;

        match storage.get(kind.document_id()) {
            Some(stored) => f(&stored.bytes),
            None => Ok(None),
        }
    }
}

impl QuoteStore for InMemoryQuoteStore {
    fn count(&self, kind: Kind) -> Result<Option<u64>, StoreError> {
        self.read_document(kind, "count", |bytes| {
            let projection: CountOnly = serde_json::from_slice(bytes)?;
            Ok(projection.count)
        })
    }

    fn quote_at(&self, kind: Kind, offset: u64) -> Result<Option<Quote>, StoreError> {
        self.read_document(kind, "offset fetch", |bytes| {
            let mut deserializer = serde_json::Deserializer::from_slice(bytes);
            let quote = QuoteAtOffset { offset }.deserialize(&mut deserializer)?;
            deserializer.end()?;
            Ok(quote)
        })
    }

    fn get_collection(&self, kind: Kind) -> Result<Option<CollectionDocument>, StoreError> {
        self.read_document(kind, "get", |bytes| Ok(Some(serde_json::from_slice(bytes)?)))
    }

    fn replace_collection(&self, document: &CollectionDocument) -> Result<u64, StoreError> {
        let key = document.id().to_string();
        let bytes = serde_json::to_vec(document)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("replace"))?;

        let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);

        storage.insert(
            key,
            StoredDocument {
                bytes,
                version: new_version,
            },
        );

        Ok(new_version)
    }
}
