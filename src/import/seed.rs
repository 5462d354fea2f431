//! SeedFiles - connector that builds an in-memory store from quote files.

use std::path::PathBuf;

use tracing::{info, warn};

use super::import_file;
use crate::quote::Kind;
use crate::store::{Connector, InMemoryQuoteStore, StoreError};

/// Quote files to load on connect, one optional path per kind.
///
/// A missing file leaves that kind empty. A file that exists but cannot be
/// read or parsed fails the connection, so the handle retries on next use.
#[derive(Debug, Clone, Default)]
pub struct SeedFiles {
    general: Option<PathBuf>,
    scifi: Option<PathBuf>,
}

impl SeedFiles {
    pub fn new(general: impl Into<PathBuf>, scifi: impl Into<PathBuf>) -> Self {
        Self {
            general: Some(general.into()),
            scifi: Some(scifi.into()),
        }
    }

    /// Set the general quotes file.
    pub fn general(mut self, path: impl Into<PathBuf>) -> Self {
        self.general = Some(path.into());
        self
    }

    /// Set the sci-fi quotes file.
    pub fn scifi(mut self, path: impl Into<PathBuf>) -> Self {
        self.scifi = Some(path.into());
        self
    }

    fn path(&self, kind: Kind) -> Option<&PathBuf> {
        match kind {
            Kind::General => self.general.as_ref(),
            Kind::Scifi => self.scifi.as_ref(),
        }
    }
}

impl Connector for SeedFiles {
    type Store = InMemoryQuoteStore;

    fn connect(&self) -> Result<InMemoryQuoteStore, StoreError> {
        let store = InMemoryQuoteStore::new();

        for kind in Kind::ALL {
            let Some(path) = self.path(kind) else {
                continue;
            };
            if !path.exists() {
                warn!(kind = %kind, path = %path.display(), "quote file not found, kind left empty");
                continue;
            }
            let report = import_file(&store, kind, path)
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            info!(kind = %kind, quotes = report.imported, "seeded quote collection");
        }

        Ok(store)
    }
}
