//! StoreHandle - lazily-opened, reused store connection.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::{QuoteStore, StoreError};

/// Opens a connection to a quote store.
///
/// Closures returning `Result<S, StoreError>` are connectors.
pub trait Connector: Send + Sync {
    type Store: QuoteStore + 'static;

    fn connect(&self) -> Result<Self::Store, StoreError>;
}

impl<F, S> Connector for F
where
    F: Fn() -> Result<S, StoreError> + Send + Sync,
    S: QuoteStore + 'static,
{
    type Store = S;

    fn connect(&self) -> Result<S, StoreError> {
        self()
    }
}

/// Owns a connector and the connection it opened.
///
/// The first call to [`StoreHandle::get`] connects; later calls reuse the same
/// connection. A failed connect leaves the handle empty, so the next call tries
/// again. Share it between request handlers behind an `Arc`.
pub struct StoreHandle<C: Connector> {
    connector: C,
    client: RwLock<Option<Arc<C::Store>>>,
}

impl<C: Connector> StoreHandle<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            client: RwLock::new(None),
        }
    }

    /// Return the open connection, connecting first if needed.
    pub fn get(&self) -> Result<Arc<C::Store>, StoreError> {
        {
            let client = self
                .client
                .read()
                .map_err(|_| StoreError::LockPoisoned("connection lookup"))?;
            if let Some(store) = client.as_ref() {
                return Ok(Arc::clone(store));
            }
        }

        let mut client = self
            .client
            .write()
            .map_err(|_| StoreError::LockPoisoned("connect"))?;

        // Another caller may have connected while we waited for the write lock.
        if let Some(store) = client.as_ref() {
            return Ok(Arc::clone(store));
        }

        info!("connecting to quote store");
        let store = match self.connector.connect() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = %e, "failed to connect to quote store");
                return Err(e);
            }
        };
        info!("connected to quote store");

        *client = Some(Arc::clone(&store));
        Ok(store)
    }

    /// Whether a connection is open. Never blocks: while a connect is in
    /// progress this reports `false`.
    pub fn is_connected(&self) -> bool {
        self.client
            .try_read()
            .map(|client| client.is_some())
            .unwrap_or(false)
    }

    /// Drop the current connection; the next [`StoreHandle::get`] reconnects.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut client = self
            .client
            .write()
            .map_err(|_| StoreError::LockPoisoned("reset"))?;
        *client = None;
        Ok(())
    }
}
