//! HTTP surface for the quote selector.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/random-quote[?kind=general|scifi]` - random quote from any kind,
//!   falling back to the other kind when the chosen one fails.
//! - `GET /api/quotes/random` - random general quote.
//! - `GET /api/quotes/scifi/random` - random sci-fi quote.
//! - `GET /health` - `{ "ok": true, "connected": bool, "kinds": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quotehub::{http, SeedFiles, StoreHandle};
//!
//! let handle = Arc::new(StoreHandle::new(SeedFiles::new(
//!     "data/quotes.json",
//!     "data/sci-fi-quotes.json",
//! )));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(handle.clone());
//!
//! // Or serve directly
//! http::serve(handle, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::quote::{Kind, Quote};
use crate::selector::{select_from_kind, select_random_quote, SelectError, Selection};
use crate::store::{Connector, StoreError, StoreHandle};

/// Shared state for the quote routes.
struct AppState<C: Connector> {
    handle: Arc<StoreHandle<C>>,
}

impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

/// Body of a successful quote response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote: Quote,
}

#[derive(Debug, Deserialize)]
struct RandomQuoteParams {
    kind: Option<String>,
}

enum Failure {
    Connection(StoreError),
    Select(SelectError),
}

/// Build an axum `Router` serving quotes from the given store handle.
pub fn router<C: Connector + 'static>(handle: Arc<StoreHandle<C>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<C>))
        .route("/api/random-quote", get(random_quote_handler::<C>))
        .route("/api/quotes/random", get(general_quote_handler::<C>))
        .route("/api/quotes/scifi/random", get(scifi_quote_handler::<C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { handle })
}

/// Serve quotes over HTTP at the given address (e.g. `"0.0.0.0:3000"`) until
/// ctrl-c.
pub async fn serve<C: Connector + 'static>(
    handle: Arc<StoreHandle<C>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(handle);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "quote server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down quote server");
}

/// `GET /health`
async fn health_handler<C: Connector + 'static>(
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    let kinds: Vec<&str> = Kind::ALL.iter().map(Kind::as_str).collect();
    Json(json!({
        "ok": true,
        "connected": state.handle.is_connected(),
        "kinds": kinds,
    }))
}

/// `GET /api/random-quote` - optional `kind` query selects the preferred kind.
async fn random_quote_handler<C: Connector + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<RandomQuoteParams>,
) -> Response {
    let preferred = match params.kind.as_deref().map(str::parse::<Kind>).transpose() {
        Ok(kind) => kind,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
                .into_response()
        }
    };

    run_selection(state, "No quotes found", move |store, rng| {
        select_random_quote(store, preferred, rng)
    })
    .await
}

/// `GET /api/quotes/random`
async fn general_quote_handler<C: Connector + 'static>(
    State(state): State<AppState<C>>,
) -> Response {
    run_selection(state, "No quotes found", |store, rng| {
        select_from_kind(store, Kind::General, rng)
    })
    .await
}

/// `GET /api/quotes/scifi/random`
async fn scifi_quote_handler<C: Connector + 'static>(
    State(state): State<AppState<C>>,
) -> Response {
    run_selection(state, "No sci-fi quotes found", |store, rng| {
        select_from_kind(store, Kind::Scifi, rng)
    })
    .await
}

/// Connect (if needed) and run `select` on the blocking pool, then map the
/// outcome to a response.
async fn run_selection<C, F>(
    state: AppState<C>,
    not_found: &'static str,
    select: F,
) -> Response
where
    C: Connector + 'static,
    F: FnOnce(&C::Store, &mut ThreadRng) -> Result<Selection, SelectError> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        let store = state.handle.get().map_err(Failure::Connection)?;
        let mut rng = rand::rng();
        select(&*store, &mut rng).map_err(Failure::Select)
    })
    .await;

    match outcome {
        Ok(Ok(selection)) => (
            StatusCode::OK,
            Json(QuoteResponse {
                quote: selection.quote,
            }),
        )
            .into_response(),
        Ok(Err(Failure::Connection(e))) => {
            error!(error = %e, "quote store connection failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database connection failed", "details": e.to_string() })),
            )
                .into_response()
        }
        Ok(Err(Failure::Select(e))) if e.is_empty_collection() => {
            warn!(error = %e, "no quotes to serve");
            (StatusCode::NOT_FOUND, Json(json!({ "error": not_found }))).into_response()
        }
        Ok(Err(Failure::Select(e))) => {
            error!(error = %e, "failed to retrieve quote");
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(json!({ "error": "Failed to retrieve quote", "details": e.to_string() })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "quote selection task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to retrieve quote", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}
