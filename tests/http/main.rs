//! HTTP integration tests.
//!
//! Starts the axum router and exercises it with reqwest.
#![cfg(feature = "http")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quotehub::http::{self, QuoteResponse};
use quotehub::{
    CollectionDocument, Connector, InMemoryQuoteStore, Kind, Quote, QuoteStore, StoreError,
    StoreHandle,
};

fn collection(kind: Kind, texts: &[&str]) -> CollectionDocument {
    CollectionDocument::new(
        kind,
        texts.iter().map(|t| Quote::new(*t, "someone")).collect(),
    )
}

fn seeded(documents: Vec<CollectionDocument>) -> impl Connector<Store = InMemoryQuoteStore> {
    move || InMemoryQuoteStore::with_collections(documents.clone())
}

/// A store whose reads all fail.
struct BrokenStore;

impl BrokenStore {
    fn outage(operation: &'static str) -> StoreError {
        StoreError::Transient {
            operation,
            message: "backend offline".into(),
        }
    }
}

impl QuoteStore for BrokenStore {
    fn count(&self, _kind: Kind) -> Result<Option<u64>, StoreError> {
        Err(Self::outage("count"))
    }

    fn quote_at(&self, _kind: Kind, _offset: u64) -> Result<Option<Quote>, StoreError> {
        Err(Self::outage("offset fetch"))
    }

    fn get_collection(&self, _kind: Kind) -> Result<Option<CollectionDocument>, StoreError> {
        Err(Self::outage("get"))
    }

    fn replace_collection(&self, _document: &CollectionDocument) -> Result<u64, StoreError> {
        Err(Self::outage("replace"))
    }
}

/// Bind to port 0 and return the actual address.
async fn start_server<C: Connector + 'static>(handle: Arc<StoreHandle<C>>) -> String {
    let app = http::router(handle);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let handle = Arc::new(StoreHandle::new(seeded(vec![])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["connected"], false);
    assert_eq!(body["kinds"], serde_json::json!(["general", "scifi"]));
}

#[tokio::test]
async fn random_quote_returns_member() {
    let general = collection(Kind::General, &["A", "B", "C"]);
    let scifi = collection(Kind::Scifi, &["X", "Y"]);
    let handle = Arc::new(StoreHandle::new(seeded(vec![general.clone(), scifi.clone()])));
    let base = start_server(handle).await;
    let client = reqwest::Client::new();

    for _ in 0..10 {
        let resp = client
            .get(format!("{base}/api/random-quote"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: QuoteResponse = resp.json().await.unwrap();
        assert!(general.quotes.contains(&body.quote) || scifi.quotes.contains(&body.quote));
    }
}

#[tokio::test]
async fn random_quote_honours_kind_param() {
    let scifi = collection(Kind::Scifi, &["X"]);
    let handle = Arc::new(StoreHandle::new(seeded(vec![
        collection(Kind::General, &["A"]),
        scifi.clone(),
    ])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/api/random-quote?kind=scifi"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["quote"]["text"], "X");
    assert_eq!(body["quote"]["author"], "someone");
}

#[tokio::test]
async fn unknown_kind_param_returns_400() {
    let handle = Arc::new(StoreHandle::new(seeded(vec![])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/api/random-quote?kind=poetry"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn random_quote_falls_back_to_other_kind() {
    let handle = Arc::new(StoreHandle::new(seeded(vec![
        collection(Kind::General, &[]),
        collection(Kind::Scifi, &["X"]),
    ])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/api/random-quote?kind=general"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: QuoteResponse = resp.json().await.unwrap();
    assert_eq!(body.quote.text, "X");
}

#[tokio::test]
async fn empty_store_returns_404() {
    let handle = Arc::new(StoreHandle::new(seeded(vec![])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/api/random-quote")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No quotes found");
}

#[tokio::test]
async fn per_kind_routes_do_not_fall_back() {
    let handle = Arc::new(StoreHandle::new(seeded(vec![collection(
        Kind::General,
        &["A"],
    )])));
    let base = start_server(handle).await;

    let resp = reqwest::get(format!("{base}/api/quotes/random")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: QuoteResponse = resp.json().await.unwrap();
    assert_eq!(body.quote.text, "A");

    let resp = reqwest::get(format!("{base}/api/quotes/scifi/random"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No sci-fi quotes found");
}

#[tokio::test]
async fn connection_failure_returns_500_then_recovers() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let handle = Arc::new(StoreHandle::new(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            InMemoryQuoteStore::with_collections([collection(Kind::General, &["A"])])
        }
    }));
    let base = start_server(Arc::clone(&handle)).await;

    let resp = reqwest::get(format!("{base}/api/random-quote")).await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Database connection failed");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("connection refused"));

    let resp = reqwest::get(format!("{base}/api/random-quote")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(handle.is_connected());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn store_failure_returns_500_on_every_route() {
    let handle = Arc::new(StoreHandle::new(|| Ok::<_, StoreError>(BrokenStore)));
    let base = start_server(handle).await;

    for route in [
        "/api/random-quote",
        "/api/quotes/random",
        "/api/quotes/scifi/random",
    ] {
        let resp = reqwest::get(format!("{base}{route}")).await.unwrap();
        assert_eq!(resp.status(), 500, "{route}");

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Failed to retrieve quote", "{route}");
        let details = body["details"].as_str().unwrap();
        assert!(details.contains("backend offline"), "{route}: {details}");
    }
}
