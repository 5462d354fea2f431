//! Import and seeding integration tests.

use std::fs;
use std::path::PathBuf;

use quotehub::{
    import_file, select_from_kind, Connector, ImportError, InMemoryQuoteStore, Kind, QuoteStore,
    SeedFiles, StoreError, StoreHandle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

const GENERAL: &str = r#"[
    "The only way out is through. - Robert Frost, A Servant to Servants",
    "Simplicity is prerequisite for reliability. - Edsger Dijkstra",
    "Whatever you are, be a good one."
]"#;

const SCIFI: &str = r#"{
    "quotes": [
        { "line": "Do. Or do not. There is no try.", "name": "Yoda", "source": "The Empire Strikes Back" },
        { "line": "I've seen things you people wouldn't believe.", "name": "Roy Batty", "source": "Blade Runner" }
    ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn import_creates_then_replaces_collection() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "quotes.json", GENERAL);
    let store = InMemoryQuoteStore::new();

    let report = import_file(&store, Kind::General, &path).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.version, 1);

    let doc = store.get_collection(Kind::General).unwrap().unwrap();
    assert!(doc.is_consistent());
    assert_eq!(doc.quotes[0].author, "Robert Frost");
    assert_eq!(doc.quotes[0].source.as_deref(), Some("A Servant to Servants"));
    assert_eq!(doc.quotes[2].author, "Unknown");

    let report = import_file(&store, Kind::General, &path).unwrap();
    assert_eq!(report.version, 2);
}

#[test]
fn import_scifi_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "sci-fi-quotes.json", SCIFI);
    let store = InMemoryQuoteStore::new();

    import_file(&store, Kind::Scifi, &path).unwrap();
    let quote = store.quote_at(Kind::Scifi, 1).unwrap().unwrap();
    assert_eq!(quote.author, "Roy Batty (Blade Runner)");
    assert_eq!(store.count(Kind::Scifi).unwrap(), Some(2));
}

#[test]
fn import_reports_missing_and_malformed_files() {
    let dir = TempDir::new().unwrap();
    let store = InMemoryQuoteStore::new();

    let err = import_file(&store, Kind::General, &dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));

    // A sci-fi layout is not a valid general file.
    let path = write(&dir, "quotes.json", SCIFI);
    let err = import_file(&store, Kind::General, &path).unwrap_err();
    assert!(matches!(err, ImportError::Parse { .. }));
    assert!(store.get_collection(Kind::General).unwrap().is_none());
}

#[test]
fn seed_files_populate_both_kinds() {
    let dir = TempDir::new().unwrap();
    let seeds = SeedFiles::new(
        write(&dir, "quotes.json", GENERAL),
        write(&dir, "sci-fi-quotes.json", SCIFI),
    );

    let store = seeds.connect().unwrap();
    assert_eq!(store.count(Kind::General).unwrap(), Some(3));
    assert_eq!(store.count(Kind::Scifi).unwrap(), Some(2));

    let mut rng = StdRng::seed_from_u64(12);
    let selection = select_from_kind(&store, Kind::Scifi, &mut rng).unwrap();
    assert!(selection.quote.author.ends_with(')'));
}

#[test]
fn seed_files_tolerate_missing_kind() {
    let dir = TempDir::new().unwrap();
    let seeds = SeedFiles::new(
        write(&dir, "quotes.json", GENERAL),
        dir.path().join("absent.json"),
    );

    let store = seeds.connect().unwrap();
    assert!(store.get_collection(Kind::Scifi).unwrap().is_none());
    assert_eq!(store.count(Kind::General).unwrap(), Some(3));
}

#[test]
fn malformed_seed_fails_connect_until_fixed() {
    let dir = TempDir::new().unwrap();
    let general = write(&dir, "quotes.json", "not json");
    let handle = StoreHandle::new(SeedFiles::default().general(general.clone()));

    let err = handle.get().err().unwrap();
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert!(!handle.is_connected());

    fs::write(&general, GENERAL).unwrap();
    let store = handle.get().unwrap();
    assert_eq!(store.count(Kind::General).unwrap(), Some(3));
}

#[test]
fn seed_files_builder_sets_single_kind() {
    let dir = TempDir::new().unwrap();
    let seeds = SeedFiles::default().scifi(write(&dir, "sci-fi-quotes.json", SCIFI));

    let store = seeds.connect().unwrap();
    assert_eq!(store.count(Kind::Scifi).unwrap(), Some(2));
    assert!(store.get_collection(Kind::General).unwrap().is_none());
}
