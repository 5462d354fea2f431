mod config;
mod import;
mod quote;
mod selector;
mod store;

#[cfg(feature = "http")]
pub mod http;

pub use config::{Config, ConfigError};
pub use import::{
    import_file, load_collection, parse_general, parse_general_line, parse_scifi, ImportError,
    ImportReport, SeedFiles, UNKNOWN_AUTHOR,
};
pub use quote::{CollectionDocument, Kind, ParseKindError, Quote};
pub use selector::{
    first_success, random_index, select_from_kind, select_random_quote, AttemptError,
    SelectError, Selection, Strategy,
};
pub use store::{Connector, InMemoryQuoteStore, QuoteStore, StoreError, StoreHandle};
