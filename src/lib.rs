pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub(crate) mod flight;
pub mod http;
pub mod inventory;
pub mod registry;
pub mod scrape;
pub mod search;
pub mod server;
pub mod service;
pub mod tools;
pub mod tracing;
pub mod types;

pub use cache::{CacheSettings, CacheStats, ResultCache};
pub use error::{LookupError, RegistryError, Result};
pub use fetch::{FetchResponse, Fetcher};
pub use inventory::InventoryDecoder;
pub use registry::{AdapterKind, Category, SourceDescriptor, SourceRegistry, Strategy};
pub use search::SymbolIndex;
pub use service::{LookupService, SourceInfo};
pub use types::{LookupOutcome, MAX_RESULTS, QueryResult, SymbolLink};
