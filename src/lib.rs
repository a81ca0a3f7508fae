//! lru_store - a bounded key/value store with strict LRU eviction
//!
//! The core is [`cache::LruStore`]: a hash index over an arena-backed
//! recency list. The `api` module wraps a store of dynamic [`cache::Value`]s
//! in an HTTP interface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{LruStore, Value};
pub use config::Config;
pub use error::{CacheError, Result};
