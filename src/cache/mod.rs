//! Cache Module
//!
//! Bounded key/value storage with strict LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;
mod value;


// Re-export public types
pub use lru::Iter;
pub use stats::CacheStats;
pub use store::LruStore;
pub use value::{Number, ObjectRef, Value};

/// Store of dynamically typed keys and values.
pub type DynamicStore = LruStore<Value, Value>;
