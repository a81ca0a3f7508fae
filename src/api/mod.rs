//! API Module
//!
//! HTTP handlers and routing that expose an [`LruStore`](crate::cache::LruStore)
//! of dynamic values over a small REST interface.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
