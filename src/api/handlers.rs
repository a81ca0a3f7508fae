//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::{CacheStats, DynamicStore, Value};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, KeysResponse, ResetResponse, SetRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The store has no locking of its own, so every request goes through this
/// `RwLock`. Lookups take the write half because a hit reorders the list.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<DynamicStore>>,
}

impl AppState {
    pub fn new(cache: DynamicStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Builds the store from configuration.
    ///
    /// # Errors
    /// [`CacheError::InvalidCapacity`] when `max_entries` is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(DynamicStore::new(config.max_entries)?))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key_name = req.key.clone();
    let (key, value) = req.into_entry();

    let mut cache = state.cache.write().await;
    cache.put(key, value);
    debug!(key = %key_name, size = cache.size(), "stored entry");

    Ok(Json(SetResponse::new(key_name, cache.size())))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup = Value::from(key.as_str());

    let mut cache = state.cache.write().await;
    match cache.get(&lookup) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key succeeds with `removed: false`.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let lookup = Value::from(key.as_str());

    let mut cache = state.cache.write().await;
    let removed = cache.del(&lookup).is_some();

    Json(DeleteResponse::new(key, removed))
}

/// Handler for POST /reset
pub async fn reset_handler(State(state): State<AppState>) -> Json<ResetResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.size();
    cache.reset();

    Json(ResetResponse::new(cleared))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.read().await;
    Json(KeysResponse::new(cache.ordered_keys(), cache.capacity()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats: CacheStats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
