//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::binding::HostCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::requests::validate_key;
use crate::models::{
    AddResponse, ClearResponse, DeleteManyResponse, DeleteResponse, GetManyResponse, GetResponse,
    HealthResponse, KeysRequest, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone; every clone talks to the same engine.
#[derive(Clone)]
pub struct AppState {
    pub cache: HostCache,
}

impl AppState {
    pub fn new(cache: HostCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration on the ambient tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HostCache::from_config(config)?))
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

    let timeout = req.timeout();
    let stored = timeout.resolve(state.cache.default_ttl()).is_some();
    let was_present = state.cache.set(&req.key, req.value, timeout);

    Ok(Json(SetResponse::new(req.key, was_present, stored)))
}

/// Handler for POST /add
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<AddResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let timeout = req.timeout();
    let added = state.cache.add(&req.key, req.value, timeout);

    Ok(Json(AddResponse {
        key: req.key,
        added,
    }))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get_opt(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for POST /get_many
pub async fn get_many_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<GetManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    Ok(Json(GetManyResponse {
        values: state.cache.get_many(req.keys.as_slice()),
    }))
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key succeeds; the cache treats it as a no-op.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.delete(&key);

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /delete_many
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<DeleteManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.delete_many(req.keys.as_slice());

    Ok(Json(DeleteManyResponse {
        deleted: req.keys.len(),
    }))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear();
    Json(ClearResponse::cleared())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.engine().is_sweeping()))
}
