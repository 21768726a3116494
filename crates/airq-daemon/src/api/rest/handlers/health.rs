//! Health handler

use crate::api::rest::state::AppState;
use airq_forecast::{INDEX_CEILING, INDEX_FLOOR};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// `ok` when forecasts can be served, `degraded` otherwise
    pub status: String,
    pub model_loaded: bool,
    pub classifier: Option<String>,
    pub index_range: [u32; 2],
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint. Always answers, even without a classifier.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let model_loaded = state.model_loaded();
    let status = if model_loaded { "ok" } else { "degraded" };

    Json(HealthCheckResponse {
        status: status.to_string(),
        model_loaded,
        classifier: state.classifier_name().map(str::to_string),
        index_range: [INDEX_FLOOR, INDEX_CEILING],
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}
