use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub classifier: Option<String>,
    pub supported_languages: usize,
    pub hinglish_enabled: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Model loaded and serving", body = HealthResponse),
        (status = 503, description = "Model not loaded yet", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let classifier = state.detector.classifier();
    let model_loaded = classifier.is_loaded();

    let response = HealthResponse {
        status: if model_loaded { "healthy" } else { "unavailable" }.to_string(),
        model_loaded,
        classifier: classifier.name().map(str::to_string),
        supported_languages: classifier.label_count(),
        hinglish_enabled: state.detector.settings().hinglish_enabled,
    };

    if model_loaded {
        (StatusCode::OK, Json(response))
    } else {
        warn!("Health check failed: language model not loaded");
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
