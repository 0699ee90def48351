use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    api::dtos::{
        BatchDetectRequest, BatchDetectResponse, DetectRequest, DetectResponse, ErrorResponse,
    },
    app_state::AppState,
    language::{DetectionError, DetectionSettings, Prediction, confidence_note},
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Detection(DetectionError),
    Internal(String),
}

impl From<DetectionError> for ApiError {
    fn from(err: DetectionError) -> Self {
        Self::Detection(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Detection(err @ DetectionError::NotLoaded) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            ApiError::Detection(err @ DetectionError::ClassifierFailure(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn build_response(
    text: &str,
    predictions: Vec<Prediction>,
    settings: &DetectionSettings,
) -> DetectResponse {
    let confidence_note =
        confidence_note(text, &predictions, settings).map(|note| note.message().to_string());

    DetectResponse {
        detected_language: predictions.first().cloned(),
        predictions,
        text_length: text.chars().count(),
        confidence_note,
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/detect",
    tag = "detection",
    request_body = DetectRequest,
    responses(
        (status = 200, description = "Ranked language predictions", body = DetectResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Detection failed", body = ErrorResponse),
        (status = 503, description = "Language model not loaded", body = ErrorResponse)
    )
)]
pub async fn detect_language(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let detector = state.detector.clone();
    // 0 selects the configured default
    let top_n = payload.top_n.unwrap_or(0);
    let text = payload.text;

    let response = tokio::task::spawn_blocking(move || {
        detector
            .detect(&text, top_n)
            .map(|predictions| build_response(&text, predictions, detector.settings()))
    })
    .await
    .map_err(|e| {
        error!("Detection task failed: {}", e);
        ApiError::Internal("Detection task failed".to_string())
    })?
    .inspect_err(|e| error!("Detection failed: {}", e))?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/detect/batch",
    tag = "detection",
    request_body = BatchDetectRequest,
    responses(
        (status = 200, description = "Predictions for every text, in request order", body = BatchDetectResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Detection failed", body = ErrorResponse),
        (status = 503, description = "Language model not loaded", body = ErrorResponse)
    )
)]
pub async fn detect_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchDetectRequest>, JsonRejection>,
) -> Result<Json<BatchDetectResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let detector = state.detector.clone();
    let top_n = payload.top_n.unwrap_or(0);
    let texts = payload.texts;

    let results = tokio::task::spawn_blocking(move || {
        let batch = detector.detect_batch(&texts, top_n)?;
        let blank = batch.iter().filter(|predictions| predictions.is_empty()).count();
        if blank > 0 {
            warn!(blank, "Batch contained texts without content");
        }

        Ok::<_, DetectionError>(
            texts
                .iter()
                .zip(batch)
                .map(|(text, predictions)| build_response(text, predictions, detector.settings()))
                .collect::<Vec<_>>(),
        )
    })
    .await
    .map_err(|e| {
        error!("Batch detection task failed: {}", e);
        ApiError::Internal("Detection task failed".to_string())
    })?
    .inspect_err(|e| error!("Batch detection failed: {}", e))?;

    Ok(Json(BatchDetectResponse {
        total_texts: results.len(),
        results,
    }))
}
