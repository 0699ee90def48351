pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::dtos::{
        BatchDetectRequest, BatchDetectResponse, DetectRequest, DetectResponse, ErrorResponse,
    },
    app_state::AppState,
    health::{self, HealthResponse},
    language::Prediction,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Language Detection API"),
    paths(
        handlers::detect_language,
        handlers::detect_batch,
        health::health_check
    ),
    components(schemas(
        DetectRequest,
        BatchDetectRequest,
        DetectResponse,
        BatchDetectResponse,
        Prediction,
        ErrorResponse,
        HealthResponse
    )),
    tags(
        (name = "detection", description = "Language detection"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// API routes without middleware or state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/detect", post(handlers::detect_language))
        .route("/api/v1/detect/batch", post(handlers::detect_batch))
        .route("/api/v1/health", get(health::health_check))
}

/// Full application router: API routes, OpenAPI docs, CORS and request
/// tracing.
pub fn router(state: AppState) -> Router {
    routes()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::very_permissive()),
        )
        .with_state(state)
}
