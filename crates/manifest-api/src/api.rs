//! HTTP API for manifest generation, validation and Prometheus metrics

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use manifest_lib::{
    advisory::{analyze, deployment_order, suggestions, warnings, AdvisoryResult},
    render, validate, GeneratorMetrics, ManifestError, ManifestGenerator, ResourceInput,
    ResourceRequest, StructuredLogger,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::config::ApiConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: ManifestGenerator,
    pub metrics: GeneratorMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(metrics: GeneratorMetrics, logger: StructuredLogger) -> Self {
        Self {
            generator: ManifestGenerator::new(),
            metrics,
            logger,
        }
    }
}

/// Error envelope: `{success: false, error, details}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest { error: String, details: Vec<String> },
    Internal(String),
}

impl From<ManifestError> for ApiError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::Validation { kind, errors } => ApiError::BadRequest {
                error: format!("invalid {kind} input"),
                details: errors,
            },
            other if other.is_client_error() => ApiError::BadRequest {
                error: other.to_string(),
                details: Vec::new(),
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest { error, details } => (StatusCode::BAD_REQUEST, error, details),
            ApiError::Internal(message) => {
                error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                    vec![message],
                )
            }
        };

        (
            status,
            Json(json!({ "success": false, "error": error, "details": details })),
        )
            .into_response()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    manifest: String,
    #[serde(flatten)]
    advisory: AdvisoryResult,
    generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ValidateResponse {
    success: bool,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

fn parse_request(body: &[u8]) -> Result<ResourceInput, ApiError> {
    let request: ResourceRequest =
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
            error: "invalid request body".to_string(),
            details: vec![e.to_string()],
        })?;
    Ok(request.into_input()?)
}

/// Validate, build and analyze one resource
async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let input = parse_request(&body)?;
    let resource = &input.resource;
    let kind = input.kind();

    let report = validate(resource);
    if !report.valid {
        state.metrics.inc_validation_failures(kind);
        state
            .logger
            .log_validation_failure(kind, resource.name(), &report.errors);
    }
    report.into_result(resource)?;

    let started = Instant::now();
    let documents = state.generator.build_documents(&input);
    let manifest = render::to_yaml_stream(&documents)?;
    state
        .metrics
        .observe_generation_latency(started.elapsed().as_secs_f64());

    let advisory = analyze(&input);
    state.metrics.add_documents(kind, documents.len());
    state.metrics.add_warnings(advisory.warnings.len());
    state.logger.log_generation(
        kind,
        resource.name(),
        resource.namespace(),
        documents.len(),
        advisory.warnings.len(),
    );

    Ok(Json(GenerateResponse {
        success: true,
        manifest,
        advisory,
        generated_at: Utc::now(),
    }))
}

/// Report validation errors alongside the advisories, without building
async fn validate_resource(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ValidateResponse>, ApiError> {
    let input = parse_request(&body)?;
    let resource = &input.resource;

    let report = validate(resource);
    if !report.valid {
        state.metrics.inc_validation_failures(input.kind());
        state
            .logger
            .log_validation_failure(input.kind(), resource.name(), &report.errors);
    }

    Ok(Json(ValidateResponse {
        success: true,
        valid: report.valid,
        errors: report.errors,
        warnings: warnings(resource),
        suggestions: suggestions(resource),
    }))
}

async fn order() -> impl IntoResponse {
    Json(json!({ "success": true, "deploymentOrder": deployment_order() }))
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") }))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return ApiError::Internal(format!("failed to encode metrics: {e}")).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/kubernetes/generate", post(generate))
        .route("/api/kubernetes/validate", post(validate_resource))
        .route("/api/kubernetes/deployment-order", get(order))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Start the API server
pub async fn serve(config: ApiConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state, config.max_body_bytes);

    let addr = config.socket_addr();
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
