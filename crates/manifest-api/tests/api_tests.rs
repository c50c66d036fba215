//! Integration tests for the manifest API endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use manifest_api::api::{create_router, AppState};
use manifest_lib::observability::{GeneratorMetrics, StructuredLogger};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_BODY_LIMIT: usize = 64 * 1024;

fn setup_test_app() -> Router {
    let state = Arc::new(AppState::new(
        GeneratorMetrics::new(),
        StructuredLogger::new("manifest-api-test"),
    ));
    create_router(state, TEST_BODY_LIMIT)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_generate_deployment_with_namespace() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/generate",
            &json!({
                "resourceKind": "Deployment",
                "deployment": {
                    "metadata": { "name": "api", "namespace": "shop" },
                    "replicas": 1,
                    "containers": [{ "name": "api", "image": "api" }]
                },
                "includeNamespace": true
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    assert_eq!(body["success"], true);
    let manifest = body["manifest"].as_str().unwrap();
    assert!(manifest.starts_with("apiVersion: v1\nkind: Namespace\n"));
    assert!(manifest.contains("kind: Deployment\n"));

    let warnings: Vec<&str> = body["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(warnings.iter().any(|w| w.contains("less than 2 replicas")));

    assert_eq!(body["deploymentOrder"].as_array().unwrap().len(), 8);
    assert!(body["relatedResources"].is_array());
    assert!(body["deploymentCommands"].is_array());
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn test_generate_rejects_missing_payload() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/generate",
            &json!({
                "resourceKind": "Service",
                "configMap": { "metadata": { "name": "settings" } }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("service"));
}

#[tokio::test]
async fn test_generate_rejects_unknown_kind() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/generate",
            &json!({ "resourceKind": "NetworkPolicy" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "invalid request body");
    assert_eq!(body["details"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_generate_rejects_invalid_input() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/generate",
            &json!({
                "resourceKind": "Service",
                "service": { "metadata": { "name": "web" }, "selector": { "app": "web" } }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid Service input");
    assert_eq!(
        body["details"],
        json!(["Service must declare at least one port"])
    );
}

#[tokio::test]
async fn test_validate_reports_errors_and_advisories() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/validate",
            &json!({
                "resourceKind": "HorizontalPodAutoscaler",
                "hpa": {
                    "metadata": { "name": "api" },
                    "scaleTargetRef": { "name": "api" },
                    "minReplicas": 4,
                    "maxReplicas": 2
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(!body["warnings"].as_array().unwrap().is_empty());
    assert!(!body["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_accepts_valid_input() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/kubernetes/validate",
            &json!({
                "resourceKind": "ConfigMap",
                "configMap": { "metadata": { "name": "settings" }, "data": { "mode": "fast" } }
            }),
        ))
        .await
        .unwrap();

    let body = read_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn test_deployment_order_endpoint() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/kubernetes/deployment-order")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let order = body["deploymentOrder"].as_array().unwrap();
    assert_eq!(order.len(), 8);
    assert_eq!(order[0]["step"], 1);
    assert_eq!(order[7]["resourceKinds"], json!(["HorizontalPodAutoscaler"]));
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_generator_metrics() {
    let app = setup_test_app();

    // Record something so every family has at least one sample
    let metrics = GeneratorMetrics::new();
    metrics.observe_generation_latency(0.001);
    metrics.add_documents(manifest_lib::ResourceKind::ConfigMap, 1);
    metrics.inc_validation_failures(manifest_lib::ResourceKind::Service);
    metrics.add_warnings(1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains("manifest_generator_generation_latency_seconds"));
    assert!(text.contains("manifest_generator_documents_generated_total"));
    assert!(text.contains("manifest_generator_validation_failures_total"));
    assert!(text.contains("manifest_generator_warnings_emitted_total"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = setup_test_app();

    let padding = "x".repeat(TEST_BODY_LIMIT + 1);
    let response = app
        .oneshot(post_json(
            "/api/kubernetes/generate",
            &json!({ "resourceKind": "ConfigMap", "padding": padding }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
