//! HTTP server for webcam number scanning.

use crate::config::ServerConfig;
use crate::ocr::{build_scan_service, ScanResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gasly::vision::SharedScanService;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers
struct AppState {
    scanner: SharedScanService,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Run the HTTP server
pub async fn run_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Initializing scan service...");
    let scanner = Arc::new(build_scan_service(&config.capture)?);
    info!("Scan service initialized successfully");

    let app = router(scanner);

    // Parse address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    info!("Server listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /health - Health check");
    info!("  POST /scan   - Capture a frame and scan it for numbers");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the router with CORS and request tracing
fn router(scanner: SharedScanService) -> Router {
    let state = Arc::new(AppState { scanner });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/scan", post(scan_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Capture-and-scan endpoint
async fn scan_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4().to_string();
    info!(request_id = %request_id, "Processing scan request");

    let start = Instant::now();

    let outcome = match Arc::clone(&state.scanner).scan_blocking().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Scan failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScanResponse::error(e.to_string())),
            );
        }
    };

    info!(
        request_id = %request_id,
        found = outcome.message().is_none(),
        total_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Scan completed"
    );

    (StatusCode::OK, Json(ScanResponse::from_outcome(outcome)))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use gasly::core::ScanConfig;
    use gasly::vision::fake::{StaticFrameSource, StaticRecognizer};
    use gasly::vision::{RecognizedSpan, ScanService};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(source: StaticFrameSource, recognizer: StaticRecognizer) -> Router {
        router(Arc::new(ScanService::new(
            Arc::new(source),
            Arc::new(recognizer),
            ScanConfig::new().with_warmup_ms(0),
        )))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(StaticFrameSource::blank(4, 4), StaticRecognizer::new(vec![]));
        let (status, body) = send(app, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_scan_reports_most_confident_number() {
        let app = app(
            StaticFrameSource::blank(4, 4),
            StaticRecognizer::new(vec![
                RecognizedSpan::new("A12", 0.75),
                RecognizedSpan::new("B7", 0.875),
            ]),
        );
        let (status, body) = send(app, "POST", "/scan").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "number": "7",
                "confidence": 0.875,
                "all_numbers": [
                    {"number": "12", "confidence": 0.75},
                    {"number": "7", "confidence": 0.875}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_scan_without_numbers() {
        let app = app(
            StaticFrameSource::blank(4, 4),
            StaticRecognizer::new(vec![RecognizedSpan::new("EXIT", 0.99)]),
        );
        let (status, body) = send(app, "POST", "/scan").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": false, "message": "No numbers detected in the frame"})
        );
    }

    #[tokio::test]
    async fn test_scan_camera_failure_is_500() {
        let app = app(StaticFrameSource::unavailable(), StaticRecognizer::new(vec![]));
        let (status, body) = send(app, "POST", "/scan").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Could not open webcam 'static'"}));
    }

    #[tokio::test]
    async fn test_scan_recognition_failure_is_500() {
        let app = app(
            StaticFrameSource::blank(4, 4),
            StaticRecognizer::failing("model crashed"),
        );
        let (status, body) = send(app, "POST", "/scan").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "OCR processing failed: model crashed"}));
    }

    #[tokio::test]
    async fn test_scan_requires_post() {
        let app = app(StaticFrameSource::blank(4, 4), StaticRecognizer::new(vec![]));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/scan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
