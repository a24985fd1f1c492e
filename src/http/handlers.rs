use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET /
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "WebSocket Server is running!")
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
