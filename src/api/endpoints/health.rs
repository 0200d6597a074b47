//! Health check and service-info endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::AppState;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend_connected: bool,
}

/// `GET /health` — liveness plus generative backend reachability.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_connected = state.llm.check_connection().await;
    Json(HealthResponse {
        status: "healthy",
        backend_connected,
    })
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub usage: &'static str,
}

/// `GET /` — service info.
pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: config::APP_NAME,
        version: config::APP_VERSION,
        usage: "POST a PDF to /analyze",
    })
}
