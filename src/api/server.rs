//! HTTP server lifecycle: bind and serve the API router.

use std::net::SocketAddr;

use crate::api::router::app_router;
use crate::api::types::AppState;

/// Bind `addr` and serve the API until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Bloodlens API listening");
    axum::serve(listener, app_router(state)).await
}
