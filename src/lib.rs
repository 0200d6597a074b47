//! Bloodlens — blood-test report reconciliation service.
//!
//! Accepts an uploaded report PDF, extracts candidate biomarkers with a
//! deterministic pattern matcher and a generative backend in parallel,
//! and reconciles them into one de-duplicated, reference-annotated, and
//! explained result set.

pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::types::AppState;
use crate::pipeline::llm::{GroqClient, LlmClient};
use crate::pipeline::reconcile::ReferenceCatalog;

/// Initialize logging, load the catalog, and serve the API.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Bloodlens starting v{}", config::APP_VERSION);

    let cfg = config::Config::from_env();

    let catalog = Arc::new(ReferenceCatalog::load_default()?);
    tracing::info!(entries = catalog.len(), "reference catalog loaded");

    let llm: Arc<dyn LlmClient> = Arc::new(GroqClient::new(&cfg.backend));
    if llm.check_connection().await {
        tracing::info!("generative backend reachable");
    } else {
        tracing::warn!(
            "generative backend not reachable; analysis will degrade to pattern \
             extraction and fallback summaries"
        );
    }

    let state = AppState::new(catalog, llm);
    api::server::serve(cfg.bind_addr, state).await?;

    Ok(())
}
