//! Shared state injected into API handlers.

use std::sync::Arc;

use crate::config;
use crate::pipeline::llm::LlmClient;
use crate::pipeline::reconcile::ReferenceCatalog;
use crate::pipeline::ReportAnalyzer;

/// Immutable service state shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ReportAnalyzer>,
    pub llm: Arc<dyn LlmClient>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(catalog: Arc<ReferenceCatalog>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            analyzer: Arc::new(ReportAnalyzer::new(catalog, llm.clone())),
            llm,
            max_upload_bytes: config::MAX_UPLOAD_BYTES,
        }
    }
}
