//! Report analysis orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! text extraction → dual candidate extraction → merge → catalog
//! annotation → generative analysis → explanation reconciliation.
//!
//! The generative backend is injected behind `LlmClient` so the
//! orchestrator remains fully testable with a mock.

use std::sync::Arc;

use crate::models::{AnalysisResult, DISCLAIMER};
use crate::pipeline::extraction::types::CandidateBiomarker;
use crate::pipeline::extraction::{extract_candidates, ExtractionError, PdfTextExtractor, TextExtractor};
use crate::pipeline::llm::{
    build_analysis_prompt, build_extraction_prompt, parse_analysis_response,
    parse_candidate_response, AnalysisPayload, LlmClient,
};
use crate::pipeline::reconcile::{
    annotate, attach_explanations, merge_candidates, AnnotatedBiomarker, ReferenceCatalog,
};

/// Errors that end a report analysis. Anything with a safe default —
/// backend failures, timeouts, malformed output — is absorbed inside
/// the pipeline instead and never reaches this enum.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Could not extract text from PDF. The file may be image-based or corrupted.")]
    NoText,

    #[error("No biomarkers could be extracted from the PDF.")]
    NoBiomarkers,

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Drives one report through the reconciliation pipeline.
///
/// Holds only shared immutable state (catalog, backend client); all
/// per-request state lives on the stack of `analyze_report`.
pub struct ReportAnalyzer {
    catalog: Arc<ReferenceCatalog>,
    llm: Arc<dyn LlmClient>,
}

impl ReportAnalyzer {
    pub fn new(catalog: Arc<ReferenceCatalog>, llm: Arc<dyn LlmClient>) -> Self {
        Self { catalog, llm }
    }

    /// Analyze an uploaded PDF report end to end.
    pub async fn analyze_report(&self, pdf_bytes: &[u8]) -> Result<AnalysisResult, PipelineError> {
        tracing::info!(size = pdf_bytes.len(), "extracting text from PDF");
        let text = PdfTextExtractor.extract_text(pdf_bytes)?;

        if text.trim().is_empty() {
            return Err(PipelineError::NoText);
        }

        self.analyze_text(&text).await
    }

    /// Analyze already-extracted report text.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
        // The two extractors are independent; run them concurrently and
        // let the generative one fail on its own.
        let (pattern_candidates, generative_candidates) =
            tokio::join!(async { extract_candidates(text) }, self.extract_generative(text));

        tracing::info!(
            pattern = pattern_candidates.len(),
            generative = generative_candidates.len(),
            "candidate extraction complete"
        );

        let merged = merge_candidates(pattern_candidates, generative_candidates);
        if merged.is_empty() {
            return Err(PipelineError::NoBiomarkers);
        }
        tracing::info!(total = merged.len(), "merged unique biomarkers");

        let annotated: Vec<AnnotatedBiomarker> = merged
            .iter()
            .map(|candidate| annotate(&self.catalog, candidate))
            .collect();

        let payload = self.analyze_generative(&annotated).await;

        let biomarkers = attach_explanations(annotated, &payload.explanations);

        Ok(AnalysisResult {
            summary: payload.summary,
            biomarkers,
            concerns: payload.concerns,
            recommendations: payload.recommendations,
            disclaimer: DISCLAIMER.to_string(),
        })
    }

    /// Generative candidate extraction; any failure degrades to an empty
    /// list so the pattern extractor alone can carry the request.
    async fn extract_generative(&self, text: &str) -> Vec<CandidateBiomarker> {
        let prompt = build_extraction_prompt(text);
        let result = self
            .llm
            .complete(&prompt, true)
            .await
            .and_then(|response| parse_candidate_response(&response));

        match result {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, "generative extraction failed, continuing with pattern candidates only");
                Vec::new()
            }
        }
    }

    /// Generative analysis; any failure degrades to the fixed fallback
    /// payload.
    async fn analyze_generative(&self, annotated: &[AnnotatedBiomarker]) -> AnalysisPayload {
        let prompt = build_analysis_prompt(annotated);
        let result = self
            .llm
            .complete(&prompt, true)
            .await
            .and_then(|response| parse_analysis_response(&response));

        match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "generative analysis failed, using fallback payload");
                AnalysisPayload::fallback()
            }
        }
    }
}
