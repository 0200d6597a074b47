//! Report upload and analysis endpoint.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::AppState;
use crate::models::AnalysisResult;

/// `POST /analyze` — upload a blood test PDF, receive the reconciled
/// analysis.
///
/// Validation order matches the error taxonomy: malformed request first,
/// then backend reachability, then the pipeline's own validation.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Could not read upload: {e}")))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing file field".into()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::BadRequest("Only PDF files are supported".into()));
    }

    if data.len() > state.max_upload_bytes {
        return Err(ApiError::BadRequest(
            "File too large. Maximum size is 10MB".into(),
        ));
    }

    if !state.llm.check_connection().await {
        return Err(ApiError::BackendUnavailable);
    }

    tracing::info!(%filename, size = data.len(), "processing uploaded report");
    let result = state.analyzer.analyze_report(&data).await?;
    tracing::info!(biomarkers = result.biomarkers.len(), "analysis complete");

    Ok(Json(result))
}
