//! Lenient parsing of generative backend responses.
//!
//! The backend's JSON is untrusted: individual malformed records are
//! skipped rather than failing the whole response; only an unparseable
//! top level is an error.

use serde_json::Value;

use crate::pipeline::extraction::types::{CandidateBiomarker, ExtractionSource};

use super::types::{AnalysisPayload, GeneratedExplanation};
use super::LlmError;

/// Summary used when the backend omits one.
const DEFAULT_SUMMARY: &str = "Analysis complete. Review your results below.";

/// Parse the extraction response: `{"biomarkers": [{name, value, unit}]}`.
///
/// Names are lowercased for the merge stage; values are accepted as JSON
/// numbers or numeric strings.
pub fn parse_candidate_response(response: &str) -> Result<Vec<CandidateBiomarker>, LlmError> {
    let root: Value =
        serde_json::from_str(response).map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

    let Some(items) = root.get("biomarkers").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::with_capacity(items.len());
    for item in items {
        let Some(name) = item.get("name").and_then(Value::as_str) else {
            continue;
        };
        let Some(value) = numeric(item.get("value")) else {
            continue;
        };
        let Some(unit) = item.get("unit").and_then(Value::as_str) else {
            continue;
        };
        candidates.push(CandidateBiomarker::new(
            name.to_lowercase(),
            value,
            unit,
            ExtractionSource::Generative,
        ));
    }

    Ok(candidates)
}

/// Parse the analysis response into an `AnalysisPayload`.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisPayload, LlmError> {
    let root: Value =
        serde_json::from_str(response).map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

    let summary = root
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_SUMMARY)
        .to_string();

    let explanations = root
        .get("biomarker_explanations")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| serde_json::from_value::<GeneratedExplanation>(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Ok(AnalysisPayload {
        summary,
        explanations,
        concerns: string_list(root.get("concerns")),
        recommendations: string_list(root.get("recommendations")),
    })
}

/// Accepts plain strings and `{"name": ...}` objects — the backend
/// sometimes returns concerns as objects instead of strings.
fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(v.to_string())),
            _ => None,
        })
        .collect()
}

/// A JSON number, or a string that parses as one.
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
