use serde::{Deserialize, Serialize};

/// One explanation record produced by the analysis backend.
/// Matched back onto biomarkers by name, never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExplanation {
    pub name: String,
    pub explanation: String,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Parsed output of the analysis backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPayload {
    pub summary: String,
    pub explanations: Vec<GeneratedExplanation>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisPayload {
    /// Fixed payload substituted when the backend fails, times out, or
    /// returns something unparseable.
    pub fn fallback() -> Self {
        Self {
            summary: "AI analysis could not be completed due to a service timeout. Please \
                      review the extracted biomarkers below."
                .to_string(),
            explanations: Vec::new(),
            concerns: Vec::new(),
            recommendations: vec![
                "Consult with a healthcare provider regarding your results.".to_string(),
            ],
        }
    }
}
