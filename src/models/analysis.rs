use serde::{Deserialize, Serialize};

use super::biomarker::Biomarker;

/// Fixed disclaimer attached to every analysis response.
pub const DISCLAIMER: &str = "This analysis is for informational purposes only and is not a \
     substitute for professional medical advice, diagnosis, or treatment. Always consult with a \
     qualified healthcare provider about any questions you may have regarding your health or \
     medical results.";

/// Complete result of analyzing one uploaded report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub biomarkers: Vec<Biomarker>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}
