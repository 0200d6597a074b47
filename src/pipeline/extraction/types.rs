use serde::{Deserialize, Serialize};

/// Which extractor proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Pattern,
    Generative,
}

/// A single (name, value, unit) measurement proposed by one extractor,
/// not yet validated against any reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBiomarker {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub source: ExtractionSource,
}

impl CandidateBiomarker {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        source: ExtractionSource,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            source,
        }
    }
}
