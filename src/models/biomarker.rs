use serde::{Deserialize, Serialize};

use super::enums::BiomarkerStatus;

/// A fully reconciled biomarker: one merged measurement annotated with
/// its reference range, status, and explanation. This is the unit
/// returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biomarker {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub reference_low: f64,
    pub reference_high: f64,
    pub status: BiomarkerStatus,
    pub explanation: String,
    pub recommendation: Option<String>,
}
