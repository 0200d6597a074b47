//! The reconciliation core: canonicalization, catalog matching,
//! cross-source merge, unit normalization, status classification, and
//! explanation re-attachment.

pub mod canonical;
pub mod catalog;
pub mod explain;
pub mod fuzzy;
pub mod merge;
pub mod status;
pub mod units;

pub use canonical::canonicalize;
pub use catalog::{RefRange, ReferenceCatalog, ReferenceEntry, ResolvedReference};
pub use explain::attach_explanations;
pub use merge::merge_candidates;
pub use status::{
    classify, NO_REFERENCE_EXPLANATION, UNKNOWN_REFERENCE_HIGH, UNKNOWN_REFERENCE_LOW,
};
pub use units::{conversion_factor, convert_value, normalize_unit};

use serde::Serialize;
use thiserror::Error;

use crate::models::BiomarkerStatus;
use crate::pipeline::extraction::types::CandidateBiomarker;

/// Similarity floor for matching a candidate name against the catalog.
/// Below it, a false positive against an unrelated marker is judged
/// worse than degrading to Unknown.
pub const CATALOG_MATCH_THRESHOLD: f64 = 85.0;

/// Similarity floor for treating two cross-source candidates as the
/// same marker. Stricter than catalog matching; the two floors are
/// tuned independently.
pub const MERGE_DUPLICATE_THRESHOLD: f64 = 90.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog JSON parsing error: {0}")]
    Parsing(String),

    #[error("Catalog entry {key:?} declares no ranges")]
    NoRanges { key: String },

    #[error("Catalog entry {key:?}, range {variant:?} has low > high")]
    InvertedRange { key: String, variant: String },
}

/// A merged candidate annotated against the catalog, not yet explained.
/// Serialized as-is into the analysis prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedBiomarker {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub reference_low: f64,
    pub reference_high: f64,
    pub status: BiomarkerStatus,
    pub description: String,
}

/// Annotate one merged candidate against the catalog.
///
/// On a catalog hit the candidate's unit is normalized and, when the
/// pair is declared convertible, the value is rescaled to the catalog
/// unit before classification; an unconvertible mismatch compares the
/// raw value against the canonical range unchanged. Without a catalog
/// hit the candidate keeps its own unit and gets Unknown status with
/// sentinel bounds.
pub fn annotate(catalog: &ReferenceCatalog, candidate: &CandidateBiomarker) -> AnnotatedBiomarker {
    match catalog.lookup(&candidate.name) {
        Some(reference) => {
            let normalized = normalize_unit(&candidate.unit);
            let (value, unit) = if normalized.eq_ignore_ascii_case(&reference.unit) {
                (candidate.value, reference.unit.clone())
            } else if let Some(factor) = conversion_factor(&normalized, &reference.unit) {
                (candidate.value * factor, reference.unit.clone())
            } else {
                tracing::debug!(
                    name = %candidate.name,
                    unit = %normalized,
                    catalog_unit = %reference.unit,
                    "unconvertible unit mismatch, comparing raw value"
                );
                (candidate.value, normalized)
            };

            AnnotatedBiomarker {
                name: candidate.name.clone(),
                value,
                unit,
                reference_low: reference.low,
                reference_high: reference.high,
                status: classify(value, reference.low, reference.high),
                description: reference.description,
            }
        }
        None => AnnotatedBiomarker {
            name: candidate.name.clone(),
            value: candidate.value,
            unit: candidate.unit.clone(),
            reference_low: UNKNOWN_REFERENCE_LOW,
            reference_high: UNKNOWN_REFERENCE_HIGH,
            status: BiomarkerStatus::Unknown,
            description: NO_REFERENCE_EXPLANATION.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::types::ExtractionSource;

    fn candidate(name: &str, value: f64, unit: &str) -> CandidateBiomarker {
        CandidateBiomarker::new(name, value, unit, ExtractionSource::Pattern)
    }

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::load_default().unwrap()
    }

    #[test]
    fn known_marker_gets_catalog_range_and_status() {
        let annotated = annotate(&catalog(), &candidate("glucose", 112.0, "mg/dL"));
        assert_eq!(annotated.reference_low, 70.0);
        assert_eq!(annotated.reference_high, 100.0);
        assert_eq!(annotated.status, BiomarkerStatus::High);
        assert_eq!(annotated.unit, "mg/dL");
    }

    #[test]
    fn convertible_unit_rescaled_to_catalog_unit() {
        // 135 g/L is 13.5 g/dL — inside hemoglobin's range
        let annotated = annotate(&catalog(), &candidate("hemoglobin", 135.0, "g/L"));
        assert_eq!(annotated.value, 13.5);
        assert_eq!(annotated.unit, "g/dL");
        assert_eq!(annotated.status, BiomarkerStatus::Normal);
    }

    #[test]
    fn unconvertible_mismatch_compares_raw_value() {
        // mmol/L glucose is not a declared conversion; raw value compared
        let annotated = annotate(&catalog(), &candidate("glucose", 5.2, "mmol/L"));
        assert_eq!(annotated.value, 5.2);
        assert_eq!(annotated.unit, "mmol/L");
        assert_eq!(annotated.status, BiomarkerStatus::Low);
    }

    #[test]
    fn unknown_marker_gets_sentinel_bounds() {
        let annotated = annotate(&catalog(), &candidate("frobnicatin", 42.0, "U/L"));
        assert_eq!(annotated.status, BiomarkerStatus::Unknown);
        assert_eq!(annotated.reference_low, UNKNOWN_REFERENCE_LOW);
        assert_eq!(annotated.reference_high, UNKNOWN_REFERENCE_HIGH);
        assert_eq!(annotated.description, NO_REFERENCE_EXPLANATION);
        assert_eq!(annotated.unit, "U/L");
    }

    #[test]
    fn spelling_variant_unit_normalized() {
        let annotated = annotate(&catalog(), &candidate("white blood cell", 7.2, "K/uL"));
        assert_eq!(annotated.unit, "x10^9/L");
        assert_eq!(annotated.status, BiomarkerStatus::Normal);
    }
}
