//! Re-attachment of generated explanations to the canonical result set.

use crate::models::Biomarker;
use crate::pipeline::llm::types::GeneratedExplanation;

use super::canonical::canonicalize;
use super::{fuzzy, AnnotatedBiomarker, CATALOG_MATCH_THRESHOLD};

/// Attach generated explanations to annotated biomarkers by name.
///
/// Exact canonical match first, then fuzzy at the catalog threshold with
/// first-occurrence tie-break over the explanation list. A biomarker
/// with no matching record keeps its catalog description and gets no
/// recommendation, so the result survives the generative backend
/// renaming or rephrasing markers between passes.
pub fn attach_explanations(
    annotated: Vec<AnnotatedBiomarker>,
    explanations: &[GeneratedExplanation],
) -> Vec<Biomarker> {
    let keys: Vec<String> = explanations.iter().map(|e| canonicalize(&e.name)).collect();

    annotated
        .into_iter()
        .map(|b| {
            let (explanation, recommendation) = match match_record(&b.name, explanations, &keys) {
                Some(record) => (record.explanation.clone(), record.recommendation.clone()),
                None => (b.description.clone(), None),
            };

            Biomarker {
                name: title_case(&b.name),
                value: b.value,
                unit: b.unit,
                reference_low: b.reference_low,
                reference_high: b.reference_high,
                status: b.status,
                explanation,
                recommendation,
            }
        })
        .collect()
}

fn match_record<'a>(
    name: &str,
    explanations: &'a [GeneratedExplanation],
    keys: &[String],
) -> Option<&'a GeneratedExplanation> {
    let query = canonicalize(name);
    if query.is_empty() {
        return None;
    }

    if let Some(pos) = keys.iter().position(|k| *k == query) {
        return Some(&explanations[pos]);
    }

    fuzzy::best_match(&query, keys.iter().map(String::as_str), CATALOG_MATCH_THRESHOLD)
        .map(|pos| &explanations[pos])
}

/// Title-case a stored name for display ("ldl cholesterol" → "Ldl Cholesterol").
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BiomarkerStatus;

    fn annotated(name: &str) -> AnnotatedBiomarker {
        AnnotatedBiomarker {
            name: name.to_string(),
            value: 100.0,
            unit: "mg/dL".to_string(),
            reference_low: 0.0,
            reference_high: 100.0,
            status: BiomarkerStatus::Normal,
            description: "catalog description".to_string(),
        }
    }

    fn record(name: &str, explanation: &str) -> GeneratedExplanation {
        GeneratedExplanation {
            name: name.to_string(),
            explanation: explanation.to_string(),
            recommendation: Some("see a doctor".to_string()),
        }
    }

    #[test]
    fn exact_canonical_match_attaches() {
        let result = attach_explanations(
            vec![annotated("ldl cholesterol")],
            &[record("LDL Cholesterol", "your ldl explained")],
        );
        assert_eq!(result[0].explanation, "your ldl explained");
        assert_eq!(result[0].recommendation.as_deref(), Some("see a doctor"));
    }

    #[test]
    fn fuzzy_match_attaches_when_close() {
        let result = attach_explanations(
            vec![annotated("triglycerides")],
            &[record("Triglyceride", "fat in the blood")],
        );
        assert_eq!(result[0].explanation, "fat in the blood");
    }

    #[test]
    fn below_threshold_keeps_catalog_description() {
        let result = attach_explanations(
            vec![annotated("Ldl Cholesterol")],
            &[record("LDL-C", "should not attach")],
        );
        assert_eq!(result[0].explanation, "catalog description");
        assert!(result[0].recommendation.is_none());
    }

    #[test]
    fn empty_explanation_list_keeps_description() {
        let result = attach_explanations(vec![annotated("glucose")], &[]);
        assert_eq!(result[0].explanation, "catalog description");
    }

    #[test]
    fn exact_match_preferred_over_earlier_fuzzy() {
        let result = attach_explanations(
            vec![annotated("ferritin")],
            &[
                record("ferritine", "close but not exact"),
                record("Ferritin", "the exact one"),
            ],
        );
        assert_eq!(result[0].explanation, "the exact one");
    }

    #[test]
    fn fuzzy_tie_break_keeps_first_record() {
        let result = attach_explanations(
            vec![annotated("hemoglobin")],
            &[
                record("hemoglobine", "first close record"),
                record("hemoglobine", "second close record"),
            ],
        );
        assert_eq!(result[0].explanation, "first close record");
    }

    #[test]
    fn display_names_are_title_cased() {
        let result = attach_explanations(vec![annotated("blood urea nitrogen")], &[]);
        assert_eq!(result[0].name, "Blood Urea Nitrogen");
    }
}
