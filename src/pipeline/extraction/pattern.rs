//! Deterministic regex-based biomarker extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{CandidateBiomarker, ExtractionSource};

/// A compiled extraction rule: the pattern plus the name it emits.
struct PatternRule {
    regex: Regex,
    name: &'static str,
}

fn rule(pattern: &str, name: &'static str) -> PatternRule {
    PatternRule {
        regex: Regex::new(pattern).expect("invalid biomarker pattern"),
        name,
    }
}

/// Extraction rules in their fixed firing order. Each captures a value
/// and the unit spelling as printed in the report.
static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        rule(
            r"(?i)\b(?:hemoglobin|hgb|hb)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(g/dL|g/L)",
            "hemoglobin",
        ),
        rule(
            r"(?i)\b(?:hematocrit|hct)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(%)",
            "hematocrit",
        ),
        rule(
            r"(?i)\b(?:white blood cells?|wbc|leukocytes)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(x10\^9/L|K/uL|x10E9/L|thou/uL)",
            "white blood cell",
        ),
        rule(
            r"(?i)\b(?:red blood cells?|rbc|erythrocytes)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(x10\^12/L|M/uL|x10E12/L|mil/uL)",
            "red blood cell",
        ),
        rule(
            r"(?i)\b(?:platelets?|plt|thrombocytes)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(x10\^9/L|K/uL|x10E9/L|thou/uL)",
            "platelet",
        ),
        rule(
            r"(?i)\b(?:fasting glucose|blood sugar|glucose)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "glucose",
        ),
        rule(
            r"(?i)\b(?:total cholesterol|cholesterol)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "cholesterol",
        ),
        rule(
            r"(?i)\b(?:ldl cholesterol|ldl-c|ldl)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "ldl cholesterol",
        ),
        rule(
            r"(?i)\b(?:hdl cholesterol|hdl-c|hdl)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "hdl cholesterol",
        ),
        rule(
            r"(?i)\b(?:triglycerides|tg|trigs)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "triglycerides",
        ),
        rule(
            r"(?i)\b(?:creatinine|creat)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|umol/L)",
            "creatinine",
        ),
        rule(
            r"(?i)\b(?:blood urea nitrogen|bun|urea)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "blood urea nitrogen",
        ),
        rule(
            r"(?i)\b(?:sodium|na)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mEq/L|mmol/L)",
            "sodium",
        ),
        rule(
            r"(?i)\b(?:potassium|k)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mEq/L|mmol/L)",
            "potassium",
        ),
        rule(
            r"(?i)\b(?:serum iron|iron|fe)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mcg/dL|ug/dL|umol/L)",
            "iron",
        ),
        rule(
            r"(?i)\bferritin\b\s*[:\-]?\s*(\d+\.?\d*)\s*(ng/mL|ug/L|pmol/L)",
            "ferritin",
        ),
        rule(
            r"(?i)\b(?:vitamin d|25-oh|25-hydroxy)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(ng/mL|nmol/L)",
            "vitamin d",
        ),
        rule(
            r"(?i)\b(?:thyroid stimulating|tsh)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mIU/L|uIU/mL)",
            "thyroid stimulating hormone",
        ),
        rule(
            r"(?i)\b(?:alanine aminotransferase|alt|sgpt)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(U/L|IU/L)",
            "alanine aminotransferase",
        ),
        rule(
            r"(?i)\b(?:aspartate aminotransferase|ast|sgot)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(U/L|IU/L)",
            "aspartate aminotransferase",
        ),
        rule(
            r"(?i)\b(?:hemoglobin a1c|hba1c|a1c|glycated)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(%)",
            "hemoglobin a1c",
        ),
        rule(
            r"(?i)\b(?:calcium|ca)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(mg/dL|mmol/L)",
            "calcium",
        ),
        rule(
            r"(?i)\b(?:vitamin b12|b12|cobalamin)\b\s*[:\-]?\s*(\d+\.?\d*)\s*(pg/mL|pmol/L)",
            "vitamin b12",
        ),
    ]
});

/// Extract biomarker candidates from report text.
///
/// Pure and infallible: each rule contributes at most its first match,
/// in rule order; no matches yields an empty list.
pub fn extract_candidates(text: &str) -> Vec<CandidateBiomarker> {
    let mut candidates = Vec::new();

    for rule in PATTERN_RULES.iter() {
        if let Some(caps) = rule.regex.captures(text) {
            if let Ok(value) = caps[1].parse::<f64>() {
                candidates.push(CandidateBiomarker::new(
                    rule.name,
                    value,
                    &caps[2],
                    ExtractionSource::Pattern,
                ));
            }
        }
    }

    candidates
}
