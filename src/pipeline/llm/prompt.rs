//! Prompt templates for the generative backend.

use crate::pipeline::reconcile::AnnotatedBiomarker;

/// Report text beyond this many characters is truncated before prompting.
pub const MAX_PROMPT_TEXT_CHARS: usize = 8000;

const EXTRACTION_TEMPLATE: &str = r#"You are a medical data extraction assistant. Extract every biomarker measurement from the blood test report below.

Report text:
{raw_text}

Respond with JSON only, in this exact shape:
{"biomarkers": [{"name": "hemoglobin", "value": 13.5, "unit": "g/dL"}]}

Rules:
- Include only measurements explicitly present in the report.
- "value" must be the numeric result; never invent values.
- "unit" must be copied verbatim from the report.
- Use an empty list if the report contains no biomarkers."#;

const ANALYSIS_TEMPLATE: &str = r#"You are a health educator reviewing blood test results. The biomarkers below have already been compared to their reference ranges.

Biomarkers:
{biomarkers_json}

Respond with JSON only, in this exact shape:
{
  "summary": "two or three sentences for a layperson",
  "biomarker_explanations": [
    {"name": "hemoglobin", "explanation": "plain-language explanation", "recommendation": "general advice or null"}
  ],
  "concerns": ["values worth discussing with a doctor"],
  "recommendations": ["general lifestyle recommendations"]
}

Rules:
- Explain every biomarker in plain language.
- Flag a concern only for values outside their reference range.
- Never diagnose; keep recommendations general."#;

/// Build the candidate-extraction prompt from raw report text.
pub fn build_extraction_prompt(raw_text: &str) -> String {
    let text: String = raw_text.chars().take(MAX_PROMPT_TEXT_CHARS).collect();
    EXTRACTION_TEMPLATE.replace("{raw_text}", &text)
}

/// Build the analysis prompt from annotated biomarkers.
pub fn build_analysis_prompt(biomarkers: &[AnnotatedBiomarker]) -> String {
    let json = serde_json::to_string_pretty(biomarkers).unwrap_or_else(|_| "[]".to_string());
    ANALYSIS_TEMPLATE.replace("{biomarkers_json}", &json)
}
