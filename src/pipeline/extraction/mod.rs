pub mod pattern;
pub mod pdf;
pub mod types;

pub use pattern::extract_candidates;
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use types::{CandidateBiomarker, ExtractionSource};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parsing error: {0}")]
    PdfParsing(String),
}
