pub mod client;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::{GroqClient, LlmClient, MockLlmClient};
pub use parser::{parse_analysis_response, parse_candidate_response};
pub use prompt::{build_analysis_prompt, build_extraction_prompt};
pub use types::{AnalysisPayload, GeneratedExplanation};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Cannot connect to the generative backend at {0}")]
    Connection(String),

    #[error("Generative backend request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Generative backend returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
