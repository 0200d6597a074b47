pub mod extraction;
pub mod llm;
pub mod processor;
pub mod reconcile;

pub use processor::{PipelineError, ReportAnalyzer};
