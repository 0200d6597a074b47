pub mod analysis;
pub mod biomarker;
pub mod enums;

pub use analysis::{AnalysisResult, DISCLAIMER};
pub use biomarker::Biomarker;
pub use enums::BiomarkerStatus;
