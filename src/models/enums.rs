use serde::{Deserialize, Serialize};

/// Classification of a biomarker value against its reference range.
///
/// `Critical` is reserved for catalogs that carry critical thresholds;
/// the bundled catalog only has low/high bounds, so the classifier
/// never produces it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomarkerStatus {
    Low,
    Normal,
    High,
    Critical,
    Unknown,
}

impl BiomarkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BiomarkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BiomarkerStatus::Unknown).unwrap(),
            r#""unknown""#
        );
        assert_eq!(
            serde_json::to_string(&BiomarkerStatus::High).unwrap(),
            r#""high""#
        );
    }

    #[test]
    fn round_trips_through_serde() {
        for status in [
            BiomarkerStatus::Low,
            BiomarkerStatus::Normal,
            BiomarkerStatus::High,
            BiomarkerStatus::Critical,
            BiomarkerStatus::Unknown,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: BiomarkerStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
