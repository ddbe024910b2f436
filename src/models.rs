use serde::{Deserialize, Serialize};

use crate::catalog::DiseaseInfo;

/// One entry of the inference service's response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassificationResult {
    #[serde(rename = "class", alias = "label")]
    pub label: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Confidence as a whole percentage, rounded half away from zero.
    pub fn certainty(&self) -> u32 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub class: String,
    pub confidence: f64,
    pub certainty: u32,
    pub disease: &'static DiseaseInfo,
}

impl DiagnosisResponse {
    pub fn new(winner: ClassificationResult, disease: &'static DiseaseInfo) -> Self {
        Self {
            certainty: winner.certainty(),
            class: winner.label,
            confidence: winner.confidence,
            disease,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
