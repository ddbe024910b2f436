//! Static reference text for every disease class the model emits.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, PartialEq)]
pub struct DiseaseInfo {
    pub label: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub causes: &'static [&'static str],
    pub solutions: &'static [&'static str],
}

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Unknown disease label: {0}")]
    UnknownLabel(String),
}

static DISEASES: [DiseaseInfo; 3] = [
    DiseaseInfo {
        label: "Acne or Rosacea",
        name: "Acne and Rosacea",
        description: "Acne and Rosacea are common skin conditions that affect the appearance of \
            the skin, causing various symptoms such as redness, pimples, and inflammation.",
        causes: &[
            "Hormonal changes",
            "Excess oil production",
            "Bacterial overgrowth",
            "Buildup of dead skin cells",
            "Genetics",
            "Certain medications",
            "Dietary factors",
            "Abnormalities in blood vessels",
            "Overactive immune system",
        ],
        solutions: &[
            "Topical creams and gels",
            "Oral medications",
            "Lifestyle changes",
            "Sun protection",
            "Avoidance of triggers (e.g., spicy foods, alcohol)",
            "Proper skincare routine",
            "Stress management",
            "Gentle skincare practices",
        ],
    },
    DiseaseInfo {
        label: "Malignant Lesions",
        name: "Malignant Lesions",
        description: "Malignant lesions refer to cancerous growths on the skin. These can \
            manifest as moles, tumors, or other abnormalities, and they have the potential to \
            spread to other parts of the body.",
        causes: &[
            "Genetic mutations",
            "Exposure to UV radiation",
            "Exposure to certain chemicals",
            "Family history of skin cancer",
        ],
        solutions: &[
            "Surgery",
            "Chemotherapy",
            "Radiation therapy",
            "Immunotherapy",
            "Early detection and monitoring",
        ],
    },
    DiseaseInfo {
        label: "Psoriasis or Lichen Planus",
        name: "Psoriasis or Lichen Planus",
        description: "Psoriasis and Lichen Planus are chronic inflammatory skin conditions. \
            Psoriasis is characterized by red, scaly patches, while Lichen Planus presents as \
            itchy, flat-topped bumps.",
        causes: &[
            "Immune system dysfunction",
            "Genetics",
            "Environmental factors",
            "Stress",
        ],
        solutions: &[
            "Topical treatments",
            "Phototherapy",
            "Systemic medications",
            "Lifestyle changes",
            "Stress management",
            "Avoidance of triggers",
        ],
    },
];

pub fn all() -> &'static [DiseaseInfo] {
    &DISEASES
}

/// Exact, case-sensitive match on the classifier label.
pub fn lookup(label: &str) -> Result<&'static DiseaseInfo, CatalogError> {
    DISEASES
        .iter()
        .find(|d| d.label == label)
        .ok_or_else(|| CatalogError::UnknownLabel(label.to_string()))
}
