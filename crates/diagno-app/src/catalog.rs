//! Presentation data for the disease selection screen.

use diagno_contracts::disease::DiseaseType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub disease: DiseaseType,
    /// Selection card heading, e.g. "Predict Heart Disease".
    pub title: &'static str,
    pub icon: &'static str,
    /// Accent colour as `#rrggbb`.
    pub color: &'static str,
    pub description: &'static str,
}

impl DiseaseInfo {
    pub fn name(&self) -> &'static str {
        self.disease.display_name()
    }
}

pub static DISEASES: [DiseaseInfo; 4] = [
    DiseaseInfo {
        disease: DiseaseType::Diabetes,
        title: "Predict Diabetes",
        icon: "🩸",
        color: "#f97316",
        description: "Analyze risk factors for Type 2 diabetes",
    },
    DiseaseInfo {
        disease: DiseaseType::Heart,
        title: "Predict Heart Disease",
        icon: "❤️",
        color: "#ef4444",
        description: "Assess cardiovascular health risks",
    },
    DiseaseInfo {
        disease: DiseaseType::Stroke,
        title: "Predict Stroke",
        icon: "🧠",
        color: "#8b5cf6",
        description: "Evaluate stroke risk factors",
    },
    DiseaseInfo {
        disease: DiseaseType::Parkinsons,
        title: "Predict Parkinson's",
        icon: "🧠",
        color: "#059669",
        description: "Analyze neurological indicators",
    },
];

pub fn info(disease: DiseaseType) -> &'static DiseaseInfo {
    match disease {
        DiseaseType::Diabetes => &DISEASES[0],
        DiseaseType::Heart => &DISEASES[1],
        DiseaseType::Stroke => &DISEASES[2],
        DiseaseType::Parkinsons => &DISEASES[3],
    }
}
