//! Disease tags and the per-disease input records.
//!
//! Each input record serializes to a flat JSON object whose keys are the
//! field names the prediction backend expects, verbatim. The voice
//! measurement fields for Parkinson's keep their punctuation
//! (`MDVP:Fo(Hz)` and friends), so every one of them carries an explicit
//! `serde(rename)`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DiagnoError, DiagnoResult};

/// The four supported disease tags. The lowercase slug is what appears in
/// `POST /predict/{diseaseType}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseType {
    Diabetes,
    Heart,
    Stroke,
    Parkinsons,
}

impl DiseaseType {
    /// Every tag, in selection-screen order.
    pub const ALL: [DiseaseType; 4] = [
        DiseaseType::Diabetes,
        DiseaseType::Heart,
        DiseaseType::Stroke,
        DiseaseType::Parkinsons,
    ];

    /// URL slug, e.g. `"heart"`.
    pub fn slug(self) -> &'static str {
        match self {
            DiseaseType::Diabetes => "diabetes",
            DiseaseType::Heart => "heart",
            DiseaseType::Stroke => "stroke",
            DiseaseType::Parkinsons => "parkinsons",
        }
    }

    /// Human-readable name used in messages and headings.
    pub fn display_name(self) -> &'static str {
        match self {
            DiseaseType::Diabetes => "Diabetes",
            DiseaseType::Heart => "Heart Disease",
            DiseaseType::Stroke => "Stroke",
            DiseaseType::Parkinsons => "Parkinson's Disease",
        }
    }
}

impl fmt::Display for DiseaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DiseaseType {
    type Err = DiagnoError;

    /// Case-insensitive, so the uppercase names the backend stores on saved
    /// reports (`"DIABETES"`) parse too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diabetes" => Ok(DiseaseType::Diabetes),
            "heart" => Ok(DiseaseType::Heart),
            "stroke" => Ok(DiseaseType::Stroke),
            "parkinsons" => Ok(DiseaseType::Parkinsons),
            _ => Err(DiagnoError::UnknownDisease { tag: s.to_string() }),
        }
    }
}

// ── Input records ─────────────────────────────────────────────────────────────

/// Pima-style diabetes screening fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesInput {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

/// Cleveland-style heart disease fields. Integer fields are coded
/// categoricals (e.g. `cp` 0..=3 for chest pain type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartInput {
    pub age: f64,
    pub sex: u8,
    pub cp: u8,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: u8,
    pub restecg: u8,
    pub thalach: f64,
    pub exang: u8,
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

/// Stroke risk fields. Integer fields are coded categoricals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeInput {
    pub gender: u8,
    pub age: f64,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub ever_married: u8,
    pub work_type: u8,
    pub residence_type: u8,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: u8,
}

/// Biomedical voice measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkinsonsInput {
    #[serde(rename = "MDVP:Fo(Hz)")]
    pub fo_hz: f64,
    #[serde(rename = "MDVP:Fhi(Hz)")]
    pub fhi_hz: f64,
    #[serde(rename = "MDVP:Flo(Hz)")]
    pub flo_hz: f64,
    #[serde(rename = "MDVP:Jitter(%)")]
    pub jitter_percent: f64,
    #[serde(rename = "MDVP:Jitter(Abs)")]
    pub jitter_abs: f64,
    #[serde(rename = "MDVP:RAP")]
    pub rap: f64,
    #[serde(rename = "MDVP:PPQ")]
    pub ppq: f64,
    #[serde(rename = "Jitter:DDP")]
    pub jitter_ddp: f64,
    #[serde(rename = "MDVP:Shimmer")]
    pub shimmer: f64,
    #[serde(rename = "MDVP:Shimmer(dB)")]
    pub shimmer_db: f64,
    #[serde(rename = "Shimmer:APQ3")]
    pub shimmer_apq3: f64,
    #[serde(rename = "Shimmer:APQ5")]
    pub shimmer_apq5: f64,
    #[serde(rename = "MDVP:APQ")]
    pub apq: f64,
    #[serde(rename = "Shimmer:DDA")]
    pub shimmer_dda: f64,
    #[serde(rename = "NHR")]
    pub nhr: f64,
    #[serde(rename = "HNR")]
    pub hnr: f64,
    #[serde(rename = "RPDE")]
    pub rpde: f64,
    #[serde(rename = "DFA")]
    pub dfa: f64,
    pub spread1: f64,
    pub spread2: f64,
    #[serde(rename = "D2")]
    pub d2: f64,
    #[serde(rename = "PPE")]
    pub ppe: f64,
}

/// One disease record, tagged by variant but serialized untagged: the wire
/// body is just the inner field set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiseaseInput {
    Diabetes(DiabetesInput),
    Heart(HeartInput),
    Stroke(StrokeInput),
    Parkinsons(ParkinsonsInput),
}

impl DiseaseInput {
    /// The disease tag this record belongs to.
    pub fn disease(&self) -> DiseaseType {
        match self {
            DiseaseInput::Diabetes(_) => DiseaseType::Diabetes,
            DiseaseInput::Heart(_) => DiseaseType::Heart,
            DiseaseInput::Stroke(_) => DiseaseType::Stroke,
            DiseaseInput::Parkinsons(_) => DiseaseType::Parkinsons,
        }
    }

    /// The request body as a JSON object.
    pub fn to_json(&self) -> DiagnoResult<Value> {
        serde_json::to_value(self).map_err(|e| DiagnoError::InvalidInput {
            reason: format!("failed to serialize {} input: {}", self.disease(), e),
        })
    }

    /// Decode a flat JSON object into the typed record for `disease`.
    ///
    /// Missing fields, and non-integer values in coded categorical fields,
    /// are rejected.
    pub fn from_json(disease: DiseaseType, value: Value) -> DiagnoResult<Self> {
        let invalid = |e: serde_json::Error| DiagnoError::InvalidInput {
            reason: format!("{} input does not match its field set: {}", disease, e),
        };

        Ok(match disease {
            DiseaseType::Diabetes => DiseaseInput::Diabetes(serde_json::from_value(value).map_err(invalid)?),
            DiseaseType::Heart => DiseaseInput::Heart(serde_json::from_value(value).map_err(invalid)?),
            DiseaseType::Stroke => DiseaseInput::Stroke(serde_json::from_value(value).map_err(invalid)?),
            DiseaseType::Parkinsons => {
                DiseaseInput::Parkinsons(serde_json::from_value(value).map_err(invalid)?)
            }
        })
    }
}
