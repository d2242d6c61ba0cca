//! Prediction response and weekly plan types.

use serde::{Deserialize, Serialize};

/// What `POST /predict/{diseaseType}` returns.
///
/// The client never validates or clamps `probability`; whatever the backend
/// sends is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 = at risk, 0 = not at risk.
    pub prediction: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Absent when the model service answers directly; empty then.
    #[serde(default)]
    pub message: String,
}

impl PredictionResult {
    pub fn is_at_risk(&self) -> bool {
        self.prediction == 1
    }
}

/// A static week of lifestyle guidance, looked up from (disease, outcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub sleep_hours: String,
    pub food_recommendations: Vec<String>,
    pub workout_tips: Vec<String>,
}
