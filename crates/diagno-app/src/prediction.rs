//! Prediction requests and the offline fallback.
//!
//! `POST /predict/{disease}` returns a `PredictionResult` that is passed
//! through untouched. When the call fails for any reason (no connection,
//! non-2xx, unreadable body) the error is logged and never shown; what the
//! user sees instead depends on the `FallbackPolicy`:
//!
//! - `Synthesize`: a locally generated result from three independent draws
//! - `Unavailable`: an explicit "service unavailable" outcome

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};

use diagno_contracts::{
    disease::{DiseaseInput, DiseaseType},
    error::DiagnoResult,
    prediction::PredictionResult,
};
use diagno_core::{ApiClient, FallbackPolicy};

/// Where a displayed result came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The backend answered.
    Backend(PredictionResult),
    /// The backend failed and the result was made up locally.
    Synthetic(PredictionResult),
    /// The backend failed and no result is shown.
    Unavailable { reason: String },
}

impl Outcome {
    /// The result to display, if there is one.
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Outcome::Backend(result) | Outcome::Synthetic(result) => Some(result),
            Outcome::Unavailable { .. } => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Outcome::Synthetic(_))
    }
}

/// Makes up a plausible-looking result.
///
/// Prediction, probability and message come from three independent draws,
/// so a synthetic result can say "Low risk" while `prediction` is 1.
pub struct FallbackGenerator<R: Rng> {
    rng: R,
}

impl FallbackGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> FallbackGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn synthesize(&mut self, disease: DiseaseType) -> PredictionResult {
        let prediction = u8::from(self.rng.gen::<f64>() > 0.5);
        let probability = self.rng.gen::<f64>();
        let message = if self.rng.gen::<f64>() > 0.5 {
            format!("You may be at risk of {}", disease.display_name())
        } else {
            format!("Low risk of {} detected", disease.display_name())
        };

        PredictionResult {
            prediction,
            probability: Some(probability),
            message,
        }
    }
}

pub struct PredictionClient<R: Rng = StdRng> {
    api: ApiClient,
    policy: FallbackPolicy,
    fallback: FallbackGenerator<R>,
}

impl PredictionClient<StdRng> {
    pub fn new(api: ApiClient, policy: FallbackPolicy) -> Self {
        Self::with_generator(api, policy, FallbackGenerator::from_entropy())
    }
}

impl<R: Rng> PredictionClient<R> {
    pub fn with_generator(api: ApiClient, policy: FallbackPolicy, fallback: FallbackGenerator<R>) -> Self {
        Self { api, policy, fallback }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// The raw backend call, without any fallback.
    pub fn request(&self, input: &DiseaseInput) -> DiagnoResult<PredictionResult> {
        let path = format!("/predict/{}", input.disease().slug());
        self.api.post(&path, &input.to_json()?)
    }

    /// Ask the backend, falling back per policy. Never fails.
    pub fn predict(&mut self, input: &DiseaseInput) -> Outcome {
        let disease = input.disease();

        match self.request(input) {
            Ok(result) => {
                info!(disease = %disease, prediction = result.prediction, "prediction received");
                Outcome::Backend(result)
            }
            Err(e) => {
                warn!(disease = %disease, error = %e, policy = ?self.policy, "prediction failed; using fallback");
                match self.policy {
                    FallbackPolicy::Synthesize => Outcome::Synthetic(self.fallback.synthesize(disease)),
                    FallbackPolicy::Unavailable => Outcome::Unavailable {
                        reason: format!("{} prediction service is unavailable", disease.display_name()),
                    },
                }
            }
        }
    }
}
