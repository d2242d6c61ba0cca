//! State behind the prediction screen.
//!
//! One `PredictionDashboard` per disease route. It runs a prediction,
//! keeps the last input and outcome, and saves the pair as a report.
//! `loading` and `saving` are `BusyFlag`s: a renderer can hold a clone and
//! poll them while a blocking call runs. Both are lowered by a guard on
//! every exit path.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, Rng};
use tracing::{info, warn};

use diagno_contracts::{
    disease::{DiseaseInput, DiseaseType},
    error::{DiagnoError, DiagnoResult},
    prediction::WeeklyPlan,
    report::{SaveReportRequest, TestReport},
};
use diagno_session::Session;

use crate::{
    prediction::{Outcome, PredictionClient},
    recommendations,
    reports::ReportClient,
};

/// Where the screen goes after a report is saved.
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save report. Please try again.";

// ── Busy flags ────────────────────────────────────────────────────────────────

/// A shared on/off flag raised for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag until the returned guard is dropped.
    pub fn raise(&self) -> BusyGuard {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard { flag: Arc::clone(&self.0) }
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lowers its `BusyFlag` on drop.
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// Result of `save_report`.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Saved(TestReport),
    /// Nothing to save: no result, no input, or nobody logged in.
    Skipped,
}

pub struct PredictionDashboard<R: Rng = StdRng> {
    disease: DiseaseType,
    predictions: PredictionClient<R>,
    reports: ReportClient,
    session: Arc<Session>,
    loading: BusyFlag,
    saving: BusyFlag,
    saved: bool,
    input: Option<DiseaseInput>,
    outcome: Option<Outcome>,
    auto_navigate: Duration,
    navigate_at: Option<Instant>,
}

impl<R: Rng> PredictionDashboard<R> {
    pub fn new(
        disease: DiseaseType,
        predictions: PredictionClient<R>,
        reports: ReportClient,
        session: Arc<Session>,
        auto_navigate: Duration,
    ) -> Self {
        Self {
            disease,
            predictions,
            reports,
            session,
            loading: BusyFlag::new(),
            saving: BusyFlag::new(),
            saved: false,
            input: None,
            outcome: None,
            auto_navigate,
            navigate_at: None,
        }
    }

    pub fn disease(&self) -> DiseaseType {
        self.disease
    }

    pub fn loading_flag(&self) -> BusyFlag {
        self.loading.clone()
    }

    pub fn saving_flag(&self) -> BusyFlag {
        self.saving.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_raised()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_raised()
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn input(&self) -> Option<&DiseaseInput> {
        self.input.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The weekly plan for the current result.
    pub fn plan(&self) -> Option<WeeklyPlan> {
        let result = self.outcome.as_ref()?.result()?;
        Some(recommendations::plan_for(self.disease, result.prediction))
    }

    /// Run a prediction for `input`.
    ///
    /// Fails only when `input` belongs to another disease; backend failures
    /// are folded into the outcome.
    pub fn submit(&mut self, input: DiseaseInput) -> DiagnoResult<&Outcome> {
        if input.disease() != self.disease {
            return Err(DiagnoError::InvalidInput {
                reason: format!(
                    "{} input submitted on the {} screen",
                    input.disease(),
                    self.disease
                ),
            });
        }

        let _busy = self.loading.raise();
        self.saved = false;
        self.navigate_at = None;

        let outcome = self.predictions.predict(&input);
        self.input = Some(input);
        Ok(self.outcome.insert(outcome))
    }

    /// Save the current input and result as a report.
    ///
    /// Returns `Skipped` without a request when there is no result, no
    /// input, or no logged-in user. On success schedules the move to
    /// `/dashboard`; see `pending_navigation`.
    pub fn save_report(&mut self) -> DiagnoResult<SaveStatus> {
        let (Some(input), Some(result)) = (
            self.input.as_ref(),
            self.outcome.as_ref().and_then(Outcome::result),
        ) else {
            return Ok(SaveStatus::Skipped);
        };
        if !matches!(self.session.current_user(), Ok(Some(_))) {
            return Ok(SaveStatus::Skipped);
        }

        let input_data = serde_json::to_string(input).map_err(|e| DiagnoError::InvalidInput {
            reason: format!("failed to encode input: {}", e),
        })?;
        let request = SaveReportRequest {
            disease_type: self.disease.slug().to_string(),
            prediction_result: result.prediction,
            probability: result.probability,
            input_data,
            prediction_message: result.message.clone(),
        };

        let _busy = self.saving.raise();
        match self.reports.save_report(&request) {
            Ok(report) => {
                self.saved = true;
                self.navigate_at = Some(Instant::now() + self.auto_navigate);
                info!(report_id = report.id, "assessment saved; leaving for dashboard");
                Ok(SaveStatus::Saved(report))
            }
            Err(e) => {
                warn!(error = %e, "saving assessment failed");
                Err(DiagnoError::RequestFailed {
                    message: SAVE_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// `/dashboard` once the post-save delay has elapsed at `now`.
    pub fn pending_navigation(&self, now: Instant) -> Option<&'static str> {
        match self.navigate_at {
            Some(at) if now >= at => Some(DASHBOARD_PATH),
            _ => None,
        }
    }
}
