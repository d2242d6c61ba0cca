//! An in-process stand-in for the DIAGNO backend.
//!
//! `MockBackend` implements `Transport` and answers every endpoint the
//! client uses from in-memory state. It exists for tests and for the CLI's
//! `--mock` mode; all data is fictional and nothing leaves the process.
//!
//! Tokens are `mock-token-{user id}`. Saved reports keep `diseaseType`
//! exactly as submitted. Every request is recorded for later inspection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use diagno_contracts::{
    account::{AddRelativeRequest, LoginRequest, LoginResponse, SignupRequest, User, ROLE_RELATIVE, ROLE_USER},
    disease::DiseaseType,
    error::{DiagnoError, DiagnoResult},
    prediction::PredictionResult,
    report::{ReportCount, SaveReportRequest, TestReport},
};
use diagno_core::traits::{ApiRequest, ApiResponse, Method, Transport};

const TOKEN_PREFIX: &str = "mock-token-";

/// How `POST /predict/{disease}` behaves.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionMode {
    /// Answer 200 with this result for every disease.
    Respond(PredictionResult),
    /// Answer with this status and no usable body.
    Fail(u16),
    /// Answer 200 with a body that is not a `PredictionResult`.
    Malformed,
}

struct Account {
    user: User,
    password: String,
    /// Id of the account that registered this one as a relative.
    added_by: Option<i64>,
}

struct State {
    accounts: Vec<Account>,
    reports: Vec<TestReport>,
    prediction: PredictionMode,
    next_user_id: i64,
    next_report_id: i64,
    requests: Vec<ApiRequest>,
}

pub struct MockBackend {
    state: Mutex<State>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// An empty backend whose predictions fail with 503.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                accounts: Vec::new(),
                reports: Vec::new(),
                prediction: PredictionMode::Fail(503),
                next_user_id: 1,
                next_report_id: 1,
                requests: Vec::new(),
            }),
        }
    }

    /// A backend with one `USER` account (`demo` / `demo`) and a canned
    /// low-risk prediction. Used by the CLI's `--mock` mode.
    pub fn demo() -> Self {
        let backend = Self::new();
        backend.seed_user("demo", "demo", "Demo User", ROLE_USER);
        backend.set_prediction(PredictionMode::Respond(PredictionResult {
            prediction: 0,
            probability: Some(0.18),
            message: "Low risk detected".to_string(),
        }));
        backend
    }

    /// Register an account directly and return its id.
    pub fn seed_user(&self, username: &str, password: &str, full_name: &str, role: &str) -> i64 {
        self.state().create_account(
            &SignupRequest {
                username: username.to_string(),
                full_name: full_name.to_string(),
                email: format!("{}@example.org", username),
                password: password.to_string(),
                ..SignupRequest::default()
            },
            role,
            None,
        )
    }

    pub fn set_prediction(&self, mode: PredictionMode) {
        self.state().prediction = mode;
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }

    pub fn reports(&self) -> Vec<TestReport> {
        self.state().reports.clone()
    }

    /// Lock the state, reusing it if a previous holder panicked.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("mock backend state poisoned by a panicked holder; reusing it");
            poisoned.into_inner()
        })
    }
}

impl Transport for MockBackend {
    fn send(&self, request: &ApiRequest) -> DiagnoResult<ApiResponse> {
        let mut state = self.state.lock().map_err(|e| DiagnoError::Transport {
            reason: format!("mock backend state poisoned: {}", e),
        })?;
        state.requests.push(request.clone());

        let response = state.route(request);
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            status = response.status,
            "mock backend answered"
        );
        Ok(response)
    }
}

// ── Responses ─────────────────────────────────────────────────────────────────

fn ok<T: Serialize>(value: &T) -> ApiResponse {
    match serde_json::to_value(value) {
        Ok(json) => ApiResponse::json(200, &json),
        Err(e) => ApiResponse { status: 500, body: e.to_string() },
    }
}

fn bad_request(message: impl Into<String>) -> ApiResponse {
    ApiResponse::json(400, &json!({ "message": message.into() }))
}

fn unauthorized() -> ApiResponse {
    ApiResponse { status: 401, body: String::new() }
}

fn not_found() -> ApiResponse {
    ApiResponse { status: 404, body: String::new() }
}

fn parse_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiResponse> {
    let body = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(body).map_err(|e| bad_request(format!("Error: {}", e)))
}

// ── Routing ───────────────────────────────────────────────────────────────────

impl State {
    fn route(&mut self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.path.split('/').filter(|s| !s.is_empty()).collect();

        let result = match (request.method, segments.as_slice()) {
            (Method::Post, ["auth", "signin"]) => self.signin(request),
            (Method::Post, ["auth", "signup"]) => self.signup(request),
            (Method::Post, ["auth", "add-relative"]) => self.add_relative(request),
            (Method::Get, ["users", "profile"]) => self.profile(request),
            (Method::Get, ["users", "relatives"]) => self.relatives(request),
            (Method::Post, ["users", "relatives", id, "remove"]) => self.remove_relative(request, id),
            (Method::Post, ["predict", disease]) => Ok(self.predict(disease)),
            (Method::Get, ["reports", "my-reports"]) | (Method::Get, ["reports", "accessible-reports"]) => {
                self.accessible_reports(request)
            }
            (Method::Get, ["reports", "by-disease", disease]) => self.reports_by_disease(request, disease),
            (Method::Get, ["reports", "stats", "count"]) => self.count(request),
            (Method::Post, ["reports", "save"]) => self.save(request),
            (Method::Get, ["reports", id]) => self.report(request, id),
            _ => Err(not_found()),
        };

        result.unwrap_or_else(|response| response)
    }

    fn caller(&self, request: &ApiRequest) -> Result<&Account, ApiResponse> {
        let id: i64 = request
            .bearer
            .as_deref()
            .and_then(|t| t.strip_prefix(TOKEN_PREFIX))
            .and_then(|id| id.parse().ok())
            .ok_or_else(unauthorized)?;
        self.account(id).ok_or_else(unauthorized)
    }

    fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.user.id == id)
    }

    fn create_account(&mut self, request: &SignupRequest, role: &str, added_by: Option<i64>) -> i64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        self.accounts.push(Account {
            user: User {
                id,
                username: request.username.clone(),
                email: request.email.clone(),
                full_name: request.full_name.clone(),
                role: role.to_string(),
                phone_number: request.phone_number.clone(),
                gender: request.gender.clone(),
                age: request.age,
            },
            password: request.password.clone(),
            added_by,
        });
        id
    }

    fn check_unique(&self, request: &SignupRequest) -> Result<(), ApiResponse> {
        if self.accounts.iter().any(|a| a.user.username == request.username) {
            return Err(bad_request(format!(
                "Error: Username '{}' is already taken!",
                request.username
            )));
        }
        if self.accounts.iter().any(|a| a.user.email == request.email) {
            return Err(bad_request(format!("Error: Email '{}' is already in use!", request.email)));
        }
        Ok(())
    }

    /// Ids whose reports `user_id` may read: itself, the relatives it added,
    /// and the accounts that added it.
    fn accessible_ids(&self, user_id: i64) -> Vec<i64> {
        let added_me = self.account(user_id).and_then(|a| a.added_by);
        self.accounts
            .iter()
            .filter(|a| a.user.id == user_id || a.added_by == Some(user_id) || Some(a.user.id) == added_me)
            .map(|a| a.user.id)
            .collect()
    }

    // ── /auth ─────────────────────────────────────────────────────────────────

    fn signin(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let login: LoginRequest = parse_body(request)?;
        if login.role != ROLE_USER && login.role != ROLE_RELATIVE {
            return Err(bad_request("Error: Invalid role specified!"));
        }

        let account = self
            .accounts
            .iter()
            .find(|a| a.user.username == login.username && a.password == login.password)
            .ok_or_else(|| bad_request("Error: Invalid username or password!"))?;

        if account.user.role != login.role {
            return Err(bad_request(
                "Error: Invalid role for this account! Please select the correct role.",
            ));
        }
        if account.user.role == ROLE_RELATIVE && account.added_by.is_none() {
            return Err(bad_request("Error: No family members have added you as a relative yet."));
        }

        let user = &account.user;
        Ok(ok(&LoginResponse {
            token: format!("{}{}", TOKEN_PREFIX, user.id),
            token_type: "Bearer".to_string(),
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
        }))
    }

    fn signup(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let signup: SignupRequest = parse_body(request)?;
        self.check_unique(&signup)?;
        self.create_account(&signup, ROLE_USER, None);
        Ok(ok(&json!({ "message": "User registered successfully!" })))
    }

    fn add_relative(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let owner = self.caller(request)?.user.id;
        let relative: AddRelativeRequest = parse_body(request)?;
        self.check_unique(&relative.account)?;
        self.create_account(&relative.account, ROLE_RELATIVE, Some(owner));
        Ok(ok(&json!({ "message": "Relative added successfully!" })))
    }

    // ── /users ────────────────────────────────────────────────────────────────

    fn profile(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        Ok(ok(&self.caller(request)?.user))
    }

    fn relatives(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let owner = self.caller(request)?.user.id;
        let relatives: Vec<&User> = self
            .accounts
            .iter()
            .filter(|a| a.added_by == Some(owner))
            .map(|a| &a.user)
            .collect();
        Ok(ok(&relatives))
    }

    fn remove_relative(&mut self, request: &ApiRequest, id: &str) -> Result<ApiResponse, ApiResponse> {
        let owner = self.caller(request)?.user.id;
        let relative = id
            .parse::<i64>()
            .ok()
            .and_then(|id| {
                self.accounts
                    .iter_mut()
                    .find(|a| a.user.id == id && a.added_by == Some(owner))
            })
            .ok_or_else(|| bad_request("Error: Relative not found"))?;
        relative.added_by = None;
        Ok(ok(&json!({ "message": "Relative removed successfully!" })))
    }

    // ── /predict ──────────────────────────────────────────────────────────────

    fn predict(&self, disease: &str) -> ApiResponse {
        if !DiseaseType::ALL.iter().any(|d| d.slug() == disease) {
            return not_found();
        }
        match &self.prediction {
            PredictionMode::Respond(result) => ok(result),
            PredictionMode::Fail(status) => ApiResponse { status: *status, body: String::new() },
            PredictionMode::Malformed => ApiResponse { status: 200, body: "<html>ok</html>".to_string() },
        }
    }

    // ── /reports ──────────────────────────────────────────────────────────────

    fn accessible_reports(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let ids = self.accessible_ids(self.caller(request)?.user.id);
        let reports: Vec<&TestReport> = self
            .reports
            .iter()
            .rev()
            .filter(|r| ids.contains(&self.owner_of(r)))
            .collect();
        Ok(ok(&reports))
    }

    fn reports_by_disease(&self, request: &ApiRequest, disease: &str) -> Result<ApiResponse, ApiResponse> {
        let caller = &self.caller(request)?.user;
        let disease: DiseaseType = disease
            .parse()
            .map_err(|e: DiagnoError| bad_request(format!("Error: {}", e)))?;
        let reports: Vec<&TestReport> = self
            .reports
            .iter()
            .rev()
            .filter(|r| self.owner_of(r) == caller.id)
            .filter(|r| r.disease_type.parse::<DiseaseType>().map_or(false, |d| d == disease))
            .collect();
        Ok(ok(&reports))
    }

    fn report(&self, request: &ApiRequest, id: &str) -> Result<ApiResponse, ApiResponse> {
        let ids = self.accessible_ids(self.caller(request)?.user.id);
        let report = id
            .parse::<i64>()
            .ok()
            .and_then(|id| self.reports.iter().find(|r| r.id == id))
            .ok_or_else(|| bad_request("Error: Report not found"))?;
        if !ids.contains(&self.owner_of(report)) {
            return Err(bad_request("Error: Access denied to this report"));
        }
        Ok(ok(report))
    }

    fn count(&self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let ids = self.accessible_ids(self.caller(request)?.user.id);
        let count = self.reports.iter().filter(|r| ids.contains(&self.owner_of(r))).count();
        Ok(ok(&ReportCount { count: count as u64 }))
    }

    fn save(&mut self, request: &ApiRequest) -> Result<ApiResponse, ApiResponse> {
        let caller = self.caller(request)?.user.clone();
        if caller.role != ROLE_USER {
            return Err(bad_request("Error: Only main users can save health assessments."));
        }
        let save: SaveReportRequest = parse_body(request)?;
        save.disease_type
            .parse::<DiseaseType>()
            .map_err(|e| bad_request(format!("Error: {}", e)))?;

        let report = TestReport {
            id: self.next_report_id,
            disease_type: save.disease_type,
            prediction_result: save.prediction_result,
            probability: save.probability,
            input_data: save.input_data,
            prediction_message: save.prediction_message,
            created_at: Utc::now().to_rfc3339(),
            user_name: caller.full_name,
            user_email: caller.email,
        };
        self.next_report_id += 1;
        self.reports.push(report.clone());
        Ok(ok(&report))
    }

    /// Reports carry only the owner's email; map it back to an id.
    fn owner_of(&self, report: &TestReport) -> i64 {
        self.accounts
            .iter()
            .find(|a| a.user.email == report.user_email)
            .map(|a| a.user.id)
            .unwrap_or(-1)
    }
}
