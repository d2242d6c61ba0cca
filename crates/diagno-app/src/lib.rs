//! # diagno-app
//!
//! Everything a DIAGNO front end needs above the request pipeline:
//!
//! - [`prediction`]: `POST /predict/{disease}` with the offline fallback
//! - [`recommendations`]: the weekly plan lookup
//! - [`reports`]: the `/reports/*` proxy
//! - [`dashboard`]: prediction screen state (busy flags, save, redirect)
//! - [`catalog`] and [`display`]: selection cards and result formatting
//! - [`mock_backend`]: an in-memory `Transport` answering every endpoint
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let session = Arc::new(Session::new(Arc::new(FileSessionStore::new(&config.session_path))));
//! let api = ApiClient::new(Arc::new(HttpTransport::from_config(&config)?), session.clone());
//! let mut dashboard = PredictionDashboard::new(
//!     DiseaseType::Heart,
//!     PredictionClient::new(api.clone(), config.fallback),
//!     ReportClient::new(api),
//!     session,
//!     Duration::from_millis(config.auto_navigate_ms),
//! );
//! ```

pub mod catalog;
pub mod dashboard;
pub mod display;
pub mod mock_backend;
pub mod prediction;
pub mod recommendations;
pub mod reports;

pub use dashboard::{BusyFlag, PredictionDashboard, SaveStatus};
pub use mock_backend::{MockBackend, PredictionMode};
pub use prediction::{FallbackGenerator, Outcome, PredictionClient};
pub use recommendations::health_recommendations;
pub use reports::ReportClient;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::BTreeSet,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc, Mutex,
        },
        time::{Duration, Instant},
    };

    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    use diagno_contracts::{
        account::{AddRelativeRequest, SignupRequest, ROLE_RELATIVE, ROLE_USER},
        disease::{DiseaseInput, DiseaseType},
        error::{DiagnoError, DiagnoResult},
        prediction::PredictionResult,
        report::SaveReportRequest,
    };
    use diagno_core::{
        traits::{ApiRequest, ApiResponse, Transport},
        ApiClient, FallbackPolicy,
    };
    use diagno_forms::TypedForm;
    use diagno_session::{AuthService, InMemorySessionStore, Session};

    use crate::{
        catalog,
        dashboard::{BusyFlag, PredictionDashboard, SaveStatus, DASHBOARD_PATH, SAVE_FAILED_MESSAGE},
        display::{chart_data, format_timestamp, risk_level, risk_percentage, summarize},
        mock_backend::{MockBackend, PredictionMode},
        prediction::{FallbackGenerator, Outcome, PredictionClient},
        recommendations::{baseline_plan, health_recommendations},
        reports::ReportClient,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct Harness {
        backend: Arc<MockBackend>,
        session: Arc<Session>,
        api: ApiClient,
        auth: AuthService,
    }

    fn harness() -> Harness {
        harness_over(Arc::new(MockBackend::new()))
    }

    fn harness_over(backend: Arc<MockBackend>) -> Harness {
        let session = Arc::new(Session::new(Arc::new(InMemorySessionStore::new())));
        let api = ApiClient::new(backend.clone(), session.clone());
        let auth = AuthService::new(api.clone(), session.clone());
        Harness { backend, session, api, auth }
    }

    fn backend_result(prediction: u8, probability: Option<f64>) -> PredictionMode {
        PredictionMode::Respond(PredictionResult {
            prediction,
            probability,
            message: "from backend".to_string(),
        })
    }

    fn predictions(h: &Harness, policy: FallbackPolicy, seed: u64) -> PredictionClient<StdRng> {
        PredictionClient::with_generator(
            h.api.clone(),
            policy,
            FallbackGenerator::new(StdRng::seed_from_u64(seed)),
        )
    }

    fn dashboard(h: &Harness, disease: DiseaseType) -> PredictionDashboard<StdRng> {
        PredictionDashboard::new(
            disease,
            predictions(h, FallbackPolicy::Synthesize, 7),
            ReportClient::new(h.api.clone()),
            h.session.clone(),
            Duration::from_millis(2000),
        )
    }

    fn form_input(disease: DiseaseType) -> DiseaseInput {
        TypedForm::new(disease).submit().unwrap()
    }

    fn assert_canned_fallback(result: &PredictionResult, disease: DiseaseType) {
        assert!(result.prediction <= 1);
        let p = result.probability.expect("synthetic results carry a probability");
        assert!((0.0..1.0).contains(&p), "probability {p} outside [0, 1)");
        let name = disease.display_name();
        assert!(
            result.message == format!("You may be at risk of {name}")
                || result.message == format!("Low risk of {name} detected"),
            "unexpected message: {}",
            result.message
        );
    }

    fn expect_failed<T: std::fmt::Debug>(result: DiagnoResult<T>, expected: &str) {
        match result {
            Err(DiagnoError::RequestFailed { message }) => assert_eq!(message, expected),
            other => panic!("expected RequestFailed('{expected}'), got {:?}", other),
        }
    }

    // ── 1. recommendations ────────────────────────────────────────────────────

    #[test]
    fn diabetes_at_risk_plan_is_fully_specific() {
        let plan = health_recommendations("diabetes", 1);
        let base = baseline_plan();

        assert_eq!(plan.food_recommendations.len(), 5);
        assert_eq!(plan.workout_tips.len(), 4);
        assert!(plan.food_recommendations.iter().all(|f| !base.food_recommendations.contains(f)));
        assert!(plan.workout_tips.iter().all(|w| !base.workout_tips.contains(w)));
    }

    #[test]
    fn diabetes_low_risk_extends_baseline() {
        let plan = health_recommendations("diabetes", 0);
        assert_eq!(plan.sleep_hours, "7-8 hours per night");
        assert_eq!(
            plan.food_recommendations,
            vec!["Drink plenty of water", "Eat regular meals", "Maintain balanced nutrition"]
        );
        assert_eq!(plan.workout_tips.last().map(String::as_str), Some("Continue regular physical activity"));
    }

    #[test]
    fn unknown_tag_gets_baseline_regardless_of_prediction() {
        assert_eq!(health_recommendations("unknown", 0), baseline_plan());
        assert_eq!(health_recommendations("unknown", 1), baseline_plan());
        assert_eq!(health_recommendations("Diabetes", 1), baseline_plan(), "tags are exact");
    }

    #[test]
    fn at_risk_plan_sizes_per_disease() {
        for (tag, food, workout, sleep) in [
            ("heart", 5, 4, "7-9 hours per night"),
            ("stroke", 5, 4, "8-9 hours per night"),
            ("parkinsons", 5, 5, "8-9 hours per night with good sleep hygiene"),
        ] {
            let plan = health_recommendations(tag, 1);
            assert_eq!(plan.food_recommendations.len(), food, "{tag}");
            assert_eq!(plan.workout_tips.len(), workout, "{tag}");
            assert_eq!(plan.sleep_hours, sleep, "{tag}");
        }
    }

    #[test]
    fn any_non_one_prediction_is_low_risk() {
        let plan = health_recommendations("heart", 2);
        assert_eq!(plan.food_recommendations.len(), 3);
        assert_eq!(plan.food_recommendations[2], "Include heart-healthy foods like nuts and fish");
    }

    // ── 2. catalog ────────────────────────────────────────────────────────────

    #[test]
    fn catalog_covers_every_disease_with_its_colour() {
        assert_eq!(catalog::info(DiseaseType::Diabetes).color, "#f97316");
        assert_eq!(catalog::info(DiseaseType::Heart).color, "#ef4444");
        assert_eq!(catalog::info(DiseaseType::Stroke).color, "#8b5cf6");
        assert_eq!(catalog::info(DiseaseType::Parkinsons).color, "#059669");
        for disease in DiseaseType::ALL {
            assert_eq!(catalog::info(disease).disease, disease);
        }
        assert_eq!(catalog::info(DiseaseType::Heart).name(), "Heart Disease");
    }

    // ── 3. prediction ─────────────────────────────────────────────────────────

    #[test]
    fn backend_result_is_passed_through_unclamped() {
        let h = harness();
        h.backend.set_prediction(backend_result(1, Some(1.7)));

        let mut client = predictions(&h, FallbackPolicy::Synthesize, 1);
        let outcome = client.predict(&form_input(DiseaseType::Heart));

        match outcome {
            Outcome::Backend(result) => {
                assert_eq!(result.prediction, 1);
                assert_eq!(result.probability, Some(1.7));
                assert_eq!(result.message, "from backend");
            }
            other => panic!("expected Backend, got {:?}", other),
        }
    }

    /// Answers every request with the same 200 body.
    struct FixedBody(serde_json::Value);

    impl Transport for FixedBody {
        fn send(&self, _request: &ApiRequest) -> DiagnoResult<ApiResponse> {
            Ok(ApiResponse::json(200, &self.0))
        }
    }

    #[test]
    fn bare_model_answer_is_a_backend_result() {
        // The model service answers with the outcome alone.
        for body in [json!({ "prediction": 1 }), json!({ "prediction": 0, "probability": 0.12 })] {
            let api = ApiClient::new(Arc::new(FixedBody(body.clone())), Arc::new(diagno_core::traits::Anonymous));
            let mut client = PredictionClient::with_generator(
                api,
                FallbackPolicy::Synthesize,
                FallbackGenerator::new(StdRng::seed_from_u64(3)),
            );

            match client.predict(&form_input(DiseaseType::Heart)) {
                Outcome::Backend(result) => {
                    assert_eq!(u64::from(result.prediction), body["prediction"].as_u64().unwrap());
                    assert_eq!(result.probability, body["probability"].as_f64());
                    assert_eq!(result.message, "");
                }
                other => panic!("{body}: expected Backend, got {:?}", other),
            }
        }
    }

    #[test]
    fn prediction_posts_to_disease_path_with_field_names() {
        let h = harness();
        h.backend.set_prediction(backend_result(0, None));

        let client = predictions(&h, FallbackPolicy::Synthesize, 1);
        client.request(&form_input(DiseaseType::Parkinsons)).unwrap();

        let sent = h.backend.last_request().unwrap();
        assert_eq!(sent.path, "/predict/parkinsons");
        let body = sent.body.unwrap();
        assert_eq!(body.as_object().unwrap().len(), 22);
        assert!(body.get("MDVP:Fo(Hz)").is_some());
    }

    #[test]
    fn every_failure_kind_falls_back_to_synthetic() {
        for mode in [PredictionMode::Fail(500), PredictionMode::Fail(404), PredictionMode::Malformed] {
            let h = harness();
            h.backend.set_prediction(mode.clone());

            let mut client = predictions(&h, FallbackPolicy::Synthesize, 11);
            match client.predict(&form_input(DiseaseType::Stroke)) {
                Outcome::Synthetic(result) => assert_canned_fallback(&result, DiseaseType::Stroke),
                other => panic!("{:?}: expected Synthetic, got {:?}", mode, other),
            }
        }
    }

    #[test]
    fn unreachable_backend_falls_back_too() {
        struct Down;
        impl Transport for Down {
            fn send(&self, _: &ApiRequest) -> DiagnoResult<ApiResponse> {
                Err(DiagnoError::Transport { reason: "cannot connect".into() })
            }
        }

        let api = ApiClient::new(Arc::new(Down), Arc::new(diagno_core::traits::Anonymous));
        let mut client = PredictionClient::with_generator(
            api,
            FallbackPolicy::Synthesize,
            FallbackGenerator::new(StdRng::seed_from_u64(3)),
        );
        let outcome = client.predict(&form_input(DiseaseType::Diabetes));
        assert!(outcome.is_synthetic());
        assert_canned_fallback(outcome.result().unwrap(), DiseaseType::Diabetes);
    }

    #[test]
    fn unavailable_policy_shows_no_result() {
        let h = harness();
        let mut client = predictions(&h, FallbackPolicy::Unavailable, 1);

        let outcome = client.predict(&form_input(DiseaseType::Heart));
        match &outcome {
            Outcome::Unavailable { reason } => assert!(reason.contains("Heart Disease")),
            other => panic!("expected Unavailable, got {:?}", other),
        }
        assert!(outcome.result().is_none());
    }

    #[test]
    fn fallback_is_reproducible_with_a_seed() {
        let a = FallbackGenerator::new(StdRng::seed_from_u64(42)).synthesize(DiseaseType::Heart);
        let b = FallbackGenerator::new(StdRng::seed_from_u64(42)).synthesize(DiseaseType::Heart);
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_draws_are_independent() {
        // Prediction and message are separate draws, so all four
        // combinations show up across seeds.
        let mut combos = BTreeSet::new();
        for seed in 0..64 {
            let result = FallbackGenerator::new(StdRng::seed_from_u64(seed)).synthesize(DiseaseType::Stroke);
            assert_canned_fallback(&result, DiseaseType::Stroke);
            combos.insert((result.prediction, result.message.starts_with("You may be")));
        }
        assert_eq!(combos.len(), 4, "seen: {:?}", combos);
    }

    // ── 4. reports ────────────────────────────────────────────────────────────

    #[test]
    fn saved_report_reads_back_verbatim() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.auth.login("ana", "pw", ROLE_USER).unwrap();

        let reports = ReportClient::new(h.api.clone());
        let saved = reports
            .save_report(&SaveReportRequest {
                disease_type: "heart".into(),
                prediction_result: 1,
                probability: Some(0.82),
                input_data: r#"{"age":50.0}"#.into(),
                prediction_message: "You may be at risk of Heart Disease".into(),
            })
            .unwrap();
        assert_eq!(saved.user_name, "Ana Lima");

        let mine = reports.my_reports().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].disease_type, "heart");
        assert_eq!(mine[0].prediction_message, "You may be at risk of Heart Disease");
        assert_eq!(mine[0].input_data, r#"{"age":50.0}"#);

        assert_eq!(reports.test_count().unwrap(), 1);
        assert_eq!(reports.report(saved.id).unwrap(), saved);
        assert_eq!(reports.reports_by_disease("HEART").unwrap().len(), 1);
        assert!(reports.reports_by_disease("stroke").unwrap().is_empty());
    }

    #[test]
    fn report_defaults_without_session() {
        let h = harness();
        let reports = ReportClient::new(h.api.clone());

        expect_failed(reports.my_reports(), "Failed to fetch reports");
        expect_failed(reports.accessible_reports(), "Failed to fetch accessible reports");
        expect_failed(reports.reports_by_disease("heart"), "Failed to fetch reports by disease");
        expect_failed(reports.report(1), "Failed to fetch report");
        expect_failed(reports.test_count(), "Failed to fetch test count");
        expect_failed(
            reports.save_report(&SaveReportRequest {
                disease_type: "heart".into(),
                prediction_result: 0,
                probability: None,
                input_data: "{}".into(),
                prediction_message: "m".into(),
            }),
            "Failed to save report",
        );
    }

    #[test]
    fn missing_report_surfaces_backend_message() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.auth.login("ana", "pw", ROLE_USER).unwrap();

        expect_failed(ReportClient::new(h.api.clone()).report(99), "Error: Report not found");
    }

    #[test]
    fn relative_sees_owner_reports() {
        let backend = Arc::new(MockBackend::new());
        let owner = harness_over(backend.clone());
        backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        owner.auth.login("ana", "pw", ROLE_USER).unwrap();
        owner
            .auth
            .add_relative(&AddRelativeRequest {
                account: SignupRequest {
                    username: "bo".into(),
                    full_name: "Bo Lima".into(),
                    email: "bo@example.org".into(),
                    password: "pw2".into(),
                    ..SignupRequest::default()
                },
                relationship: Some("parent".into()),
            })
            .unwrap();

        let mut screen = dashboard(&owner, DiseaseType::Diabetes);
        backend.set_prediction(backend_result(0, Some(0.1)));
        screen.submit(form_input(DiseaseType::Diabetes)).unwrap();
        assert!(matches!(screen.save_report().unwrap(), SaveStatus::Saved(_)));

        let relative = harness_over(backend.clone());
        let login = relative.auth.login("bo", "pw2", ROLE_RELATIVE).unwrap();
        assert_eq!(login.role, ROLE_RELATIVE);

        let visible = ReportClient::new(relative.api.clone()).accessible_reports().unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].user_name, "Ana Lima");
    }

    // ── 5. dashboard ──────────────────────────────────────────────────────────

    /// Forwards to a `MockBackend` and notes whether a watched flag was
    /// raised while a request was in flight.
    struct Watching {
        inner: MockBackend,
        flag: Mutex<Option<BusyFlag>>,
        raised_during_send: AtomicBool,
    }

    impl Transport for Watching {
        fn send(&self, request: &ApiRequest) -> DiagnoResult<ApiResponse> {
            if let Some(flag) = self.flag.lock().unwrap().as_ref() {
                if flag.is_raised() {
                    self.raised_during_send.store(true, Ordering::SeqCst);
                }
            }
            self.inner.send(request)
        }
    }

    #[test]
    fn failed_prediction_lowers_loading_and_shows_fallback() {
        let watching = Arc::new(Watching {
            inner: MockBackend::new(),
            flag: Mutex::new(None),
            raised_during_send: AtomicBool::new(false),
        });
        watching.inner.set_prediction(PredictionMode::Fail(500));

        let session = Arc::new(Session::new(Arc::new(InMemorySessionStore::new())));
        let api = ApiClient::new(watching.clone(), session.clone());
        let mut screen = PredictionDashboard::new(
            DiseaseType::Heart,
            PredictionClient::with_generator(
                api.clone(),
                FallbackPolicy::Synthesize,
                FallbackGenerator::new(StdRng::seed_from_u64(5)),
            ),
            ReportClient::new(api),
            session,
            Duration::from_millis(2000),
        );
        *watching.flag.lock().unwrap() = Some(screen.loading_flag());

        let outcome = screen.submit(form_input(DiseaseType::Heart)).unwrap().clone();

        assert!(watching.raised_during_send.load(Ordering::SeqCst), "loading must be raised in flight");
        assert!(!screen.is_loading(), "loading must be lowered afterwards");
        assert!(outcome.is_synthetic());
        assert_canned_fallback(outcome.result().unwrap(), DiseaseType::Heart);
        assert!(screen.plan().is_some());
    }

    #[test]
    fn save_flow_schedules_dashboard_redirect() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.backend.set_prediction(backend_result(1, Some(0.64)));
        h.auth.login("ana", "pw", ROLE_USER).unwrap();

        let mut screen = dashboard(&h, DiseaseType::Heart);
        screen.submit(form_input(DiseaseType::Heart)).unwrap();
        let status = screen.save_report().unwrap();

        let report = match status {
            SaveStatus::Saved(report) => report,
            other => panic!("expected Saved, got {:?}", other),
        };
        assert_eq!(report.disease_type, "heart");
        assert_eq!(report.prediction_result, 1);
        assert_eq!(report.probability, Some(0.64));
        let stored: serde_json::Value = serde_json::from_str(&report.input_data).unwrap();
        assert_eq!(stored["thal"], json!(2));

        assert!(screen.is_saved());
        assert!(!screen.is_saving());
        assert_eq!(screen.pending_navigation(Instant::now()), None);
        assert_eq!(
            screen.pending_navigation(Instant::now() + Duration::from_secs(3)),
            Some(DASHBOARD_PATH)
        );

        // A new submission clears the saved state.
        screen.submit(form_input(DiseaseType::Heart)).unwrap();
        assert!(!screen.is_saved());
        assert_eq!(screen.pending_navigation(Instant::now() + Duration::from_secs(3)), None);
    }

    #[test]
    fn save_is_skipped_without_user_or_result() {
        let h = harness();
        h.backend.set_prediction(backend_result(0, None));
        let mut screen = dashboard(&h, DiseaseType::Stroke);

        assert_eq!(screen.save_report().unwrap(), SaveStatus::Skipped);

        screen.submit(form_input(DiseaseType::Stroke)).unwrap();
        assert_eq!(screen.save_report().unwrap(), SaveStatus::Skipped, "nobody logged in");

        assert!(h.backend.requests().iter().all(|r| r.path != "/reports/save"));
    }

    #[test]
    fn unavailable_outcome_cannot_be_saved() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.auth.login("ana", "pw", ROLE_USER).unwrap();

        let mut screen = PredictionDashboard::new(
            DiseaseType::Diabetes,
            predictions(&h, FallbackPolicy::Unavailable, 1),
            ReportClient::new(h.api.clone()),
            h.session.clone(),
            Duration::from_millis(2000),
        );
        screen.submit(form_input(DiseaseType::Diabetes)).unwrap();

        assert!(screen.plan().is_none());
        assert_eq!(screen.save_report().unwrap(), SaveStatus::Skipped);
    }

    #[test]
    fn save_failure_uses_fixed_message() {
        // Only USER accounts may save; a linked relative is refused.
        let backend = Arc::new(MockBackend::new());
        let owner = harness_over(backend.clone());
        backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        owner.auth.login("ana", "pw", ROLE_USER).unwrap();
        owner
            .auth
            .add_relative(&AddRelativeRequest {
                account: SignupRequest {
                    username: "bo".into(),
                    full_name: "Bo Lima".into(),
                    email: "bo@example.org".into(),
                    password: "pw2".into(),
                    ..SignupRequest::default()
                },
                relationship: None,
            })
            .unwrap();

        let relative = harness_over(backend.clone());
        relative.auth.login("bo", "pw2", ROLE_RELATIVE).unwrap();
        backend.set_prediction(backend_result(0, Some(0.2)));

        let mut screen = dashboard(&relative, DiseaseType::Diabetes);
        screen.submit(form_input(DiseaseType::Diabetes)).unwrap();

        expect_failed(screen.save_report(), SAVE_FAILED_MESSAGE);
        assert!(!screen.is_saved());
        assert!(!screen.is_saving());
        assert_eq!(screen.pending_navigation(Instant::now() + Duration::from_secs(3)), None);
    }

    #[test]
    fn submit_rejects_other_disease_input() {
        let h = harness();
        let mut screen = dashboard(&h, DiseaseType::Heart);
        let result = screen.submit(form_input(DiseaseType::Stroke));
        assert!(matches!(result, Err(DiagnoError::InvalidInput { .. })));
        assert!(screen.outcome().is_none());
        assert!(h.backend.requests().is_empty());
    }

    #[test]
    fn busy_guard_lowers_flag_on_drop() {
        let flag = BusyFlag::new();
        let observer = flag.clone();
        {
            let _guard = flag.raise();
            assert!(observer.is_raised());
        }
        assert!(!observer.is_raised());
    }

    // ── 6. display ────────────────────────────────────────────────────────────

    #[test]
    fn risk_percentage_uses_probability_or_outcome_default() {
        let result = |prediction, probability| PredictionResult {
            prediction,
            probability,
            message: String::new(),
        };
        assert_eq!(risk_percentage(&result(1, Some(0.826))), 83);
        assert_eq!(risk_percentage(&result(0, Some(0.125))), 13);
        assert_eq!(risk_percentage(&result(1, None)), 75);
        assert_eq!(risk_percentage(&result(0, None)), 25);
        assert_eq!(risk_percentage(&result(1, Some(0.0))), 75);
        assert_eq!(risk_percentage(&result(1, Some(1.7))), 170);
    }

    #[test]
    fn risk_level_reports_confidence_in_stated_outcome() {
        let high = risk_level(1, Some(0.82));
        assert_eq!(high.label, "High Risk");
        assert_eq!(high.confidence, "82.0%");

        let low = risk_level(0, Some(0.25));
        assert_eq!(low.label, "Low Risk");
        assert_eq!(low.confidence, "75.0%");

        assert_eq!(risk_level(0, None).confidence, "N/A");
    }

    #[test]
    fn chart_data_takes_six_cleaned_names() {
        let body = form_input(DiseaseType::Parkinsons).to_json().unwrap();
        let points = chart_data(&body);

        assert_eq!(points.len(), 6);
        let names: Vec<&str> = points.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["MDVPFoHz", "MDVPFhiHz", "MDVPFloHz", "MDVPJitter", "MDVPJitter", "MDVPRAP"]);
        assert_eq!(points[0].1, 150.0);

        assert!(chart_data(&json!("not an object")).is_empty());
    }

    #[test]
    fn timestamps_format_or_pass_through() {
        assert_eq!(format_timestamp("2025-03-04T09:15:00Z"), "Mar 4, 2025, 09:15 AM");
        assert_eq!(format_timestamp("2025-11-20T17:05:30.123"), "Nov 20, 2025, 05:05 PM");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn summary_counts_outcomes() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.auth.login("ana", "pw", ROLE_USER).unwrap();

        let mut screen = dashboard(&h, DiseaseType::Stroke);
        for prediction in [0, 1, 1] {
            h.backend.set_prediction(backend_result(prediction, Some(0.5)));
            screen.submit(form_input(DiseaseType::Stroke)).unwrap();
            screen.save_report().unwrap();
        }

        let summary = summarize(&ReportClient::new(h.api.clone()).my_reports().unwrap());
        assert_eq!((summary.total, summary.low_risk, summary.high_risk), (3, 1, 2));
    }

    // ── 7. mock backend ───────────────────────────────────────────────────────

    #[test]
    fn signup_then_login_round() {
        let h = harness();
        let request = SignupRequest {
            username: "cy".into(),
            full_name: "Cy Reis".into(),
            email: "cy@example.org".into(),
            password: "pw".into(),
            age: Some(40),
            ..SignupRequest::default()
        };
        h.auth.signup(&request).unwrap();
        expect_failed(h.auth.signup(&request), "Error: Username 'cy' is already taken!");

        h.auth.login("cy", "pw", ROLE_USER).unwrap();
        let profile = h.auth.profile().unwrap();
        assert_eq!(profile.age, Some(40));
        assert_eq!(profile.role, ROLE_USER);
    }

    #[test]
    fn login_rejections_carry_backend_text() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.backend.seed_user("lone", "pw", "Lone Relative", ROLE_RELATIVE);

        expect_failed(h.auth.login("ana", "nope", ROLE_USER), "Error: Invalid username or password!");
        expect_failed(
            h.auth.login("ana", "pw", ROLE_RELATIVE),
            "Error: Invalid role for this account! Please select the correct role.",
        );
        expect_failed(
            h.auth.login("lone", "pw", ROLE_RELATIVE),
            "Error: No family members have added you as a relative yet.",
        );
        expect_failed(h.auth.login("ana", "pw", "ADMIN"), "Error: Invalid role specified!");
        assert!(!h.auth.is_authenticated());
    }

    #[test]
    fn logout_sends_no_bearer_afterwards() {
        let h = harness();
        h.backend.seed_user("ana", "pw", "Ana Lima", ROLE_USER);
        h.auth.login("ana", "pw", ROLE_USER).unwrap();
        h.auth.logout().unwrap();

        expect_failed(h.auth.profile(), "Failed to fetch profile");
        assert_eq!(h.backend.last_request().unwrap().bearer, None);
    }
}
