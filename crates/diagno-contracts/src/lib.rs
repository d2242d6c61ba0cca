//! # diagno-contracts
//!
//! Shared wire types and the error type for the DIAGNO prediction client.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod account;
pub mod disease;
pub mod error;
pub mod prediction;
pub mod report;

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;
    use account::{AddRelativeRequest, LoginResponse, SignupRequest, User};
    use disease::{DiabetesInput, DiseaseInput, DiseaseType, ParkinsonsInput};
    use error::DiagnoError;
    use prediction::{PredictionResult, WeeklyPlan};
    use report::TestReport;

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    fn parkinsons_sample() -> ParkinsonsInput {
        ParkinsonsInput {
            fo_hz: 150.0,
            fhi_hz: 200.0,
            flo_hz: 100.0,
            jitter_percent: 0.005,
            jitter_abs: 0.00005,
            rap: 0.003,
            ppq: 0.003,
            jitter_ddp: 0.009,
            shimmer: 0.03,
            shimmer_db: 0.3,
            shimmer_apq3: 0.015,
            shimmer_apq5: 0.018,
            apq: 0.02,
            shimmer_dda: 0.045,
            nhr: 0.02,
            hnr: 20.0,
            rpde: 0.5,
            dfa: 0.7,
            spread1: -6.0,
            spread2: 0.2,
            d2: 2.5,
            ppe: 0.2,
        }
    }

    // ── DiseaseType ──────────────────────────────────────────────────────────

    #[test]
    fn disease_type_parses_case_insensitively() {
        assert_eq!("heart".parse::<DiseaseType>().unwrap(), DiseaseType::Heart);
        assert_eq!("DIABETES".parse::<DiseaseType>().unwrap(), DiseaseType::Diabetes);
        assert_eq!(" Parkinsons ".parse::<DiseaseType>().unwrap(), DiseaseType::Parkinsons);
    }

    #[test]
    fn disease_type_rejects_unknown_tag() {
        match "liver".parse::<DiseaseType>() {
            Err(DiagnoError::UnknownDisease { tag }) => assert_eq!(tag, "liver"),
            other => panic!("expected UnknownDisease, got {:?}", other),
        }
    }

    #[test]
    fn disease_type_slug_matches_serde_name() {
        for disease in DiseaseType::ALL {
            let json = serde_json::to_value(disease).unwrap();
            assert_eq!(json, json!(disease.slug()));
        }
    }

    // ── DiseaseInput wire shape ──────────────────────────────────────────────

    #[test]
    fn diabetes_input_uses_camel_case_keys() {
        let input = DiseaseInput::Diabetes(DiabetesInput {
            pregnancies: 0.0,
            glucose: 120.0,
            blood_pressure: 80.0,
            skin_thickness: 20.0,
            insulin: 80.0,
            bmi: 25.0,
            diabetes_pedigree_function: 0.5,
            age: 30.0,
        });
        let body = input.to_json().unwrap();

        let expected: BTreeSet<String> = [
            "pregnancies",
            "glucose",
            "bloodPressure",
            "skinThickness",
            "insulin",
            "bmi",
            "diabetesPedigreeFunction",
            "age",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(keys(&body), expected);
    }

    #[test]
    fn parkinsons_input_keeps_punctuated_keys() {
        let body = DiseaseInput::Parkinsons(parkinsons_sample()).to_json().unwrap();
        let keys = keys(&body);

        assert_eq!(keys.len(), 22);
        assert!(keys.contains("MDVP:Fo(Hz)"));
        assert!(keys.contains("MDVP:Jitter(%)"));
        assert!(keys.contains("Shimmer:DDA"));
        assert!(keys.contains("spread1"));
        assert_eq!(body["MDVP:Fo(Hz)"], json!(150.0));
    }

    #[test]
    fn from_json_rejects_missing_fields() {
        let result = DiseaseInput::from_json(DiseaseType::Heart, json!({ "age": 50 }));
        match result {
            Err(DiagnoError::InvalidInput { reason }) => assert!(reason.contains("heart")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn from_json_builds_the_matching_variant() {
        let body = DiseaseInput::Parkinsons(parkinsons_sample()).to_json().unwrap();
        let decoded = DiseaseInput::from_json(DiseaseType::Parkinsons, body).unwrap();
        assert_eq!(decoded.disease(), DiseaseType::Parkinsons);
        assert_eq!(decoded, DiseaseInput::Parkinsons(parkinsons_sample()));
    }

    // ── PredictionResult / WeeklyPlan ────────────────────────────────────────

    #[test]
    fn prediction_result_probability_is_optional() {
        let parsed: PredictionResult =
            serde_json::from_str(r#"{"prediction":1,"message":"at risk"}"#).unwrap();
        assert!(parsed.is_at_risk());
        assert_eq!(parsed.probability, None);

        let json = serde_json::to_value(&parsed).unwrap();
        assert!(json.get("probability").is_none());
    }

    #[test]
    fn prediction_result_keeps_out_of_range_probability() {
        let parsed: PredictionResult =
            serde_json::from_str(r#"{"prediction":0,"probability":1.7,"message":"x"}"#).unwrap();
        assert_eq!(parsed.probability, Some(1.7));
    }

    #[test]
    fn weekly_plan_serializes_camel_case() {
        let plan = WeeklyPlan {
            sleep_hours: "7-8 hours per night".to_string(),
            food_recommendations: vec!["Drink plenty of water".to_string()],
            workout_tips: vec![],
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("sleepHours").is_some());
        assert!(json.get("foodRecommendations").is_some());
        assert!(json.get("workoutTips").is_some());
    }

    // ── Account types ────────────────────────────────────────────────────────

    #[test]
    fn login_response_reads_type_field() {
        let parsed: LoginResponse = serde_json::from_value(json!({
            "token": "abc",
            "type": "Bearer",
            "id": 7,
            "username": "ana",
            "email": "ana@example.com",
            "fullName": "Ana Lima",
            "role": "RELATIVE"
        }))
        .unwrap();

        assert_eq!(parsed.token_type, "Bearer");
        let user: User = parsed.user();
        assert_eq!(user.full_name, "Ana Lima");
        assert_eq!(user.role, "RELATIVE");
    }

    #[test]
    fn add_relative_request_flattens_signup_fields() {
        let request = AddRelativeRequest {
            account: SignupRequest {
                username: "kid".to_string(),
                full_name: "Kid Lima".to_string(),
                email: "kid@example.com".to_string(),
                password: "secret1".to_string(),
                age: Some(12),
                ..SignupRequest::default()
            },
            relationship: Some("child".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["username"], json!("kid"));
        assert_eq!(json["fullName"], json!("Kid Lima"));
        assert_eq!(json["relationship"], json!("child"));
        assert!(json.get("phoneNumber").is_none());
        assert!(json.get("account").is_none());
    }

    #[test]
    fn test_report_parses_backend_shape() {
        let parsed: TestReport = serde_json::from_value(json!({
            "id": 3,
            "diseaseType": "DIABETES",
            "predictionResult": 1,
            "probability": 0.81,
            "inputData": "{\"glucose\":180}",
            "predictionMessage": "You may be at risk of Diabetes",
            "createdAt": "2026-01-04T10:00:00",
            "userName": "Ana Lima",
            "userEmail": "ana@example.com"
        }))
        .unwrap();
        assert_eq!(parsed.disease_type, "DIABETES");
        assert_eq!(parsed.probability, Some(0.81));
    }

    // ── DiagnoError ──────────────────────────────────────────────────────────

    #[test]
    fn surface_prefers_backend_message() {
        let err = DiagnoError::Status {
            status: 400,
            message: Some("Error: Invalid username or password!".to_string()),
        };
        let surfaced = err.surface("Login failed");
        assert_eq!(surfaced.to_string(), "Error: Invalid username or password!");
    }

    #[test]
    fn surface_falls_back_to_default() {
        let transport = DiagnoError::Transport { reason: "connection refused".to_string() };
        assert_eq!(transport.surface("Login failed").to_string(), "Login failed");

        let empty = DiagnoError::Status { status: 500, message: Some(String::new()) };
        assert_eq!(empty.surface("Signup failed").to_string(), "Signup failed");
    }

    #[test]
    fn form_constraint_display_lists_violations() {
        let err = DiagnoError::FormConstraint {
            violations: vec!["age below 21".to_string(), "bmi above 70".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("age below 21"));
        assert!(msg.contains("bmi above 70"));
    }
}
