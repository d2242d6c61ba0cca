//! Saved assessment (test report) wire types.
//!
//! Reports are owned by the backend. The client submits new ones and reads
//! them back; it never edits or deletes them.

use serde::{Deserialize, Serialize};

/// A past assessment as returned by the `/reports/*` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub id: i64,
    pub disease_type: String,
    pub prediction_result: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// The submitted input record, as a JSON string.
    pub input_data: String,
    pub prediction_message: String,
    pub created_at: String,
    /// Full name of the account the report belongs to.
    pub user_name: String,
    pub user_email: String,
}

/// Body of `POST /reports/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportRequest {
    pub disease_type: String,
    pub prediction_result: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    pub input_data: String,
    pub prediction_message: String,
}

/// Response of `GET /reports/stats/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCount {
    pub count: u64,
}
