//! Saved assessment reports.

use tracing::info;

use diagno_contracts::{
    error::DiagnoResult,
    report::{ReportCount, SaveReportRequest, TestReport},
};
use diagno_core::ApiClient;

/// Thin proxy over `/reports/*`. Holds no state of its own.
#[derive(Clone)]
pub struct ReportClient {
    api: ApiClient,
}

impl ReportClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn my_reports(&self) -> DiagnoResult<Vec<TestReport>> {
        self.api
            .get("/reports/my-reports")
            .map_err(|e| e.surface("Failed to fetch reports"))
    }

    /// The caller's reports plus those of linked relatives.
    pub fn accessible_reports(&self) -> DiagnoResult<Vec<TestReport>> {
        self.api
            .get("/reports/accessible-reports")
            .map_err(|e| e.surface("Failed to fetch accessible reports"))
    }

    /// `disease_type` goes into the path as given.
    pub fn reports_by_disease(&self, disease_type: &str) -> DiagnoResult<Vec<TestReport>> {
        self.api
            .get(&format!("/reports/by-disease/{}", disease_type))
            .map_err(|e| e.surface("Failed to fetch reports by disease"))
    }

    pub fn report(&self, report_id: i64) -> DiagnoResult<TestReport> {
        self.api
            .get(&format!("/reports/{}", report_id))
            .map_err(|e| e.surface("Failed to fetch report"))
    }

    pub fn test_count(&self) -> DiagnoResult<u64> {
        let count: ReportCount = self
            .api
            .get("/reports/stats/count")
            .map_err(|e| e.surface("Failed to fetch test count"))?;
        Ok(count.count)
    }

    pub fn save_report(&self, request: &SaveReportRequest) -> DiagnoResult<TestReport> {
        let report: TestReport = self
            .api
            .post("/reports/save", request)
            .map_err(|e| e.surface("Failed to save report"))?;
        info!(report_id = report.id, disease = %report.disease_type, "report saved");
        Ok(report)
    }
}
