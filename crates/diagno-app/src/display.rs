//! Formatting helpers shared by the front ends.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use diagno_contracts::{prediction::PredictionResult, report::TestReport};

/// Risk gauge value in percent.
///
/// `probability * 100` rounded, or 75 / 25 by outcome when the backend sent
/// no probability (or exactly 0). Out-of-range probabilities are not
/// clamped.
pub fn risk_percentage(result: &PredictionResult) -> i64 {
    match result.probability {
        Some(p) if p != 0.0 && !p.is_nan() => (p * 100.0 + 0.5).floor() as i64,
        _ if result.is_at_risk() => 75,
        _ => 25,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskLevel {
    pub label: &'static str,
    /// Confidence in the stated outcome, e.g. "82.0%", or "N/A".
    pub confidence: String,
}

/// Report list badge: "High Risk" with `p`, or "Low Risk" with `1 - p`.
pub fn risk_level(prediction: u8, probability: Option<f64>) -> RiskLevel {
    let at_risk = prediction == 1;
    let confidence = match probability {
        Some(p) if p != 0.0 && !p.is_nan() => {
            let shown = if at_risk { p } else { 1.0 - p };
            format!("{:.1}%", shown * 100.0)
        }
        _ => "N/A".to_string(),
    };

    RiskLevel {
        label: if at_risk { "High Risk" } else { "Low Risk" },
        confidence,
    }
}

/// Bar chart points from the first six fields of an input object.
///
/// Names lose `(`, `)`, `%` and `:` and are cut to ten characters, so
/// `MDVP:Jitter(%)` becomes `MDVPJitter`. Non-numeric values plot as 0.
pub fn chart_data(input: &Value) -> Vec<(String, f64)> {
    let Some(fields) = input.as_object() else {
        return Vec::new();
    };

    fields
        .iter()
        .take(6)
        .map(|(key, value)| {
            let name: String = key
                .chars()
                .filter(|c| !matches!(c, '(' | ')' | '%' | ':'))
                .take(10)
                .collect();
            (name, value.as_f64().unwrap_or(0.0))
        })
        .collect()
}

/// `createdAt` as "Mar 4, 2025, 09:15 AM". Unparseable text is returned
/// unchanged.
pub fn format_timestamp(created_at: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y, %I:%M %p";

    if let Ok(at) = DateTime::parse_from_rfc3339(created_at) {
        return at.format(FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(at) => at.format(FORMAT).to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Totals shown under the report list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub low_risk: usize,
    pub high_risk: usize,
}

pub fn summarize(reports: &[TestReport]) -> ReportSummary {
    ReportSummary {
        total: reports.len(),
        low_risk: reports.iter().filter(|r| r.prediction_result == 0).count(),
        high_risk: reports.iter().filter(|r| r.prediction_result == 1).count(),
    }
}
