use serde::Serialize;

use crate::repositories::appeals::AppealStatusCounts;

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) role: &'static str,
    pub(crate) title: String,
    pub(crate) generated_at: String,
    pub(crate) metrics: Vec<DashboardMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) appeal_summary: Option<AppealSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) risk_distribution: Option<RiskDistribution>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardMetric {
    pub(crate) label: &'static str,
    pub(crate) value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unit: Option<&'static str>,
}

impl DashboardMetric {
    pub(crate) fn count(label: &'static str, value: usize) -> Self {
        Self { label, value: value as f64, unit: None }
    }

    pub(crate) fn percent(label: &'static str, value: f64) -> Self {
        Self { label, value: (value * 10.0).round() / 10.0, unit: Some("percent") }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AppealSummary {
    pub(crate) submitted: usize,
    pub(crate) under_review: usize,
    pub(crate) additional_info_required: usize,
    pub(crate) completed: usize,
    pub(crate) rejected: usize,
    pub(crate) total: usize,
}

impl From<AppealStatusCounts> for AppealSummary {
    fn from(counts: AppealStatusCounts) -> Self {
        Self {
            submitted: counts.submitted,
            under_review: counts.under_review,
            additional_info_required: counts.additional_info_required,
            completed: counts.completed,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

/// Marking decisions bucketed by derived risk band.
#[derive(Debug, Default, Serialize)]
pub(crate) struct RiskDistribution {
    pub(crate) low: usize,
    pub(crate) medium: usize,
    pub(crate) high: usize,
}
