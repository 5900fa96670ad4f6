//! Role-specific dashboards behind one provider interface. Adding a view for
//! a new role means writing a provider and registering it; the handler and
//! the registry stay untouched.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::config::Settings;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::domain::models::{ExaminationPaper, SessionUser};
use crate::domain::types::{AppealStatus, ReviewDecision, RiskLevel, UserRole};
use crate::repositories::appeals::{AppealFilter, AppealRepository};
use crate::repositories::papers::{PaperFilter, PaperRepository};
use crate::repositories::RepositoryError;
use crate::schemas::dashboard::{
    AppealSummary, DashboardMetric, DashboardResponse, RiskDistribution,
};

pub(crate) struct DashboardContext<'a> {
    pub(crate) user: &'a SessionUser,
    pub(crate) appeals: &'a dyn AppealRepository,
    pub(crate) papers: &'a dyn PaperRepository,
    pub(crate) settings: &'a Settings,
}

#[async_trait]
pub(crate) trait DashboardProvider: Send + Sync {
    fn role(&self) -> UserRole;

    async fn build(&self, ctx: &DashboardContext<'_>) -> Result<DashboardResponse, RepositoryError>;
}

pub(crate) struct DashboardRegistry {
    providers: HashMap<UserRole, Box<dyn DashboardProvider>>,
}

impl DashboardRegistry {
    pub(crate) fn with_default_providers() -> Self {
        let mut registry = Self { providers: HashMap::new() };
        registry.register(Box::new(StudentDashboard));
        registry.register(Box::new(TeacherDashboard));
        registry.register(Box::new(ReviewerDashboard));
        registry.register(Box::new(SecAdminDashboard));
        registry.register(Box::new(SchoolAdminDashboard));
        registry.register(Box::new(ParentDashboard));
        registry.register(Box::new(PolicyMakerDashboard));
        registry
    }

    pub(crate) fn register(&mut self, provider: Box<dyn DashboardProvider>) {
        self.providers.insert(provider.role(), provider);
    }

    pub(crate) fn provider(&self, role: UserRole) -> Option<&dyn DashboardProvider> {
        self.providers.get(&role).map(|provider| provider.as_ref())
    }
}

fn response(
    role: UserRole,
    title: &str,
    metrics: Vec<DashboardMetric>,
    appeal_summary: Option<AppealSummary>,
    risk_distribution: Option<RiskDistribution>,
) -> DashboardResponse {
    DashboardResponse {
        role: role.as_str(),
        title: title.to_string(),
        generated_at: format_primitive(primitive_now_utc()),
        metrics,
        appeal_summary,
        risk_distribution,
    }
}

fn risk_distribution(papers: &[ExaminationPaper]) -> RiskDistribution {
    let mut distribution = RiskDistribution::default();
    for paper in papers {
        for item in &paper.responses {
            let Some(decision) = &item.marking_decision else { continue };
            match decision.confidence.risk_level() {
                RiskLevel::Low => distribution.low += 1,
                RiskLevel::Medium => distribution.medium += 1,
                RiskLevel::High => distribution.high += 1,
            }
        }
    }
    distribution
}

async fn all_papers(
    papers: &dyn PaperRepository,
    filter: &PaperFilter,
) -> Result<(Vec<ExaminationPaper>, usize), RepositoryError> {
    papers.list(filter, 0, usize::MAX).await
}

/// Share of decided appeals that went in the appellant's favour, as a
/// percentage. None when nothing has been decided yet.
async fn upheld_rate(appeals: &dyn AppealRepository) -> Result<Option<f64>, RepositoryError> {
    let (all, _) = appeals.list(&AppealFilter::default(), 0, usize::MAX).await?;
    let decided: Vec<_> = all.iter().filter_map(|appeal| appeal.decision.as_ref()).collect();
    if decided.is_empty() {
        return Ok(None);
    }
    let upheld = decided
        .iter()
        .filter(|decision| {
            matches!(decision.decision, ReviewDecision::Upheld | ReviewDecision::PartiallyUpheld)
        })
        .count();
    Ok(Some(upheld as f64 * 100.0 / decided.len() as f64))
}

struct StudentDashboard;

#[async_trait]
impl DashboardProvider for StudentDashboard {
    fn role(&self) -> UserRole {
        UserRole::Student
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let filter = PaperFilter { student_id: Some(ctx.user.id.clone()), ..Default::default() };
        let (_, paper_total) = all_papers(ctx.papers, &filter).await?;
        let counts = ctx.appeals.status_counts(Some(&ctx.user.id)).await?;
        let open = counts.submitted + counts.under_review + counts.additional_info_required;

        let metrics = vec![
            DashboardMetric::count("papers_returned", paper_total),
            DashboardMetric::count("open_appeals", open),
            DashboardMetric::count("resolved_appeals", counts.completed + counts.rejected),
        ];
        Ok(response(self.role(), "My results and appeals", metrics, Some(counts.into()), None))
    }
}

struct TeacherDashboard;

#[async_trait]
impl DashboardProvider for TeacherDashboard {
    fn role(&self) -> UserRole {
        UserRole::TeacherExaminer
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let (papers, total) = all_papers(ctx.papers, &PaperFilter::default()).await?;
        let awaiting_review = papers
            .iter()
            .filter(|paper| {
                paper.marking_status == crate::domain::types::MarkingStatus::HumanReview
            })
            .count();
        let flagged = papers
            .iter()
            .flat_map(|paper| &paper.responses)
            .filter(|item| {
                item.marking_decision
                    .as_ref()
                    .map_or(false, |decision| decision.confidence.review_required())
            })
            .count();
        let overrides = papers
            .iter()
            .flat_map(|paper| &paper.responses)
            .filter(|item| item.human_override.is_some())
            .count();

        let metrics = vec![
            DashboardMetric::count("papers_total", total),
            DashboardMetric::count("papers_awaiting_human_review", awaiting_review),
            DashboardMetric::count("decisions_flagged_for_review", flagged),
            DashboardMetric::count("overrides_recorded", overrides),
        ];
        Ok(response(
            self.role(),
            "Marking review workspace",
            metrics,
            None,
            Some(risk_distribution(&papers)),
        ))
    }
}

struct ReviewerDashboard;

#[async_trait]
impl DashboardProvider for ReviewerDashboard {
    fn role(&self) -> UserRole {
        UserRole::ReviewerModerator
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let counts = ctx.appeals.status_counts(None).await?;
        let mine = AppealFilter {
            status: Some(AppealStatus::UnderReview),
            assigned_reviewer_id: Some(ctx.user.id.clone()),
            ..Default::default()
        };
        let (_, my_active) = ctx.appeals.list(&mine, 0, usize::MAX).await?;

        let metrics = vec![
            DashboardMetric::count("queue_depth", counts.submitted),
            DashboardMetric::count("my_active_cases", my_active),
            DashboardMetric::count("awaiting_appellant_info", counts.additional_info_required),
        ];
        Ok(response(self.role(), "Appeals review queue", metrics, Some(counts.into()), None))
    }
}

struct SecAdminDashboard;

#[async_trait]
impl DashboardProvider for SecAdminDashboard {
    fn role(&self) -> UserRole {
        UserRole::SecAdministrator
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let (papers, paper_total) = all_papers(ctx.papers, &PaperFilter::default()).await?;
        let counts = ctx.appeals.status_counts(None).await?;

        let mut metrics = vec![
            DashboardMetric::count("papers_total", paper_total),
            DashboardMetric::count("appeals_total", counts.total()),
            DashboardMetric::count("appeals_resolved", counts.completed + counts.rejected),
        ];
        if let Some(rate) = upheld_rate(ctx.appeals).await? {
            metrics.push(DashboardMetric::percent("appeals_upheld_rate", rate));
        }
        Ok(response(
            self.role(),
            "Examination operations",
            metrics,
            Some(counts.into()),
            Some(risk_distribution(&papers)),
        ))
    }
}

struct SchoolAdminDashboard;

#[async_trait]
impl DashboardProvider for SchoolAdminDashboard {
    fn role(&self) -> UserRole {
        UserRole::SchoolAdministrator
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let (papers, total) = all_papers(ctx.papers, &PaperFilter::default()).await?;
        let completed = papers
            .iter()
            .filter(|paper| {
                paper.marking_status == crate::domain::types::MarkingStatus::Completed
            })
            .count();
        let counts = ctx.appeals.status_counts(None).await?;

        let metrics = vec![
            DashboardMetric::count("papers_total", total),
            DashboardMetric::count("papers_marking_completed", completed),
            DashboardMetric::count("appeals_in_progress", counts.total() - counts.completed
                - counts.rejected),
        ];
        Ok(response(self.role(), "School results overview", metrics, Some(counts.into()), None))
    }
}

struct ParentDashboard;

#[async_trait]
impl DashboardProvider for ParentDashboard {
    fn role(&self) -> UserRole {
        UserRole::Parent
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        // A parent session sees exactly one child's records.
        let child_id = ctx.settings.demo().parent_child_id.clone();
        let filter = PaperFilter { student_id: Some(child_id.clone()), ..Default::default() };
        let (_, paper_total) = all_papers(ctx.papers, &filter).await?;
        let counts = ctx.appeals.status_counts(Some(&child_id)).await?;
        let open = counts.submitted + counts.under_review + counts.additional_info_required;

        let metrics = vec![
            DashboardMetric::count("child_papers_returned", paper_total),
            DashboardMetric::count("child_open_appeals", open),
            DashboardMetric::count("child_completed_appeals", counts.completed),
        ];
        Ok(response(self.role(), "My child's results", metrics, Some(counts.into()), None))
    }
}

struct PolicyMakerDashboard;

#[async_trait]
impl DashboardProvider for PolicyMakerDashboard {
    fn role(&self) -> UserRole {
        UserRole::PolicyMaker
    }

    async fn build(
        &self,
        ctx: &DashboardContext<'_>,
    ) -> Result<DashboardResponse, RepositoryError> {
        let (papers, paper_total) = all_papers(ctx.papers, &PaperFilter::default()).await?;
        let counts = ctx.appeals.status_counts(None).await?;
        let distribution = risk_distribution(&papers);
        let marked = distribution.low + distribution.medium + distribution.high;

        let mut metrics = vec![
            DashboardMetric::count("papers_total", paper_total),
            DashboardMetric::count("appeals_total", counts.total()),
        ];
        if marked > 0 {
            metrics.push(DashboardMetric::percent(
                "high_risk_decision_share",
                distribution.high as f64 * 100.0 / marked as f64,
            ));
        }
        if let Some(rate) = upheld_rate(ctx.appeals).await? {
            metrics.push(DashboardMetric::percent("appeals_upheld_rate", rate));
        }
        Ok(response(
            self.role(),
            "System-wide marking quality",
            metrics,
            Some(counts.into()),
            Some(distribution),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_role() {
        let registry = DashboardRegistry::with_default_providers();
        for role in [
            UserRole::Student,
            UserRole::TeacherExaminer,
            UserRole::ReviewerModerator,
            UserRole::SecAdministrator,
            UserRole::SchoolAdministrator,
            UserRole::Parent,
            UserRole::PolicyMaker,
        ] {
            let provider = registry.provider(role).expect("provider registered");
            assert_eq!(provider.role(), role);
        }
    }
}
