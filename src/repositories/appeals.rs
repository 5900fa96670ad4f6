use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::Appeal;
use crate::domain::types::AppealStatus;
use crate::repositories::RepositoryError;

#[derive(Debug, Clone, Default)]
pub(crate) struct AppealFilter {
    pub(crate) status: Option<AppealStatus>,
    pub(crate) student_id: Option<String>,
    pub(crate) assigned_reviewer_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AppealStatusCounts {
    pub(crate) submitted: usize,
    pub(crate) under_review: usize,
    pub(crate) additional_info_required: usize,
    pub(crate) completed: usize,
    pub(crate) rejected: usize,
}

impl AppealStatusCounts {
    pub(crate) fn total(&self) -> usize {
        self.submitted
            + self.under_review
            + self.additional_info_required
            + self.completed
            + self.rejected
    }
}

/// Persistence seam for appeals. Handlers and dashboard providers only see
/// this trait, so a database-backed implementation can replace the in-memory
/// one without touching them.
#[async_trait]
pub(crate) trait AppealRepository: Send + Sync {
    async fn insert(&self, appeal: Appeal) -> Result<(), RepositoryError>;

    async fn get(&self, id: &str) -> Result<Option<Appeal>, RepositoryError>;

    /// Oldest submission first, so reviewers work the queue by age.
    async fn list(
        &self,
        filter: &AppealFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<Appeal>, usize), RepositoryError>;

    /// Replaces the stored record if `updated.version` matches what is
    /// stored, then bumps the version. Returns the record as stored.
    async fn update(&self, updated: Appeal) -> Result<Appeal, RepositoryError>;

    async fn status_counts(
        &self,
        student_id: Option<&str>,
    ) -> Result<AppealStatusCounts, RepositoryError>;
}

#[derive(Default)]
pub(crate) struct MemoryAppealRepository {
    rows: RwLock<HashMap<String, Appeal>>,
}

impl MemoryAppealRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppealRepository for MemoryAppealRepository {
    async fn insert(&self, appeal: Appeal) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        rows.insert(appeal.id.clone(), appeal);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Appeal>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &AppealFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<Appeal>, usize), RepositoryError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<Appeal> = rows
            .values()
            .filter(|appeal| {
                filter.status.map_or(true, |status| appeal.status == status)
                    && filter
                        .student_id
                        .as_deref()
                        .map_or(true, |student| appeal.student_id == student)
                    && filter.assigned_reviewer_id.as_deref().map_or(true, |reviewer| {
                        appeal.assigned_reviewer_id.as_deref() == Some(reviewer)
                    })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));

        let total = matching.len();
        let page = matching.into_iter().skip(skip).take(limit).collect();
        Ok((page, total))
    }

    async fn update(&self, updated: Appeal) -> Result<Appeal, RepositoryError> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .get_mut(&updated.id)
            .ok_or_else(|| RepositoryError::NotFound(updated.id.clone()))?;

        if stored.version != updated.version {
            return Err(RepositoryError::VersionConflict {
                expected: updated.version,
                stored: stored.version,
            });
        }

        let mut next = updated;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn status_counts(
        &self,
        student_id: Option<&str>,
    ) -> Result<AppealStatusCounts, RepositoryError> {
        let rows = self.rows.read().await;
        let mut counts = AppealStatusCounts::default();
        for appeal in rows.values() {
            if student_id.map_or(false, |student| appeal.student_id != student) {
                continue;
            }
            match appeal.status {
                AppealStatus::Submitted => counts.submitted += 1,
                AppealStatus::UnderReview => counts.under_review += 1,
                AppealStatus::AdditionalInfoRequired => counts.additional_info_required += 1,
                AppealStatus::Completed => counts.completed += 1,
                AppealStatus::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }
}
