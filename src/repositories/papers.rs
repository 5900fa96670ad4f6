use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::ExaminationPaper;
use crate::domain::types::MarkingStatus;
use crate::repositories::RepositoryError;

#[derive(Debug, Clone, Default)]
pub(crate) struct PaperFilter {
    pub(crate) marking_status: Option<MarkingStatus>,
    pub(crate) student_id: Option<String>,
}

/// Read-mostly store of scanned papers and their marking data. Papers are
/// produced upstream (scanning and marking pipelines, out of scope here).
#[async_trait]
pub(crate) trait PaperRepository: Send + Sync {
    async fn insert(&self, paper: ExaminationPaper) -> Result<(), RepositoryError>;

    async fn get(&self, id: &str) -> Result<Option<ExaminationPaper>, RepositoryError>;

    async fn list(
        &self,
        filter: &PaperFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<ExaminationPaper>, usize), RepositoryError>;
}

#[derive(Default)]
pub(crate) struct MemoryPaperRepository {
    rows: RwLock<HashMap<String, ExaminationPaper>>,
}

impl MemoryPaperRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaperRepository for MemoryPaperRepository {
    async fn insert(&self, paper: ExaminationPaper) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        rows.insert(paper.id.clone(), paper);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ExaminationPaper>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &PaperFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<ExaminationPaper>, usize), RepositoryError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<ExaminationPaper> = rows
            .values()
            .filter(|paper| {
                filter.marking_status.map_or(true, |status| paper.marking_status == status)
                    && filter
                        .student_id
                        .as_deref()
                        .map_or(true, |student| paper.student_id == student)
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.scanned_at.cmp(&b.scanned_at).then(a.id.cmp(&b.id)));

        let total = matching.len();
        let page = matching.into_iter().skip(skip).take(limit).collect();
        Ok((page, total))
    }
}
