use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::models::AppealDraft;
use crate::repositories::RepositoryError;

/// Storage seam for intake wizard drafts. Drafts are single-owner and
/// mutated through whole-record saves; no version stamp is needed.
#[async_trait]
pub(crate) trait DraftRepository: Send + Sync {
    async fn insert(&self, draft: AppealDraft) -> Result<(), RepositoryError>;

    async fn get(&self, id: &str) -> Result<Option<AppealDraft>, RepositoryError>;

    async fn save(&self, draft: AppealDraft) -> Result<(), RepositoryError>;
}

#[derive(Default)]
pub(crate) struct MemoryDraftRepository {
    rows: RwLock<HashMap<String, AppealDraft>>,
}

impl MemoryDraftRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftRepository for MemoryDraftRepository {
    async fn insert(&self, draft: AppealDraft) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        rows.insert(draft.id.clone(), draft);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<AppealDraft>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id).cloned())
    }

    async fn save(&self, draft: AppealDraft) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&draft.id) {
            Some(stored) => {
                *stored = draft;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(draft.id)),
        }
    }
}
