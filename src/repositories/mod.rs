pub(crate) mod appeals;
pub(crate) mod drafts;
pub(crate) mod papers;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum RepositoryError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("version conflict: expected {expected}, stored {stored}")]
    VersionConflict { expected: u64, stored: u64 },
}
