//! Read-only access to scanned papers and their marking decisions. Risk
//! bands and review flags on the responses are derived at serialization
//! time from the stored confidence scores.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::pagination::default_limit;
use crate::core::state::AppState;
use crate::domain::models::SessionUser;
use crate::domain::types::{MarkingStatus, Permission, UserRole};
use crate::repositories::papers::PaperFilter;
use crate::schemas::paper::{PaperListResponse, PaperResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_papers)).route("/:paper_id", get(get_paper))
}

#[derive(Debug, Deserialize)]
struct PaperListQuery {
    marking_status: Option<String>,
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

async fn list_papers(
    Query(query): Query<PaperListQuery>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<PaperListResponse>, ApiError> {
    let marking_status = query.marking_status.as_deref().map(parse_marking_status).transpose()?;
    let filter =
        PaperFilter { marking_status, student_id: paper_scope(&user, &state)? };

    let (items, total) = state
        .papers()
        .list(&filter, query.skip, query.limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list papers"))?;

    Ok(Json(PaperListResponse {
        items: items.iter().map(PaperResponse::from).collect(),
        total,
        skip: query.skip,
        limit: query.limit,
    }))
}

async fn get_paper(
    Path(paper_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<PaperResponse>, ApiError> {
    let paper = state
        .papers()
        .get(&paper_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load paper"))?
        .ok_or_else(|| ApiError::NotFound(format!("Paper not found: {paper_id}")))?;

    if let Some(student_id) = paper_scope(&user, &state)? {
        if paper.student_id != student_id {
            return Err(ApiError::Forbidden("Access denied"));
        }
    }

    Ok(Json(PaperResponse::from(&paper)))
}

/// Which student's papers the caller may see: `None` means unrestricted.
/// Policy makers only get aggregates, never individual papers.
fn paper_scope(user: &SessionUser, state: &AppState) -> Result<Option<String>, ApiError> {
    if user.role.has_permission(Permission::AiMarkingReview)
        || user.role.has_permission(Permission::StudentResultsSystemWide)
        || user.role.has_permission(Permission::StudentResultsSchool)
    {
        return Ok(None);
    }
    match user.role {
        UserRole::Student => Ok(Some(user.id.clone())),
        UserRole::Parent => Ok(Some(state.settings().demo().parent_child_id.clone())),
        _ => Err(ApiError::Forbidden("Not enough permissions")),
    }
}

fn parse_marking_status(value: &str) -> Result<MarkingStatus, ApiError> {
    match value {
        "pending" => Ok(MarkingStatus::Pending),
        "ai_marked" => Ok(MarkingStatus::AiMarked),
        "human_review" => Ok(MarkingStatus::HumanReview),
        "completed" => Ok(MarkingStatus::Completed),
        "appealed" => Ok(MarkingStatus::Appealed),
        other => Err(ApiError::BadRequest(format!("Unknown marking status: {other}"))),
    }
}

#[cfg(test)]
mod tests;
