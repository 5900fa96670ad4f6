//! Review side of the appeals process: the queue, claiming, information
//! requests and the final decision. Every mutation goes through the status
//! transition table and the version stamp on the record.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{require_permission, CurrentUser};
use crate::api::pagination::default_limit;
use crate::api::validation::validate_text;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{Appeal, AppealDecision, SessionUser};
use crate::domain::types::{AppealStatus, Permission, UserRole};
use crate::repositories::appeals::AppealFilter;
use crate::schemas::appeal::{
    AppealListResponse, AppealResponse, ClaimRequest, DecisionRequest, ProvideInfoRequest,
    RequestInfoRequest,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appeals))
        .route("/:appeal_id", get(get_appeal))
        .route("/:appeal_id/claim", post(claim))
        .route("/:appeal_id/request-info", post(request_info))
        .route("/:appeal_id/provide-info", post(provide_info))
        .route("/:appeal_id/decision", post(decide))
}

#[derive(Debug, Deserialize)]
struct AppealListQuery {
    status: Option<String>,
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

async fn list_appeals(
    Query(query): Query<AppealListQuery>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<AppealListResponse>, ApiError> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let filter = AppealFilter {
        status,
        student_id: appeal_scope(&user, &state)?,
        ..Default::default()
    };

    let (items, total) = state
        .appeals()
        .list(&filter, query.skip, query.limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list appeals"))?;

    Ok(Json(AppealListResponse {
        items: items.iter().map(AppealResponse::from).collect(),
        total,
        skip: query.skip,
        limit: query.limit,
    }))
}

async fn get_appeal(
    Path(appeal_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<AppealResponse>, ApiError> {
    let appeal = fetch_appeal(&state, &appeal_id).await?;

    if let Some(student_id) = appeal_scope(&user, &state)? {
        if appeal.student_id != student_id {
            return Err(ApiError::Forbidden("Access denied"));
        }
    }

    Ok(Json(AppealResponse::from(&appeal)))
}

async fn claim(
    Path(appeal_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<ClaimRequest>,
) -> Result<Json<AppealResponse>, ApiError> {
    require_permission(&user, Permission::AppealsProcess)?;

    let mut appeal = fetch_appeal(&state, &appeal_id).await?;
    ensure_transition(&appeal, AppealStatus::UnderReview)?;

    appeal.status = AppealStatus::UnderReview;
    appeal.assigned_reviewer_id = Some(user.id.clone());
    appeal.version = payload.version;
    appeal.updated_at = primitive_now_utc();

    let stored = state.appeals().update(appeal).await?;
    tracing::info!(appeal_id = %stored.id, reviewer_id = %user.id, "Appeal claimed for review");
    Ok(Json(AppealResponse::from(&stored)))
}

async fn request_info(
    Path(appeal_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<RequestInfoRequest>,
) -> Result<Json<AppealResponse>, ApiError> {
    require_permission(&user, Permission::AppealsProcess)?;
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;
    validate_text("Message", &payload.message, 2000)?;

    let mut appeal = fetch_appeal(&state, &appeal_id).await?;
    ensure_assigned_reviewer(&appeal, &user)?;
    ensure_transition(&appeal, AppealStatus::AdditionalInfoRequired)?;

    appeal.status = AppealStatus::AdditionalInfoRequired;
    appeal.info_request = Some(payload.message.trim().to_string());
    appeal.version = payload.version;
    appeal.updated_at = primitive_now_utc();

    let stored = state.appeals().update(appeal).await?;
    Ok(Json(AppealResponse::from(&stored)))
}

/// The appellant answers an information request; the appeal goes back into
/// review with the answer appended to the evidence.
async fn provide_info(
    Path(appeal_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<ProvideInfoRequest>,
) -> Result<Json<AppealResponse>, ApiError> {
    require_permission(&user, Permission::AppealsInitiate)?;
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;
    validate_text("Message", &payload.message, 4000)?;

    let mut appeal = fetch_appeal(&state, &appeal_id).await?;
    let scope = appeal_scope(&user, &state)?;
    if scope.as_deref().map_or(true, |student_id| appeal.student_id != student_id) {
        return Err(ApiError::Forbidden("Access denied"));
    }
    ensure_transition(&appeal, AppealStatus::UnderReview)?;

    let answer = payload.message.trim();
    appeal.evidence_text = Some(match appeal.evidence_text.take() {
        Some(existing) => format!("{existing}\n\n{answer}"),
        None => answer.to_string(),
    });
    appeal.status = AppealStatus::UnderReview;
    appeal.info_request = None;
    appeal.version = payload.version;
    appeal.updated_at = primitive_now_utc();

    let stored = state.appeals().update(appeal).await?;
    Ok(Json(AppealResponse::from(&stored)))
}

async fn decide(
    Path(appeal_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<DecisionRequest>,
) -> Result<Json<AppealResponse>, ApiError> {
    require_permission(&user, Permission::AppealsProcess)?;
    payload.validate().map_err(|err| ApiError::BadRequest(err.to_string()))?;
    validate_text("Reasoning", &payload.reasoning, 4000)?;

    let mut appeal = fetch_appeal(&state, &appeal_id).await?;
    ensure_assigned_reviewer(&appeal, &user)?;

    let resulting_status = payload.decision.resulting_status();
    ensure_transition(&appeal, resulting_status)?;

    let now = primitive_now_utc();
    // The fee is refundable when the appeal succeeds, fully or partially.
    let refund_recommended = resulting_status == AppealStatus::Completed;

    appeal.decision = Some(AppealDecision {
        id: Uuid::new_v4().to_string(),
        reviewer_id: user.id.clone(),
        reviewer_name: user.full_name.clone(),
        decision: payload.decision,
        marks_delta: payload.marks_delta,
        explanation: payload.reasoning.trim().to_string(),
        decided_at: now,
        refund_recommended,
    });
    appeal.status = resulting_status;
    appeal.info_request = None;
    appeal.version = payload.version;
    appeal.updated_at = now;

    let stored = state.appeals().update(appeal).await?;

    metrics::counter!("appeal_decisions_total", "decision" => payload.decision.as_str())
        .increment(1);
    tracing::info!(
        appeal_id = %stored.id,
        decision = payload.decision.as_str(),
        "Appeal decision recorded"
    );

    Ok(Json(AppealResponse::from(&stored)))
}

/// Which student's appeals the caller may see: `None` means unrestricted.
fn appeal_scope(user: &SessionUser, state: &AppState) -> Result<Option<String>, ApiError> {
    if user.role.has_permission(Permission::AppealsProcess)
        || user.role.has_permission(Permission::AppealsOversight)
        || user.role.has_permission(Permission::AppealsSupport)
    {
        return Ok(None);
    }
    match user.role {
        UserRole::Student => Ok(Some(user.id.clone())),
        UserRole::Parent => Ok(Some(state.settings().demo().parent_child_id.clone())),
        _ => Err(ApiError::Forbidden("Not enough permissions")),
    }
}

async fn fetch_appeal(state: &AppState, appeal_id: &str) -> Result<Appeal, ApiError> {
    state
        .appeals()
        .get(appeal_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load appeal"))?
        .ok_or_else(|| ApiError::NotFound(format!("Appeal not found: {appeal_id}")))
}

fn ensure_assigned_reviewer(appeal: &Appeal, user: &SessionUser) -> Result<(), ApiError> {
    if appeal.assigned_reviewer_id.as_deref() == Some(user.id.as_str()) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Only the assigned reviewer can act on this appeal"))
    }
}

fn ensure_transition(appeal: &Appeal, next: AppealStatus) -> Result<(), ApiError> {
    if appeal.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(ApiError::Conflict(format!(
            "Cannot move an appeal from '{}' to '{}'",
            appeal.status.as_str(),
            next.as_str()
        )))
    }
}

fn parse_status(value: &str) -> Result<AppealStatus, ApiError> {
    match value {
        "submitted" => Ok(AppealStatus::Submitted),
        "under_review" => Ok(AppealStatus::UnderReview),
        "additional_info_required" => Ok(AppealStatus::AdditionalInfoRequired),
        "completed" => Ok(AppealStatus::Completed),
        "rejected" => Ok(AppealStatus::Rejected),
        other => Err(ApiError::BadRequest(format!("Unknown appeal status: {other}"))),
    }
}
