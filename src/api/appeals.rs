//! Appeal intake: a draft moves through the three-step wizard and becomes an
//! immutable appeal on submission.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{require_permission, CurrentUser};
use crate::api::validation::{validate_document_upload, validate_text};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::catalog;
use crate::domain::models::{Appeal, AppealDraft, AppealFees, SessionUser};
use crate::domain::types::{AppealGround, AppealStatus, Permission, WizardStep};
use crate::schemas::appeal::{
    AppealResponse, CatalogGroundResponse, CatalogQuestionResponse, CreateDraftRequest,
    DraftResponse, EvidenceRequest,
};
use crate::services::{documents, wizard};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/drafts", post(create_draft))
        .route("/drafts/:draft_id", get(get_draft))
        .route("/drafts/:draft_id/questions/:question_id", post(toggle_question))
        .route("/drafts/:draft_id/grounds/:ground_code", post(toggle_ground))
        .route("/drafts/:draft_id/evidence", put(set_evidence))
        .route("/drafts/:draft_id/documents", post(upload_document))
        .route("/drafts/:draft_id/advance", post(advance_step))
        .route("/drafts/:draft_id/back", post(back_step))
        .route("/drafts/:draft_id/submit", post(submit))
        .route("/catalog/questions", get(catalog_questions))
        .route("/catalog/grounds", get(catalog_grounds))
}

async fn create_draft(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    payload: Option<Json<CreateDraftRequest>>,
) -> Result<(StatusCode, Json<DraftResponse>), ApiError> {
    require_permission(&user, Permission::AppealsInitiate)?;

    let payload = payload.map(|Json(body)| body).unwrap_or_default();
    if let Some(paper_id) = &payload.paper_id {
        let paper = state
            .papers()
            .get(paper_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load paper"))?;
        if paper.is_none() {
            return Err(ApiError::BadRequest(format!("Unknown paper: {paper_id}")));
        }
    }

    let now = primitive_now_utc();
    let draft = AppealDraft {
        id: Uuid::new_v4().to_string(),
        owner_id: user.id.clone(),
        owner_name: user.full_name.clone(),
        paper_id: payload.paper_id,
        step: WizardStep::SelectQuestions,
        question_ids: Vec::new(),
        grounds: Vec::new(),
        evidence_text: None,
        documents: Vec::new(),
        submitted_appeal_id: None,
        created_at: now,
        updated_at: now,
    };

    state
        .drafts()
        .insert(draft.clone())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to store draft"))?;

    Ok((StatusCode::CREATED, Json(DraftResponse::from_model(&draft, state.settings().appeals()))))
}

async fn get_draft(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

async fn toggle_question(
    Path((draft_id, question_id)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::toggle_question(&mut draft, &question_id)?;
    save_draft(&state, &mut draft).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

async fn toggle_ground(
    Path((draft_id, ground_code)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let ground = AppealGround::from_code(&ground_code)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown appeal ground: {ground_code}")))?;

    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::toggle_ground(&mut draft, ground)?;
    save_draft(&state, &mut draft).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

async fn set_evidence(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<EvidenceRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::ensure_accepts_evidence(&draft)?;

    let evidence = payload.evidence_text.map(|text| text.trim().to_string());
    let evidence = evidence.filter(|text| !text.is_empty());
    if let Some(text) = &evidence {
        let max_chars = state.settings().appeals().max_evidence_chars;
        if text.chars().count() as u64 > max_chars {
            return Err(ApiError::BadRequest(format!(
                "Evidence exceeds the maximum length of {max_chars} characters"
            )));
        }
    }

    draft.evidence_text = evidence;
    save_draft(&state, &mut draft).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

async fn upload_document(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DraftResponse>), ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::ensure_accepts_evidence(&draft)?;

    let max_documents = state.settings().appeals().max_documents_per_appeal;
    if draft.documents.len() as u64 >= max_documents {
        return Err(ApiError::BadRequest(format!(
            "Maximum number of supporting documents exceeded ({max_documents})"
        )));
    }

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|name| name.to_string());
            content_type = field.content_type().map(|mime| mime.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
            file_bytes = Some(bytes.to_vec());
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' multipart field".to_string()))?;
    let filename =
        filename.ok_or_else(|| ApiError::BadRequest("Upload must have a filename".to_string()))?;
    let content_type = content_type
        .ok_or_else(|| ApiError::BadRequest("Upload must have a content type".to_string()))?;

    validate_document_upload(
        &filename,
        &content_type,
        &state.settings().appeals().allowed_document_extensions,
    )?;

    let max_bytes = state.settings().appeals().max_document_size_mb * 1024 * 1024;
    if bytes.len() as u64 > max_bytes {
        return Err(ApiError::BadRequest(format!(
            "Document exceeds the maximum size of {} MB",
            state.settings().appeals().max_document_size_mb
        )));
    }

    let document =
        documents::build_document(&filename, &content_type, &bytes, primitive_now_utc());
    draft.documents.push(document);
    save_draft(&state, &mut draft).await?;

    Ok((StatusCode::CREATED, Json(DraftResponse::from_model(&draft, state.settings().appeals()))))
}

async fn advance_step(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::advance(&mut draft)?;
    save_draft(&state, &mut draft).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

async fn back_step(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DraftResponse>, ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::back(&mut draft)?;
    save_draft(&state, &mut draft).await?;
    Ok(Json(DraftResponse::from_model(&draft, state.settings().appeals())))
}

/// The demo has no payment provider: the flat fee is recorded as paid at
/// submission time so the downstream refund flow has something to act on.
async fn submit(
    Path(draft_id): Path<String>,
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AppealResponse>), ApiError> {
    let mut draft = fetch_owned_draft(&state, &user, &draft_id).await?;
    wizard::ensure_submittable(&draft)?;

    if let Some(text) = &draft.evidence_text {
        validate_text("Evidence", text, state.settings().appeals().max_evidence_chars)?;
    }

    let now = primitive_now_utc();
    let appeal = Appeal {
        id: Uuid::new_v4().to_string(),
        student_id: draft.owner_id.clone(),
        student_name: draft.owner_name.clone(),
        paper_id: draft.paper_id.clone(),
        question_ids: draft.question_ids.clone(),
        grounds: draft.grounds.clone(),
        evidence_text: draft.evidence_text.clone(),
        documents: draft.documents.clone(),
        status: AppealStatus::Submitted,
        submitted_at: now,
        assigned_reviewer_id: None,
        info_request: None,
        decision: None,
        fees: AppealFees {
            required: true,
            amount: state.settings().appeals().fee_amount,
            currency: state.settings().appeals().fee_currency.clone(),
            paid: true,
            paid_at: Some(now),
        },
        version: 1,
        updated_at: now,
    };

    state
        .appeals()
        .insert(appeal.clone())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to store appeal"))?;

    draft.submitted_appeal_id = Some(appeal.id.clone());
    save_draft(&state, &mut draft).await?;

    metrics::counter!("appeals_submitted_total").increment(1);
    tracing::info!(appeal_id = %appeal.id, student_id = %appeal.student_id, "Appeal submitted");

    Ok((StatusCode::CREATED, Json(AppealResponse::from(&appeal))))
}

async fn catalog_questions(
    CurrentUser(_user): CurrentUser,
) -> Json<Vec<CatalogQuestionResponse>> {
    Json(catalog::APPEALABLE_QUESTIONS.iter().map(CatalogQuestionResponse::from).collect())
}

async fn catalog_grounds(CurrentUser(_user): CurrentUser) -> Json<Vec<CatalogGroundResponse>> {
    Json(catalog::grounds().iter().copied().map(CatalogGroundResponse::from).collect())
}

async fn fetch_owned_draft(
    state: &AppState,
    user: &SessionUser,
    draft_id: &str,
) -> Result<AppealDraft, ApiError> {
    require_permission(user, Permission::AppealsInitiate)?;

    let draft = state
        .drafts()
        .get(draft_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load draft"))?
        .ok_or_else(|| ApiError::NotFound(format!("Draft not found: {draft_id}")))?;

    if draft.owner_id != user.id {
        return Err(ApiError::Forbidden("Access denied"));
    }

    Ok(draft)
}

async fn save_draft(state: &AppState, draft: &mut AppealDraft) -> Result<(), ApiError> {
    draft.updated_at = primitive_now_utc();
    state
        .drafts()
        .save(draft.clone())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to store draft"))?;
    Ok(())
}

#[cfg(test)]
mod tests;
