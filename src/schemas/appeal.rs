use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::config::AppealSettings;
use crate::core::time::format_primitive;
use crate::domain::models::{Appeal, AppealDecision, AppealDraft, AppealFees, SupportingDocument};
use crate::domain::types::{AppealGround, ReviewDecision};
use crate::services::fees::{self, FeeQuote};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateDraftRequest {
    pub(crate) paper_id: Option<String>,
}

/// Evidence length is bounded by configuration, so the handler checks it
/// against settings rather than a fixed validator attribute.
#[derive(Debug, Deserialize)]
pub(crate) struct EvidenceRequest {
    pub(crate) evidence_text: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct DecisionRequest {
    pub(crate) decision: ReviewDecision,
    #[validate(length(min = 1, max = 4000))]
    pub(crate) reasoning: String,
    pub(crate) marks_delta: Option<f64>,
    pub(crate) version: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RequestInfoRequest {
    #[validate(length(min = 1, max = 2000))]
    pub(crate) message: String,
    pub(crate) version: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ProvideInfoRequest {
    #[validate(length(min = 1, max = 4000))]
    pub(crate) message: String,
    pub(crate) version: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaimRequest {
    pub(crate) version: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct DraftResponse {
    pub(crate) id: String,
    pub(crate) owner_id: String,
    pub(crate) paper_id: Option<String>,
    pub(crate) step: &'static str,
    pub(crate) question_ids: Vec<String>,
    pub(crate) grounds: Vec<String>,
    pub(crate) evidence_text: Option<String>,
    pub(crate) documents: Vec<DocumentResponse>,
    pub(crate) fee_quote: FeeQuote,
    pub(crate) submitted_appeal_id: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl DraftResponse {
    pub(crate) fn from_model(draft: &AppealDraft, settings: &AppealSettings) -> Self {
        Self {
            id: draft.id.clone(),
            owner_id: draft.owner_id.clone(),
            paper_id: draft.paper_id.clone(),
            step: draft.step.as_str(),
            question_ids: draft.question_ids.clone(),
            grounds: draft.grounds.iter().map(|ground| ground.code().to_string()).collect(),
            evidence_text: draft.evidence_text.clone(),
            documents: draft.documents.iter().map(DocumentResponse::from).collect(),
            fee_quote: fees::quote(settings, draft.question_ids.len()),
            submitted_appeal_id: draft.submitted_appeal_id.clone(),
            created_at: format_primitive(draft.created_at),
            updated_at: format_primitive(draft.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AppealResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) paper_id: Option<String>,
    pub(crate) question_ids: Vec<String>,
    pub(crate) grounds: Vec<String>,
    pub(crate) evidence_text: Option<String>,
    pub(crate) documents: Vec<DocumentResponse>,
    pub(crate) status: &'static str,
    pub(crate) submitted_at: String,
    pub(crate) assigned_reviewer_id: Option<String>,
    pub(crate) info_request: Option<String>,
    pub(crate) decision: Option<DecisionResponse>,
    pub(crate) fees: FeesResponse,
    pub(crate) version: u64,
    pub(crate) updated_at: String,
}

impl From<&Appeal> for AppealResponse {
    fn from(appeal: &Appeal) -> Self {
        Self {
            id: appeal.id.clone(),
            student_id: appeal.student_id.clone(),
            student_name: appeal.student_name.clone(),
            paper_id: appeal.paper_id.clone(),
            question_ids: appeal.question_ids.clone(),
            grounds: appeal.grounds.iter().map(|ground| ground.code().to_string()).collect(),
            evidence_text: appeal.evidence_text.clone(),
            documents: appeal.documents.iter().map(DocumentResponse::from).collect(),
            status: appeal.status.as_str(),
            submitted_at: format_primitive(appeal.submitted_at),
            assigned_reviewer_id: appeal.assigned_reviewer_id.clone(),
            info_request: appeal.info_request.clone(),
            decision: appeal.decision.as_ref().map(DecisionResponse::from),
            fees: FeesResponse::from(&appeal.fees),
            version: appeal.version,
            updated_at: format_primitive(appeal.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DecisionResponse {
    pub(crate) id: String,
    pub(crate) reviewer_id: String,
    pub(crate) reviewer_name: String,
    pub(crate) decision: &'static str,
    pub(crate) marks_delta: Option<f64>,
    pub(crate) explanation: String,
    pub(crate) decided_at: String,
    pub(crate) refund_recommended: bool,
}

impl From<&AppealDecision> for DecisionResponse {
    fn from(decision: &AppealDecision) -> Self {
        Self {
            id: decision.id.clone(),
            reviewer_id: decision.reviewer_id.clone(),
            reviewer_name: decision.reviewer_name.clone(),
            decision: decision.decision.as_str(),
            marks_delta: decision.marks_delta,
            explanation: decision.explanation.clone(),
            decided_at: format_primitive(decision.decided_at),
            refund_recommended: decision.refund_recommended,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FeesResponse {
    pub(crate) required: bool,
    pub(crate) amount: u32,
    pub(crate) currency: String,
    pub(crate) paid: bool,
    pub(crate) paid_at: Option<String>,
}

impl From<&AppealFees> for FeesResponse {
    fn from(fees: &AppealFees) -> Self {
        Self {
            required: fees.required,
            amount: fees.amount,
            currency: fees.currency.clone(),
            paid: fees.paid,
            paid_at: fees.paid_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DocumentResponse {
    pub(crate) id: String,
    pub(crate) filename: String,
    pub(crate) content_type: String,
    pub(crate) size_bytes: u64,
    pub(crate) sha256: String,
    pub(crate) uploaded_at: String,
}

impl From<&SupportingDocument> for DocumentResponse {
    fn from(document: &SupportingDocument) -> Self {
        Self {
            id: document.id.clone(),
            filename: document.filename.clone(),
            content_type: document.content_type.clone(),
            size_bytes: document.size_bytes,
            sha256: document.sha256.clone(),
            uploaded_at: format_primitive(document.uploaded_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AppealListResponse {
    pub(crate) items: Vec<AppealResponse>,
    pub(crate) total: usize,
    pub(crate) skip: usize,
    pub(crate) limit: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogQuestionResponse {
    pub(crate) id: &'static str,
    pub(crate) subject: &'static str,
    pub(crate) description: &'static str,
    pub(crate) marks: u32,
}

impl From<&crate::domain::catalog::AppealableQuestion> for CatalogQuestionResponse {
    fn from(question: &crate::domain::catalog::AppealableQuestion) -> Self {
        Self {
            id: question.id,
            subject: question.subject,
            description: question.description,
            marks: question.marks,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogGroundResponse {
    pub(crate) code: &'static str,
    pub(crate) label: &'static str,
    pub(crate) description: &'static str,
}

impl From<AppealGround> for CatalogGroundResponse {
    fn from(ground: AppealGround) -> Self {
        Self { code: ground.code(), label: ground.label(), description: ground.description() }
    }
}
