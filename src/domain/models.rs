use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::domain::severity;
use crate::domain::types::{
    AppealGround, AppealStatus, MarkingStatus, OcrStatus, PaperLevel, ReviewDecision, ReviewLevel,
    RiskLevel, UserRole, WizardStep,
};

/// Identity carried by a demo session token. There is no user store; the
/// token claims are the whole identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SessionUser {
    pub(crate) id: String,
    pub(crate) full_name: String,
    pub(crate) role: UserRole,
}

impl SessionUser {
    /// Demo identities use a stable per-role subject id so seeded records
    /// (papers, appeals) line up with fresh sessions for the same role.
    pub(crate) fn demo(role: UserRole, full_name: Option<String>) -> SessionUser {
        SessionUser {
            id: format!("demo-{}", role.as_str()),
            full_name: full_name.unwrap_or_else(|| default_demo_name(role).to_string()),
            role,
        }
    }
}

fn default_demo_name(role: UserRole) -> &'static str {
    match role {
        UserRole::TeacherExaminer => "Demo Teacher",
        UserRole::Student => "Demo Student",
        UserRole::ReviewerModerator => "Demo Reviewer",
        UserRole::SecAdministrator => "Demo SEC Administrator",
        UserRole::SchoolAdministrator => "Demo School Administrator",
        UserRole::Parent => "Demo Parent",
        UserRole::PolicyMaker => "Demo Policy Maker",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExaminationPaper {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_code: String,
    pub(crate) subject_name: String,
    pub(crate) level: PaperLevel,
    pub(crate) session_year: i32,
    pub(crate) session_month: String,
    pub(crate) scanned_at: PrimitiveDateTime,
    pub(crate) ocr_status: OcrStatus,
    pub(crate) ocr_confidence: u8,
    pub(crate) marking_status: MarkingStatus,
    pub(crate) total_marks: f64,
    pub(crate) max_marks: f64,
    pub(crate) grade: Option<String>,
    pub(crate) responses: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionResponse {
    pub(crate) id: String,
    pub(crate) question_number: String,
    pub(crate) question_part: Option<String>,
    pub(crate) response_text: String,
    pub(crate) ocr_text: Option<String>,
    pub(crate) ocr_confidence: u8,
    pub(crate) marking_decision: Option<AiMarkingDecision>,
    pub(crate) human_override: Option<HumanOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AiMarkingDecision {
    pub(crate) id: String,
    pub(crate) marks: f64,
    pub(crate) max_marks: f64,
    pub(crate) confidence: ConfidenceScore,
    pub(crate) rationale: String,
    pub(crate) criteria: Vec<MarkingCriterion>,
    pub(crate) decided_at: PrimitiveDateTime,
    pub(crate) agent_version: String,
    pub(crate) bias_checked: bool,
}

/// Confidence sub-scores on a 0-100 scale. Risk band and review-required are
/// derived, never stored, so they cannot drift from the sub-scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct ConfidenceScore {
    pub(crate) overall: u8,
    pub(crate) content_understanding: u8,
    pub(crate) marking_scheme_application: u8,
    pub(crate) language_processing: u8,
}

impl ConfidenceScore {
    pub(crate) fn risk_level(&self) -> RiskLevel {
        severity::risk_band(self.overall)
    }

    pub(crate) fn review_required(&self) -> bool {
        severity::review_required(self.overall)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MarkingCriterion {
    pub(crate) criterion: String,
    pub(crate) marks_awarded: f64,
    pub(crate) max_marks: f64,
    pub(crate) explanation: String,
    pub(crate) evidence: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HumanOverride {
    pub(crate) id: String,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: String,
    pub(crate) original_marks: f64,
    pub(crate) new_marks: f64,
    pub(crate) justification: String,
    pub(crate) review_level: ReviewLevel,
    pub(crate) overridden_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Appeal {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) paper_id: Option<String>,
    pub(crate) question_ids: Vec<String>,
    pub(crate) grounds: Vec<AppealGround>,
    pub(crate) evidence_text: Option<String>,
    pub(crate) documents: Vec<SupportingDocument>,
    pub(crate) status: AppealStatus,
    pub(crate) submitted_at: PrimitiveDateTime,
    pub(crate) assigned_reviewer_id: Option<String>,
    /// Outstanding request from the reviewer, present while the appeal sits
    /// in `additional_info_required`.
    pub(crate) info_request: Option<String>,
    pub(crate) decision: Option<AppealDecision>,
    pub(crate) fees: AppealFees,
    /// Optimistic-concurrency stamp; bumped on every accepted update.
    pub(crate) version: u64,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AppealFees {
    pub(crate) required: bool,
    pub(crate) amount: u32,
    pub(crate) currency: String,
    pub(crate) paid: bool,
    pub(crate) paid_at: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AppealDecision {
    pub(crate) id: String,
    pub(crate) reviewer_id: String,
    pub(crate) reviewer_name: String,
    pub(crate) decision: ReviewDecision,
    pub(crate) marks_delta: Option<f64>,
    pub(crate) explanation: String,
    pub(crate) decided_at: PrimitiveDateTime,
    pub(crate) refund_recommended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SupportingDocument {
    pub(crate) id: String,
    pub(crate) filename: String,
    pub(crate) content_type: String,
    pub(crate) size_bytes: u64,
    pub(crate) sha256: String,
    pub(crate) uploaded_at: PrimitiveDateTime,
}

/// Transient state of one intake wizard run. Selections are kept in first-
/// selected order; hiding a step never discards what was entered on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AppealDraft {
    pub(crate) id: String,
    pub(crate) owner_id: String,
    pub(crate) owner_name: String,
    pub(crate) paper_id: Option<String>,
    pub(crate) step: WizardStep,
    pub(crate) question_ids: Vec<String>,
    pub(crate) grounds: Vec<AppealGround>,
    pub(crate) evidence_text: Option<String>,
    pub(crate) documents: Vec<SupportingDocument>,
    pub(crate) submitted_appeal_id: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

impl AppealDraft {
    pub(crate) fn is_submitted(&self) -> bool {
        self.submitted_appeal_id.is_some()
    }
}
