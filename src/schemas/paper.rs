use serde::Serialize;

use crate::core::time::format_primitive;
use crate::domain::models::{
    AiMarkingDecision, ConfidenceScore, ExaminationPaper, HumanOverride, MarkingCriterion,
    QuestionResponse,
};
use crate::domain::types::{MarkingStatus, OcrStatus, PaperLevel, ReviewLevel};

#[derive(Debug, Serialize)]
pub(crate) struct PaperResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) subject_code: String,
    pub(crate) subject_name: String,
    pub(crate) level: PaperLevel,
    pub(crate) session_year: i32,
    pub(crate) session_month: String,
    pub(crate) scanned_at: String,
    pub(crate) ocr_status: OcrStatus,
    pub(crate) ocr_confidence: u8,
    pub(crate) marking_status: MarkingStatus,
    pub(crate) total_marks: f64,
    pub(crate) max_marks: f64,
    pub(crate) grade: Option<String>,
    pub(crate) responses: Vec<ResponseDetail>,
}

impl From<&ExaminationPaper> for PaperResponse {
    fn from(paper: &ExaminationPaper) -> Self {
        Self {
            id: paper.id.clone(),
            student_id: paper.student_id.clone(),
            subject_code: paper.subject_code.clone(),
            subject_name: paper.subject_name.clone(),
            level: paper.level,
            session_year: paper.session_year,
            session_month: paper.session_month.clone(),
            scanned_at: format_primitive(paper.scanned_at),
            ocr_status: paper.ocr_status,
            ocr_confidence: paper.ocr_confidence,
            marking_status: paper.marking_status,
            total_marks: paper.total_marks,
            max_marks: paper.max_marks,
            grade: paper.grade.clone(),
            responses: paper.responses.iter().map(ResponseDetail::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseDetail {
    pub(crate) id: String,
    pub(crate) question_number: String,
    pub(crate) question_part: Option<String>,
    pub(crate) response_text: String,
    pub(crate) ocr_text: Option<String>,
    pub(crate) ocr_confidence: u8,
    pub(crate) marking_decision: Option<MarkingDecisionResponse>,
    pub(crate) human_override: Option<OverrideResponse>,
}

impl From<&QuestionResponse> for ResponseDetail {
    fn from(item: &QuestionResponse) -> Self {
        Self {
            id: item.id.clone(),
            question_number: item.question_number.clone(),
            question_part: item.question_part.clone(),
            response_text: item.response_text.clone(),
            ocr_text: item.ocr_text.clone(),
            ocr_confidence: item.ocr_confidence,
            marking_decision: item.marking_decision.as_ref().map(MarkingDecisionResponse::from),
            human_override: item.human_override.as_ref().map(OverrideResponse::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MarkingDecisionResponse {
    pub(crate) id: String,
    pub(crate) marks: f64,
    pub(crate) max_marks: f64,
    pub(crate) confidence: ConfidenceResponse,
    pub(crate) rationale: String,
    pub(crate) criteria: Vec<MarkingCriterion>,
    pub(crate) decided_at: String,
    pub(crate) agent_version: String,
    pub(crate) bias_checked: bool,
}

impl From<&AiMarkingDecision> for MarkingDecisionResponse {
    fn from(decision: &AiMarkingDecision) -> Self {
        Self {
            id: decision.id.clone(),
            marks: decision.marks,
            max_marks: decision.max_marks,
            confidence: ConfidenceResponse::from(decision.confidence),
            rationale: decision.rationale.clone(),
            criteria: decision.criteria.clone(),
            decided_at: format_primitive(decision.decided_at),
            agent_version: decision.agent_version.clone(),
            bias_checked: decision.bias_checked,
        }
    }
}

/// Confidence plus its derived presentation: risk band, badge variant and
/// whether human review is required all come from the stored sub-scores.
#[derive(Debug, Serialize)]
pub(crate) struct ConfidenceResponse {
    pub(crate) overall: u8,
    pub(crate) content_understanding: u8,
    pub(crate) marking_scheme_application: u8,
    pub(crate) language_processing: u8,
    pub(crate) risk_level: &'static str,
    pub(crate) badge_variant: &'static str,
    pub(crate) review_required: bool,
}

impl From<ConfidenceScore> for ConfidenceResponse {
    fn from(confidence: ConfidenceScore) -> Self {
        let risk = confidence.risk_level();
        Self {
            overall: confidence.overall,
            content_understanding: confidence.content_understanding,
            marking_scheme_application: confidence.marking_scheme_application,
            language_processing: confidence.language_processing,
            risk_level: match risk {
                crate::domain::types::RiskLevel::Low => "low",
                crate::domain::types::RiskLevel::Medium => "medium",
                crate::domain::types::RiskLevel::High => "high",
            },
            badge_variant: risk.badge_variant(),
            review_required: confidence.review_required(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OverrideResponse {
    pub(crate) id: String,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: String,
    pub(crate) original_marks: f64,
    pub(crate) new_marks: f64,
    pub(crate) justification: String,
    pub(crate) review_level: ReviewLevel,
    pub(crate) overridden_at: String,
}

impl From<&HumanOverride> for OverrideResponse {
    fn from(item: &HumanOverride) -> Self {
        Self {
            id: item.id.clone(),
            teacher_id: item.teacher_id.clone(),
            teacher_name: item.teacher_name.clone(),
            original_marks: item.original_marks,
            new_marks: item.new_marks,
            justification: item.justification.clone(),
            review_level: item.review_level,
            overridden_at: format_primitive(item.overridden_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PaperListResponse {
    pub(crate) items: Vec<PaperResponse>,
    pub(crate) total: usize,
    pub(crate) skip: usize,
    pub(crate) limit: usize,
}
