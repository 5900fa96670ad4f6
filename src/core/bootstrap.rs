//! Seeds the in-memory stores with the demonstration dataset: two marked
//! papers for the demo student and a small appeals queue in assorted states.

use time::Duration;
use uuid::Uuid;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{
    AiMarkingDecision, Appeal, AppealDecision, AppealFees, ConfidenceScore, ExaminationPaper,
    HumanOverride, MarkingCriterion, QuestionResponse,
};
use crate::domain::types::{
    AppealGround, AppealStatus, MarkingStatus, OcrStatus, PaperLevel, ReviewDecision, ReviewLevel,
};

pub(crate) const DEMO_STUDENT_ID: &str = "demo-student";
pub(crate) const DEMO_STUDENT_NAME: &str = "Demo Student";
pub(crate) const DEMO_REVIEWER_ID: &str = "demo-reviewer_moderator";
pub(crate) const DEMO_REVIEWER_NAME: &str = "Demo Reviewer";

pub(crate) async fn seed_demo_data(state: &AppState) -> anyhow::Result<()> {
    let existing = state.appeals().status_counts(None).await?;
    if existing.total() > 0 {
        tracing::info!("Demo data already present; skipping seed");
        return Ok(());
    }

    for paper in demo_papers(state) {
        state.papers().insert(paper).await?;
    }
    for appeal in demo_appeals(state) {
        state.appeals().insert(appeal).await?;
    }

    tracing::info!("Seeded demo papers and appeals");
    Ok(())
}

fn demo_papers(state: &AppState) -> Vec<ExaminationPaper> {
    let now = primitive_now_utc();

    let maths = ExaminationPaper {
        id: "paper-2026-001".to_string(),
        student_id: DEMO_STUDENT_ID.to_string(),
        subject_code: "MAT1".to_string(),
        subject_name: "Mathematics".to_string(),
        level: PaperLevel::Higher,
        session_year: 2026,
        session_month: "June".to_string(),
        scanned_at: now.saturating_sub(Duration::days(30)),
        ocr_status: OcrStatus::Completed,
        ocr_confidence: 94,
        marking_status: MarkingStatus::HumanReview,
        total_marks: 24.0,
        max_marks: 32.0,
        grade: None,
        responses: vec![
            maths_response(
                "1a",
                "Solved by factorising; both roots identified.",
                8.0,
                8.0,
                96,
                "Complete and correct application of the quadratic method.",
                now,
            ),
            overridden_response(now),
            maths_response(
                "2a",
                "Integration by substitution, constant omitted.",
                7.0,
                10.0,
                81,
                "Method sound; the constant of integration and one limit substitution are missing.",
                now,
            ),
            maths_response(
                "2b",
                "Partial differentiation attempted with unclear notation.",
                3.0,
                8.0,
                58,
                "Response is difficult to parse; notation is ambiguous in two steps.",
                now,
            ),
        ],
    };

    let english = ExaminationPaper {
        id: "paper-2026-002".to_string(),
        student_id: DEMO_STUDENT_ID.to_string(),
        subject_code: "ENG1".to_string(),
        subject_name: "English".to_string(),
        level: PaperLevel::Higher,
        session_year: 2026,
        session_month: "June".to_string(),
        scanned_at: now.saturating_sub(Duration::days(28)),
        ocr_status: OcrStatus::Completed,
        ocr_confidence: 97,
        marking_status: MarkingStatus::Completed,
        total_marks: 71.0,
        max_marks: 100.0,
        grade: Some("H3".to_string()),
        responses: vec![QuestionResponse {
            id: Uuid::new_v4().to_string(),
            question_number: "1".to_string(),
            question_part: None,
            response_text: "Comparative essay on the prescribed texts.".to_string(),
            ocr_text: Some("Comparative essay on the prescribed texts.".to_string()),
            ocr_confidence: 97,
            marking_decision: Some(AiMarkingDecision {
                id: Uuid::new_v4().to_string(),
                marks: 71.0,
                max_marks: 100.0,
                confidence: ConfidenceScore {
                    overall: 92,
                    content_understanding: 93,
                    marking_scheme_application: 91,
                    language_processing: 95,
                },
                rationale: "Coherent argument sustained across both texts; clear engagement \
                            with the question."
                    .to_string(),
                criteria: vec![MarkingCriterion {
                    criterion: "Clarity of purpose".to_string(),
                    marks_awarded: 22.0,
                    max_marks: 30.0,
                    explanation: "Thesis stated early and revisited in the conclusion."
                        .to_string(),
                    evidence: vec!["Opening paragraph".to_string()],
                }],
                decided_at: now.saturating_sub(Duration::days(27)),
                agent_version: state.settings().api().version.clone(),
                bias_checked: true,
            }),
            human_override: None,
        }],
    };

    vec![maths, english]
}

fn maths_response(
    question: &str,
    text: &str,
    marks: f64,
    max_marks: f64,
    overall: u8,
    rationale: &str,
    now: time::PrimitiveDateTime,
) -> QuestionResponse {
    QuestionResponse {
        id: Uuid::new_v4().to_string(),
        question_number: question.to_string(),
        question_part: None,
        response_text: text.to_string(),
        ocr_text: Some(text.to_string()),
        ocr_confidence: overall.saturating_sub(2),
        marking_decision: Some(AiMarkingDecision {
            id: Uuid::new_v4().to_string(),
            marks,
            max_marks,
            confidence: ConfidenceScore {
                overall,
                content_understanding: overall.saturating_add(1).min(100),
                marking_scheme_application: overall.saturating_sub(3),
                language_processing: overall,
            },
            rationale: rationale.to_string(),
            criteria: vec![MarkingCriterion {
                criterion: "Method".to_string(),
                marks_awarded: marks,
                max_marks,
                explanation: rationale.to_string(),
                evidence: vec![format!("Working shown for question {question}")],
            }],
            decided_at: now.saturating_sub(Duration::days(29)),
            agent_version: "marker-2.4".to_string(),
            bias_checked: true,
        }),
        human_override: None,
    }
}

fn overridden_response(now: time::PrimitiveDateTime) -> QuestionResponse {
    let mut response = maths_response(
        "1b",
        "Elimination method with an arithmetic slip in the final line.",
        4.0,
        6.0,
        84,
        "Method correct; final values off by a sign error.",
        now,
    );
    response.human_override = Some(HumanOverride {
        id: Uuid::new_v4().to_string(),
        teacher_id: "demo-teacher_examiner".to_string(),
        teacher_name: "Demo Teacher".to_string(),
        original_marks: 4.0,
        new_marks: 5.0,
        justification: "Follow-through marks apply after the sign error.".to_string(),
        review_level: ReviewLevel::Teacher,
        overridden_at: now.saturating_sub(Duration::days(25)),
    });
    response
}

fn demo_appeals(state: &AppState) -> Vec<Appeal> {
    let now = primitive_now_utc();
    let fee = |paid: bool| AppealFees {
        required: true,
        amount: state.settings().appeals().fee_amount,
        currency: state.settings().appeals().fee_currency.clone(),
        paid,
        paid_at: paid.then(|| now.saturating_sub(Duration::days(5))),
    };

    vec![
        Appeal {
            id: "appeal-1001".to_string(),
            student_id: DEMO_STUDENT_ID.to_string(),
            student_name: DEMO_STUDENT_NAME.to_string(),
            paper_id: Some("paper-2026-001".to_string()),
            question_ids: vec!["1a".to_string(), "2a".to_string()],
            grounds: vec![AppealGround::MarkingError],
            evidence_text: Some("The substitution step on 2a follows the marking scheme."
                .to_string()),
            documents: Vec::new(),
            status: AppealStatus::Submitted,
            submitted_at: now.saturating_sub(Duration::days(5)),
            assigned_reviewer_id: None,
            info_request: None,
            decision: None,
            fees: fee(true),
            version: 1,
            updated_at: now.saturating_sub(Duration::days(5)),
        },
        Appeal {
            id: "appeal-1002".to_string(),
            student_id: DEMO_STUDENT_ID.to_string(),
            student_name: DEMO_STUDENT_NAME.to_string(),
            paper_id: Some("paper-2026-001".to_string()),
            question_ids: vec!["1b".to_string()],
            grounds: vec![AppealGround::AlternativeMethod, AppealGround::TranscriptionError],
            evidence_text: Some("The elimination route is valid; the scan dropped a minus sign."
                .to_string()),
            documents: Vec::new(),
            status: AppealStatus::UnderReview,
            submitted_at: now.saturating_sub(Duration::days(9)),
            assigned_reviewer_id: Some(DEMO_REVIEWER_ID.to_string()),
            info_request: None,
            decision: None,
            fees: fee(true),
            version: 2,
            updated_at: now.saturating_sub(Duration::days(7)),
        },
        Appeal {
            id: "appeal-1003".to_string(),
            student_id: DEMO_STUDENT_ID.to_string(),
            student_name: DEMO_STUDENT_NAME.to_string(),
            paper_id: Some("paper-2026-001".to_string()),
            question_ids: vec!["2b".to_string()],
            grounds: vec![AppealGround::UnclearQuestion],
            evidence_text: None,
            documents: Vec::new(),
            status: AppealStatus::Completed,
            submitted_at: now.saturating_sub(Duration::days(20)),
            assigned_reviewer_id: Some(DEMO_REVIEWER_ID.to_string()),
            info_request: None,
            decision: Some(AppealDecision {
                id: Uuid::new_v4().to_string(),
                reviewer_id: DEMO_REVIEWER_ID.to_string(),
                reviewer_name: DEMO_REVIEWER_NAME.to_string(),
                decision: ReviewDecision::Upheld,
                marks_delta: Some(4.0),
                explanation: "The question wording admits the appellant's reading; marks \
                              adjusted accordingly."
                    .to_string(),
                decided_at: now.saturating_sub(Duration::days(12)),
                refund_recommended: true,
            }),
            fees: fee(true),
            version: 3,
            updated_at: now.saturating_sub(Duration::days(12)),
        },
    ]
}
