use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum UserRole {
    TeacherExaminer,
    Student,
    ReviewerModerator,
    SecAdministrator,
    SchoolAdministrator,
    Parent,
    PolicyMaker,
}

impl UserRole {
    pub(crate) const ALL: &'static [UserRole] = &[
        UserRole::TeacherExaminer,
        UserRole::Student,
        UserRole::ReviewerModerator,
        UserRole::SecAdministrator,
        UserRole::SchoolAdministrator,
        UserRole::Parent,
        UserRole::PolicyMaker,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            UserRole::TeacherExaminer => "teacher_examiner",
            UserRole::Student => "student",
            UserRole::ReviewerModerator => "reviewer_moderator",
            UserRole::SecAdministrator => "sec_administrator",
            UserRole::SchoolAdministrator => "school_administrator",
            UserRole::Parent => "parent",
            UserRole::PolicyMaker => "policy_maker",
        }
    }

    /// Permission matrix carried over from the platform's RBAC definition.
    pub(crate) fn permissions(self) -> &'static [Permission] {
        match self {
            UserRole::TeacherExaminer => &[
                Permission::AiMarkingReview,
                Permission::AiMarkingOverride,
                Permission::StudentResultsAssigned,
                Permission::Reporting,
            ],
            UserRole::Student => &[Permission::StudentResultsOwn, Permission::AppealsInitiate],
            UserRole::ReviewerModerator => &[
                Permission::AiMarkingReview,
                Permission::AiMarkingOverride,
                Permission::AppealsProcess,
                Permission::SystemAnalytics,
                Permission::Reporting,
            ],
            UserRole::SecAdministrator => &[
                Permission::AiMarkingReview,
                Permission::StudentResultsSystemWide,
                Permission::AppealsOversight,
                Permission::SystemAnalytics,
                Permission::UserManagement,
                Permission::Reporting,
            ],
            UserRole::SchoolAdministrator => &[
                Permission::StudentResultsSchool,
                Permission::AppealsSupport,
                Permission::UserManagement,
                Permission::Reporting,
            ],
            UserRole::Parent => &[Permission::StudentResultsChild, Permission::AppealsInitiate],
            UserRole::PolicyMaker => &[
                Permission::StudentResultsAggregated,
                Permission::SystemAnalytics,
                Permission::Reporting,
            ],
        }
    }

    pub(crate) fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Permission {
    AiMarkingReview,
    AiMarkingOverride,
    StudentResultsAssigned,
    StudentResultsOwn,
    StudentResultsSystemWide,
    StudentResultsSchool,
    StudentResultsChild,
    StudentResultsAggregated,
    AppealsInitiate,
    AppealsProcess,
    AppealsOversight,
    AppealsSupport,
    SystemAnalytics,
    UserManagement,
    Reporting,
}

impl Permission {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Permission::AiMarkingReview => "ai_marking_review",
            Permission::AiMarkingOverride => "ai_marking_override",
            Permission::StudentResultsAssigned => "student_results_assigned",
            Permission::StudentResultsOwn => "student_results_own",
            Permission::StudentResultsSystemWide => "student_results_system_wide",
            Permission::StudentResultsSchool => "student_results_school",
            Permission::StudentResultsChild => "student_results_child",
            Permission::StudentResultsAggregated => "student_results_aggregated",
            Permission::AppealsInitiate => "appeals_initiate",
            Permission::AppealsProcess => "appeals_process",
            Permission::AppealsOversight => "appeals_oversight",
            Permission::AppealsSupport => "appeals_support",
            Permission::SystemAnalytics => "system_analytics",
            Permission::UserManagement => "user_management",
            Permission::Reporting => "reporting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AppealStatus {
    Submitted,
    UnderReview,
    AdditionalInfoRequired,
    Completed,
    Rejected,
}

impl AppealStatus {
    /// Allowed transitions; everything not listed here is a conflict.
    pub(crate) fn can_transition_to(self, next: AppealStatus) -> bool {
        matches!(
            (self, next),
            (AppealStatus::Submitted, AppealStatus::UnderReview)
                | (AppealStatus::Submitted, AppealStatus::Rejected)
                | (AppealStatus::UnderReview, AppealStatus::AdditionalInfoRequired)
                | (AppealStatus::UnderReview, AppealStatus::Completed)
                | (AppealStatus::UnderReview, AppealStatus::Rejected)
                | (AppealStatus::AdditionalInfoRequired, AppealStatus::UnderReview)
        )
    }

    pub(crate) fn is_terminal(self) -> bool {
        matches!(self, AppealStatus::Completed | AppealStatus::Rejected)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            AppealStatus::Submitted => "submitted",
            AppealStatus::UnderReview => "under_review",
            AppealStatus::AdditionalInfoRequired => "additional_info_required",
            AppealStatus::Completed => "completed",
            AppealStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AppealGround {
    MarkingError,
    AlternativeMethod,
    TranscriptionError,
    UnclearQuestion,
    TechnicalIssue,
}

impl AppealGround {
    pub(crate) const ALL: &'static [AppealGround] = &[
        AppealGround::MarkingError,
        AppealGround::AlternativeMethod,
        AppealGround::TranscriptionError,
        AppealGround::UnclearQuestion,
        AppealGround::TechnicalIssue,
    ];

    pub(crate) fn code(self) -> &'static str {
        match self {
            AppealGround::MarkingError => "marking_error",
            AppealGround::AlternativeMethod => "alternative_method",
            AppealGround::TranscriptionError => "transcription_error",
            AppealGround::UnclearQuestion => "unclear_question",
            AppealGround::TechnicalIssue => "technical_issue",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            AppealGround::MarkingError => "Marking Error",
            AppealGround::AlternativeMethod => "Alternative Method",
            AppealGround::TranscriptionError => "Transcription Error",
            AppealGround::UnclearQuestion => "Unclear Question",
            AppealGround::TechnicalIssue => "Technical Issue",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            AppealGround::MarkingError => "Incorrect application of marking scheme",
            AppealGround::AlternativeMethod => "Valid approach not recognized",
            AppealGround::TranscriptionError => "OCR misread the response",
            AppealGround::UnclearQuestion => "Ambiguous wording or instructions",
            AppealGround::TechnicalIssue => "System or scanning problems",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<AppealGround> {
        AppealGround::ALL.iter().copied().find(|ground| ground.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewDecision {
    Upheld,
    PartiallyUpheld,
    Rejected,
}

impl ReviewDecision {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Upheld => "upheld",
            ReviewDecision::PartiallyUpheld => "partially_upheld",
            ReviewDecision::Rejected => "rejected",
        }
    }

    pub(crate) fn resulting_status(self) -> AppealStatus {
        match self {
            ReviewDecision::Upheld | ReviewDecision::PartiallyUpheld => AppealStatus::Completed,
            ReviewDecision::Rejected => AppealStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display variant used by badge-style consumers of a risk band.
    pub(crate) fn badge_variant(self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Medium => "warning",
            RiskLevel::High => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PaperLevel {
    Higher,
    Ordinary,
    Foundation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OcrStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MarkingStatus {
    Pending,
    AiMarked,
    HumanReview,
    Completed,
    Appealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewLevel {
    Teacher,
    Moderator,
    SeniorReviewer,
}

/// Steps of the appeal intake wizard, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WizardStep {
    SelectQuestions,
    SelectGrounds,
    ReviewAndSubmit,
}

impl WizardStep {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            WizardStep::SelectQuestions => "select_questions",
            WizardStep::SelectGrounds => "select_grounds",
            WizardStep::ReviewAndSubmit => "review_and_submit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_allows_the_documented_edges() {
        assert!(AppealStatus::Submitted.can_transition_to(AppealStatus::UnderReview));
        assert!(AppealStatus::Submitted.can_transition_to(AppealStatus::Rejected));
        assert!(AppealStatus::UnderReview.can_transition_to(AppealStatus::AdditionalInfoRequired));
        assert!(AppealStatus::UnderReview.can_transition_to(AppealStatus::Completed));
        assert!(AppealStatus::UnderReview.can_transition_to(AppealStatus::Rejected));
        assert!(AppealStatus::AdditionalInfoRequired.can_transition_to(AppealStatus::UnderReview));
    }

    #[test]
    fn terminal_statuses_have_no_outgoing_edges() {
        for terminal in [AppealStatus::Completed, AppealStatus::Rejected] {
            for next in [
                AppealStatus::Submitted,
                AppealStatus::UnderReview,
                AppealStatus::AdditionalInfoRequired,
                AppealStatus::Completed,
                AppealStatus::Rejected,
            ] {
                assert!(!terminal.can_transition_to(next), "{terminal:?} -> {next:?}");
            }
            assert!(terminal.is_terminal());
        }
    }

    #[test]
    fn skipping_review_is_not_allowed() {
        assert!(!AppealStatus::Submitted.can_transition_to(AppealStatus::Completed));
        assert!(!AppealStatus::Submitted.can_transition_to(AppealStatus::AdditionalInfoRequired));
    }

    #[test]
    fn ground_codes_roundtrip() {
        for ground in AppealGround::ALL {
            assert_eq!(AppealGround::from_code(ground.code()), Some(*ground));
        }
        assert_eq!(AppealGround::from_code("bribery"), None);
    }

    #[test]
    fn reviewer_decisions_map_to_terminal_statuses() {
        assert_eq!(ReviewDecision::Upheld.resulting_status(), AppealStatus::Completed);
        assert_eq!(ReviewDecision::PartiallyUpheld.resulting_status(), AppealStatus::Completed);
        assert_eq!(ReviewDecision::Rejected.resulting_status(), AppealStatus::Rejected);
    }

    #[test]
    fn only_reviewer_and_sec_roles_touch_appeal_processing() {
        assert!(UserRole::ReviewerModerator.has_permission(Permission::AppealsProcess));
        assert!(UserRole::SecAdministrator.has_permission(Permission::AppealsOversight));
        assert!(!UserRole::Student.has_permission(Permission::AppealsProcess));
        assert!(UserRole::Student.has_permission(Permission::AppealsInitiate));
        assert!(UserRole::Parent.has_permission(Permission::AppealsInitiate));
        assert!(!UserRole::PolicyMaker.has_permission(Permission::AppealsInitiate));
    }
}
