//! The appeal intake wizard as an explicit finite-state machine. Transitions
//! and their guards are data; handlers only call `toggle_*`, `advance`,
//! `back` and `ensure_submittable`.

use thiserror::Error;

use crate::domain::catalog;
use crate::domain::models::AppealDraft;
use crate::domain::types::{AppealGround, WizardStep};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum WizardError {
    #[error("select at least one question before continuing")]
    NoQuestionsSelected,
    #[error("select at least one ground before continuing")]
    NoGroundsSelected,
    #[error("already at the final step")]
    AtFinalStep,
    #[error("already at the first step")]
    AtFirstStep,
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),
    #[error("this operation belongs to the {} step", .0.as_str())]
    WrongStep(WizardStep),
    #[error("draft has already been submitted")]
    AlreadySubmitted,
    #[error("appeals are submitted from the review step")]
    NotAtReviewStep,
}

/// Forward edges of the wizard. Moving along an edge requires the guard of
/// the step being left to pass; back edges reverse these and are unguarded.
const FORWARD_EDGES: &[(WizardStep, WizardStep)] = &[
    (WizardStep::SelectQuestions, WizardStep::SelectGrounds),
    (WizardStep::SelectGrounds, WizardStep::ReviewAndSubmit),
];

fn forward_target(step: WizardStep) -> Option<WizardStep> {
    FORWARD_EDGES.iter().find(|(from, _)| *from == step).map(|(_, to)| *to)
}

fn backward_target(step: WizardStep) -> Option<WizardStep> {
    FORWARD_EDGES.iter().find(|(_, to)| *to == step).map(|(from, _)| *from)
}

fn guard(draft: &AppealDraft, leaving: WizardStep) -> Result<(), WizardError> {
    match leaving {
        WizardStep::SelectQuestions if draft.question_ids.is_empty() => {
            Err(WizardError::NoQuestionsSelected)
        }
        WizardStep::SelectGrounds if draft.grounds.is_empty() => {
            Err(WizardError::NoGroundsSelected)
        }
        _ => Ok(()),
    }
}

fn ensure_open(draft: &AppealDraft) -> Result<(), WizardError> {
    if draft.is_submitted() {
        Err(WizardError::AlreadySubmitted)
    } else {
        Ok(())
    }
}

fn ensure_step(draft: &AppealDraft, expected: WizardStep) -> Result<(), WizardError> {
    if draft.step == expected {
        Ok(())
    } else {
        Err(WizardError::WrongStep(expected))
    }
}

/// Adds the question if absent, removes it if present. Returns whether the
/// question is selected after the call.
pub(crate) fn toggle_question(
    draft: &mut AppealDraft,
    question_id: &str,
) -> Result<bool, WizardError> {
    ensure_open(draft)?;
    ensure_step(draft, WizardStep::SelectQuestions)?;

    if catalog::find_question(question_id).is_none() {
        return Err(WizardError::UnknownQuestion(question_id.to_string()));
    }

    if let Some(position) = draft.question_ids.iter().position(|id| id == question_id) {
        draft.question_ids.remove(position);
        Ok(false)
    } else {
        draft.question_ids.push(question_id.to_string());
        Ok(true)
    }
}

pub(crate) fn toggle_ground(
    draft: &mut AppealDraft,
    ground: AppealGround,
) -> Result<bool, WizardError> {
    ensure_open(draft)?;
    ensure_step(draft, WizardStep::SelectGrounds)?;

    if let Some(position) = draft.grounds.iter().position(|existing| *existing == ground) {
        draft.grounds.remove(position);
        Ok(false)
    } else {
        draft.grounds.push(ground);
        Ok(true)
    }
}

/// Evidence and documents are inputs of the grounds step.
pub(crate) fn ensure_accepts_evidence(draft: &AppealDraft) -> Result<(), WizardError> {
    ensure_open(draft)?;
    ensure_step(draft, WizardStep::SelectGrounds)
}

pub(crate) fn advance(draft: &mut AppealDraft) -> Result<WizardStep, WizardError> {
    ensure_open(draft)?;
    let next = forward_target(draft.step).ok_or(WizardError::AtFinalStep)?;
    guard(draft, draft.step)?;
    draft.step = next;
    Ok(next)
}

/// Going back never discards selections; they are hidden, not lost.
pub(crate) fn back(draft: &mut AppealDraft) -> Result<WizardStep, WizardError> {
    ensure_open(draft)?;
    let previous = backward_target(draft.step).ok_or(WizardError::AtFirstStep)?;
    draft.step = previous;
    Ok(previous)
}

pub(crate) fn ensure_submittable(draft: &AppealDraft) -> Result<(), WizardError> {
    ensure_open(draft)?;
    if draft.step != WizardStep::ReviewAndSubmit {
        return Err(WizardError::NotAtReviewStep);
    }
    if draft.question_ids.is_empty() {
        return Err(WizardError::NoQuestionsSelected);
    }
    if draft.grounds.is_empty() {
        return Err(WizardError::NoGroundsSelected);
    }
    Ok(())
}
