//! Fixed catalogs consumed by the appeal intake wizard: the appealable
//! questions for the current session and the recognised grounds for appeal.

use crate::domain::types::AppealGround;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppealableQuestion {
    pub(crate) id: &'static str,
    pub(crate) subject: &'static str,
    pub(crate) description: &'static str,
    pub(crate) marks: u32,
}

pub(crate) const APPEALABLE_QUESTIONS: &[AppealableQuestion] = &[
    AppealableQuestion {
        id: "1a",
        subject: "Mathematics",
        description: "Algebra - Quadratic equations",
        marks: 8,
    },
    AppealableQuestion {
        id: "1b",
        subject: "Mathematics",
        description: "Algebra - Simultaneous equations",
        marks: 6,
    },
    AppealableQuestion {
        id: "2a",
        subject: "Mathematics",
        description: "Calculus - Integration",
        marks: 10,
    },
    AppealableQuestion {
        id: "2b",
        subject: "Mathematics",
        description: "Calculus - Differentiation",
        marks: 8,
    },
];

pub(crate) fn find_question(id: &str) -> Option<&'static AppealableQuestion> {
    APPEALABLE_QUESTIONS.iter().find(|question| question.id == id)
}

pub(crate) fn grounds() -> &'static [AppealGround] {
    AppealGround::ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_matches_ids() {
        let question = find_question("2a").expect("2a in catalog");
        assert_eq!(question.marks, 10);
        assert!(find_question("9z").is_none());
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (index, question) in APPEALABLE_QUESTIONS.iter().enumerate() {
            assert!(
                !APPEALABLE_QUESTIONS[index + 1..].iter().any(|other| other.id == question.id),
                "duplicate id {}",
                question.id
            );
        }
    }
}
