use serde::Serialize;

use crate::core::config::AppealSettings;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FeeQuote {
    pub(crate) amount: u32,
    pub(crate) currency: String,
    pub(crate) question_count: usize,
    pub(crate) refundable_if_upheld: bool,
}

/// Flat schedule: one fee per appeal no matter how many questions it covers.
pub(crate) fn quote(settings: &AppealSettings, question_count: usize) -> FeeQuote {
    FeeQuote {
        amount: settings.fee_amount,
        currency: settings.fee_currency.clone(),
        question_count,
        refundable_if_upheld: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AppealSettings {
        AppealSettings {
            fee_amount: 40,
            fee_currency: "EUR".to_string(),
            max_evidence_chars: 4000,
            max_documents_per_appeal: 5,
            max_document_size_mb: 10,
            allowed_document_extensions: vec!["pdf".to_string()],
        }
    }

    #[test]
    fn fee_does_not_scale_with_question_count() {
        let settings = settings();
        let one = quote(&settings, 1);
        let four = quote(&settings, 4);
        assert_eq!(one.amount, 40);
        assert_eq!(one.amount, four.amount);
        assert_eq!(four.question_count, 4);
        assert_eq!(one.currency, "EUR");
        assert!(one.refundable_if_upheld);
    }
}
