use crate::domain::types::RiskLevel;

/// Cut point at or above which a confidence score is considered low risk.
pub(crate) const LOW_RISK_THRESHOLD: u8 = 90;
/// Cut point at or above which a confidence score is considered medium risk.
pub(crate) const MEDIUM_RISK_THRESHOLD: u8 = 70;

/// Single source of truth for banding a 0-100 confidence score.
///
/// Every consumer (confidence displays, badges, marking criteria, dashboard
/// aggregates) goes through this function rather than re-deriving cut points.
pub(crate) fn risk_band(score: u8) -> RiskLevel {
    if score >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// A marking decision needs human eyes unless its confidence bands as low risk.
pub(crate) fn review_required(score: u8) -> bool {
    risk_band(score) != RiskLevel::Low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(risk_band(100), RiskLevel::Low);
        assert_eq!(risk_band(90), RiskLevel::Low);
        assert_eq!(risk_band(89), RiskLevel::Medium);
        assert_eq!(risk_band(70), RiskLevel::Medium);
        assert_eq!(risk_band(69), RiskLevel::High);
        assert_eq!(risk_band(0), RiskLevel::High);
    }

    #[test]
    fn badge_variants_follow_the_band() {
        assert_eq!(risk_band(95).badge_variant(), "success");
        assert_eq!(risk_band(75).badge_variant(), "warning");
        assert_eq!(risk_band(40).badge_variant(), "danger");
    }

    #[test]
    fn review_required_iff_not_low_risk() {
        assert!(!review_required(92));
        assert!(review_required(89));
        assert!(review_required(12));
    }
}
