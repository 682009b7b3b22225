use rust_decimal_macros::dec;
use serde::Serialize;

use crate::{Applicant, types::*};

/// Minimum gross monthly income accepted for any loan.
pub const MIN_MONTHLY_INCOME: Money = dec!(15000);

/// Minimum credit score accepted for any loan.
pub const MIN_CREDIT_SCORE: CreditScore = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EligibilityDecision {
    Eligible,
    IncomeBelowMinimum,
    CreditScoreTooLow,
}

impl EligibilityDecision {
    pub fn reason(&self) -> &'static str {
        match self {
            EligibilityDecision::Eligible => {
                "Meets basic criteria; run loan simulation to confirm debt-to-income for chosen amount/tenure"
            }
            EligibilityDecision::IncomeBelowMinimum => {
                "Monthly income below minimum required (INR 15,000)"
            }
            EligibilityDecision::CreditScoreTooLow => "Credit score too low for lending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub decision: EligibilityDecision,
    pub reason: String,
}

impl From<EligibilityDecision> for EligibilityResult {
    fn from(decision: EligibilityDecision) -> Self {
        Self {
            is_eligible: decision == EligibilityDecision::Eligible,
            decision,
            reason: decision.reason().to_string(),
        }
    }
}

/// Apply the fixed lending policy to an applicant.
///
/// Income is checked before credit score. Existing EMI obligations are not
/// assessed here: the debt-to-income ratio is only reported once a loan
/// amount has been simulated.
pub fn check_eligibility(applicant: &Applicant) -> EligibilityResult {
    let decision = if applicant.monthly_income() < MIN_MONTHLY_INCOME {
        EligibilityDecision::IncomeBelowMinimum
    } else if applicant.credit_score() < MIN_CREDIT_SCORE {
        EligibilityDecision::CreditScoreTooLow
    } else {
        EligibilityDecision::Eligible
    };
    decision.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn applicant(income: Decimal, score: CreditScore) -> Applicant {
        Applicant::new("Test", income, dec!(0), score).unwrap()
    }

    #[test]
    fn test_income_checked_first() {
        let r = check_eligibility(&applicant(dec!(14999.99), 300));
        assert!(!r.is_eligible);
        assert_eq!(r.decision, EligibilityDecision::IncomeBelowMinimum);
        assert!(r.reason.to_lowercase().contains("income"));
    }

    #[test]
    fn test_low_score_with_sufficient_income() {
        let r = check_eligibility(&applicant(dec!(15000), 449));
        assert!(!r.is_eligible);
        assert_eq!(r.decision, EligibilityDecision::CreditScoreTooLow);
        assert!(r.reason.to_lowercase().contains("credit score"));
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let r = check_eligibility(&applicant(dec!(15000), 450));
        assert!(r.is_eligible);
        assert_eq!(r.decision, EligibilityDecision::Eligible);
    }

    #[test]
    fn test_existing_emi_does_not_block() {
        // Obligations far above income still pass the basic rule.
        let a = Applicant::new("Heavy", dec!(20000), dec!(50000), 800).unwrap();
        assert!(check_eligibility(&a).is_eligible);
    }
}
