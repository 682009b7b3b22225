use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::{LoanError, LoanResult, types::*};

pub const MIN_CREDIT_SCORE: CreditScore = 300;
pub const MAX_CREDIT_SCORE: CreditScore = 900;

/// A loan applicant as captured at the start of a session.
///
/// Fields are read-only once constructed; re-entering applicant data
/// replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applicant {
    name: String,
    /// Gross monthly income.
    monthly_income: Money,
    /// Sum of installments already being paid on other loans.
    existing_monthly_emi: Money,
    credit_score: CreditScore,
}

impl Applicant {
    pub fn new(
        name: impl Into<String>,
        monthly_income: Money,
        existing_monthly_emi: Money,
        credit_score: CreditScore,
    ) -> LoanResult<Self> {
        if monthly_income < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "monthly_income".into(),
                reason: "Monthly income cannot be negative".into(),
            });
        }
        if existing_monthly_emi < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "existing_monthly_emi".into(),
                reason: "Existing EMI obligations cannot be negative".into(),
            });
        }
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&credit_score) {
            return Err(LoanError::InvalidInput {
                field: "credit_score".into(),
                reason: format!(
                    "Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"
                ),
            });
        }

        Ok(Self {
            name: name.into(),
            monthly_income,
            existing_monthly_emi,
            credit_score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn monthly_income(&self) -> Money {
        self.monthly_income
    }

    pub fn existing_monthly_emi(&self) -> Money {
        self.existing_monthly_emi
    }

    pub fn credit_score(&self) -> CreditScore {
        self.credit_score
    }
}

impl fmt::Display for Applicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Monthly Income: INR {}", format_money(self.monthly_income))?;
        writeln!(f, "Existing EMI: INR {}", format_money(self.existing_monthly_emi))?;
        write!(f, "Credit Score: {}", self.credit_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_applicant() {
        let a = Applicant::new("Asha Rao", dec!(45000), dec!(5000), 720).unwrap();
        assert_eq!(a.name(), "Asha Rao");
        assert_eq!(a.monthly_income(), dec!(45000));
        assert_eq!(a.existing_monthly_emi(), dec!(5000));
        assert_eq!(a.credit_score(), 720);
    }

    #[test]
    fn test_score_bounds_inclusive() {
        assert!(Applicant::new("Low", dec!(0), dec!(0), 300).is_ok());
        assert!(Applicant::new("High", dec!(0), dec!(0), 900).is_ok());
        assert!(Applicant::new("Below", dec!(0), dec!(0), 299).is_err());
        assert!(Applicant::new("Above", dec!(0), dec!(0), 901).is_err());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let err = Applicant::new("X", dec!(-1), dec!(0), 700).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { ref field, .. } if field == "monthly_income"));

        let err = Applicant::new("X", dec!(1), dec!(-0.01), 700).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { ref field, .. } if field == "existing_monthly_emi"));
    }

    #[test]
    fn test_display_two_decimals() {
        let a = Applicant::new("Ravi", dec!(20000), dec!(1500.5), 650).unwrap();
        let text = a.to_string();
        assert!(text.contains("Monthly Income: INR 20000.00"));
        assert!(text.contains("Existing EMI: INR 1500.50"));
        assert!(text.ends_with("Credit Score: 650"));
    }
}
