use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::time::Instant;

use crate::eligibility::{check_eligibility, EligibilityResult};
use crate::emi::{calculate_emi, monthly_interest_only, tenure_months, total_repayment};
use crate::pricing::{suggest_rate, tier_for_score, CreditTier};
use crate::schedule::{LoanParameters, RepaymentKind};
use crate::{Applicant, LoanError, LoanResult, types::*};

/// Share of income above which total obligations are flagged.
pub const DTI_WARNING_THRESHOLD: Rate = dec!(0.50);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoanSimulation {
    pub eligibility: EligibilityResult,
    pub credit_tier: CreditTier,
    pub suggested_rate: Percent,
    pub applied_rate: Percent,
    pub repayment_kind: RepaymentKind,
    pub installments: Months,
    /// EMI for amortizing loans, the interest-only amount for bullet loans.
    pub monthly_payment: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
    /// Lump sum owed at maturity; zero for amortizing loans.
    pub principal_due_at_maturity: Money,
    /// (existing EMI + new monthly payment) / income. Informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_income: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn overflow(context: &str) -> LoanError {
    LoanError::Overflow {
        context: context.into(),
    }
}

/// Price a loan for an eligible applicant and summarise its repayment cost.
///
/// Fails with `InvalidInput` when the applicant does not pass the
/// eligibility rule. The debt-to-income ratio is reported but never used to
/// decline.
pub fn simulate_loan(
    applicant: &Applicant,
    params: &LoanParameters,
) -> LoanResult<ComputationOutput<LoanSimulation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eligibility = check_eligibility(applicant);
    if !eligibility.is_eligible {
        return Err(LoanError::InvalidInput {
            field: "applicant".into(),
            reason: eligibility.reason,
        });
    }

    let suggested_rate = suggest_rate(applicant.credit_score(), params.tenure_years);
    if params.annual_rate_percent != suggested_rate {
        warnings.push(format!(
            "Applied rate {}% overrides suggested rate {}%",
            params.annual_rate_percent.normalize(),
            suggested_rate.normalize()
        ));
    }

    let installments = tenure_months(params.tenure_years)?;

    let (monthly_payment, total, total_interest, principal_due) = match params.repayment_kind {
        RepaymentKind::Amortizing => {
            let emi = calculate_emi(params.principal, params.annual_rate_percent, params.tenure_years)?;
            let total = total_repayment(emi, params.tenure_years)?;
            (emi, total, total - params.principal, Decimal::ZERO)
        }
        RepaymentKind::Bullet => {
            let interest = monthly_interest_only(params.principal, params.annual_rate_percent)?;
            let interest_total = total_repayment(interest, params.tenure_years)?;
            let total = interest_total
                .checked_add(params.principal)
                .ok_or_else(|| overflow("bullet total repayment"))?;
            (interest, total, interest_total, params.principal)
        }
    };

    let debt_to_income = if applicant.monthly_income().is_zero() {
        None
    } else {
        let obligations = applicant
            .existing_monthly_emi()
            .checked_add(monthly_payment)
            .ok_or_else(|| overflow("monthly obligations"))?;
        Some(
            obligations
                .checked_div(applicant.monthly_income())
                .ok_or_else(|| overflow("debt-to-income"))?,
        )
    };

    if let Some(dti) = debt_to_income {
        if dti > DTI_WARNING_THRESHOLD {
            let dti_percent = dti
                .checked_mul(dec!(100))
                .ok_or_else(|| overflow("debt-to-income percentage"))?;
            warnings.push(format!(
                "Debt-to-income of {}% exceeds the {}% guideline; not enforced by the eligibility rule",
                round_money(dti_percent),
                (DTI_WARNING_THRESHOLD * dec!(100)).normalize()
            ));
        }
    }

    let output = LoanSimulation {
        eligibility,
        credit_tier: tier_for_score(applicant.credit_score()),
        suggested_rate,
        applied_rate: params.annual_rate_percent,
        repayment_kind: params.repayment_kind,
        installments,
        monthly_payment,
        total_repayment: total,
        total_interest,
        principal_due_at_maturity: principal_due,
        debt_to_income,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Personal Loan Simulation",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_percent": params.annual_rate_percent.to_string(),
            "tenure_years": params.tenure_years,
            "repayment_kind": params.repayment_kind,
            "credit_score": applicant.credit_score(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> Applicant {
        Applicant::new("Meera", dec!(60000), dec!(5000), 760).unwrap()
    }

    fn params(kind: RepaymentKind) -> LoanParameters {
        LoanParameters {
            principal: dec!(100000),
            annual_rate_percent: dec!(9.5),
            tenure_years: 1,
            repayment_kind: kind,
        }
    }

    #[test]
    fn test_amortizing_summary() {
        let out = simulate_loan(&applicant(), &params(RepaymentKind::Amortizing)).unwrap();
        let sim = &out.result;
        assert_eq!(sim.suggested_rate, dec!(9.5));
        assert_eq!(sim.credit_tier, CreditTier::VeryGood);
        assert_eq!(sim.installments, 12);
        assert_eq!(sim.total_repayment, sim.monthly_payment * dec!(12));
        assert_eq!(sim.total_interest, sim.total_repayment - dec!(100000));
        assert_eq!(sim.principal_due_at_maturity, Decimal::ZERO);
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_bullet_summary() {
        let mut p = params(RepaymentKind::Bullet);
        p.annual_rate_percent = dec!(12);
        let out = simulate_loan(&applicant(), &p).unwrap();
        let sim = &out.result;
        assert_eq!(sim.monthly_payment, dec!(1000));
        assert_eq!(sim.total_interest, dec!(12000));
        assert_eq!(sim.total_repayment, dec!(112000));
        assert_eq!(sim.principal_due_at_maturity, dec!(100000));
        assert!(out.warnings.iter().any(|w| w.contains("overrides suggested")));
    }

    #[test]
    fn test_high_dti_is_warned_not_blocked() {
        let a = Applicant::new("Stretched", dec!(15000), dec!(6000), 820).unwrap();
        let mut p = params(RepaymentKind::Amortizing);
        p.annual_rate_percent = dec!(8.0);
        let out = simulate_loan(&a, &p).unwrap();
        assert!(out.result.debt_to_income.unwrap() > DTI_WARNING_THRESHOLD);
        assert!(out.warnings.iter().any(|w| w.contains("Debt-to-income")));
    }

    #[test]
    fn test_obligations_beyond_decimal_range_overflow() {
        let a = Applicant::new("X", dec!(20000), Decimal::MAX, 800).unwrap();
        let mut p = params(RepaymentKind::Amortizing);
        p.annual_rate_percent = dec!(8);
        let err = simulate_loan(&a, &p).unwrap_err();
        assert!(matches!(err, LoanError::Overflow { .. }), "{err:?}");
    }

    #[test]
    fn test_bullet_total_beyond_decimal_range_overflows() {
        let mut p = params(RepaymentKind::Bullet);
        p.principal = dec!(75000000000000000000000000000);
        p.annual_rate_percent = dec!(12);
        let err = simulate_loan(&applicant(), &p).unwrap_err();
        assert!(matches!(err, LoanError::Overflow { .. }), "{err:?}");
    }

    #[test]
    fn test_ineligible_applicant_rejected() {
        let a = Applicant::new("Low", dec!(10000), dec!(0), 800).unwrap();
        let err = simulate_loan(&a, &params(RepaymentKind::Amortizing)).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));
    }
}
