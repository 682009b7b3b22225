use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

fn validate_terms(principal: Money, annual_rate_percent: Percent, tenure_years: u32) -> LoanResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if tenure_years == 0 {
        return Err(LoanError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be at least 1 year".into(),
        });
    }
    Ok(())
}

/// Number of monthly installments for a tenure in years.
pub fn tenure_months(tenure_years: u32) -> LoanResult<Months> {
    tenure_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| LoanError::Overflow {
            context: format!("tenure of {tenure_years} years in months"),
        })
}

fn overflow(context: &str) -> LoanError {
    LoanError::Overflow {
        context: context.into(),
    }
}

/// Equated monthly installment.
///
/// EMI = P * r * (1+r)^n / ((1+r)^n - 1), with r the monthly rate and n the
/// number of months. A zero rate repays the principal in equal parts.
///
/// Evaluated as P * r / (1 - (1+r)^-n). When (1+r)^n exceeds the decimal
/// range, (1+r)^-n is below its precision and the EMI is P * r.
pub fn calculate_emi(principal: Money, annual_rate_percent: Percent, tenure_years: u32) -> LoanResult<Money> {
    validate_terms(principal, annual_rate_percent, tenure_years)?;

    let n = tenure_months(tenure_years)?;
    let r = monthly_rate(annual_rate_percent);

    if r.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let interest = principal
        .checked_mul(r)
        .ok_or_else(|| overflow("EMI interest term"))?;

    let Some(factor) = (Decimal::ONE + r).checked_powu(u64::from(n)) else {
        return Ok(interest);
    };
    let denominator = Decimal::ONE - Decimal::ONE / factor;

    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    interest
        .checked_div(denominator)
        .ok_or_else(|| overflow("EMI annuity"))
}

/// Interest-only monthly payment for a bullet loan.
pub fn monthly_interest_only(principal: Money, annual_rate_percent: Percent) -> LoanResult<Money> {
    validate_terms(principal, annual_rate_percent, 1)?;
    principal
        .checked_mul(monthly_rate(annual_rate_percent))
        .ok_or_else(|| overflow("interest-only payment"))
}

/// Sum of all installments over the tenure (EMI x months).
pub fn total_repayment(emi: Money, tenure_years: u32) -> LoanResult<Money> {
    let n = tenure_months(tenure_years)?;
    emi.checked_mul(Decimal::from(n))
        .ok_or_else(|| overflow("total repayment"))
}
