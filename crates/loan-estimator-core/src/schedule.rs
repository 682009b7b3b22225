use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::emi::{calculate_emi, monthly_interest_only, tenure_months};
use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

/// Balances below this are floating residue from the annuity formula.
const RESIDUAL_BALANCE_THRESHOLD: Money = dec!(0.00000001);

/// How the principal is paid back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RepaymentKind {
    /// Equal monthly installments covering interest and principal
    #[default]
    Amortizing,
    /// Interest-only installments with the principal repaid at maturity
    Bullet,
}

impl RepaymentKind {
    /// File the schedule is written to when exported.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            RepaymentKind::Amortizing => "amortization_schedule.csv",
            RepaymentKind::Bullet => "bullet_schedule.csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
    pub repayment_kind: RepaymentKind,
}

/// One installment in a repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub installment: Months,
    pub opening_balance: Money,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub closing_balance: Money,
}

/// Build the schedule matching the loan's repayment kind.
pub fn generate_schedule(params: &LoanParameters) -> LoanResult<Vec<ScheduleRow>> {
    match params.repayment_kind {
        RepaymentKind::Amortizing => generate_amortization_schedule(params),
        RepaymentKind::Bullet => generate_bullet_schedule(params),
    }
}

/// Month-by-month amortization at a constant EMI.
pub fn generate_amortization_schedule(params: &LoanParameters) -> LoanResult<Vec<ScheduleRow>> {
    let emi = calculate_emi(params.principal, params.annual_rate_percent, params.tenure_years)?;
    let months = tenure_months(params.tenure_years)?;
    let r = monthly_rate(params.annual_rate_percent);

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = params.principal;

    for installment in 1..=months {
        let opening = balance;
        let interest = opening * r;
        let mut payment = emi;
        let mut principal_component = emi - interest;

        balance = opening - principal_component;
        if balance < RESIDUAL_BALANCE_THRESHOLD {
            balance = Decimal::ZERO;
        } else if installment == months {
            // EMI at the limit of decimal precision leaves a remainder
            payment = opening.checked_add(interest).ok_or_else(|| LoanError::Overflow {
                context: "final installment".into(),
            })?;
            principal_component = opening;
            balance = Decimal::ZERO;
        }

        rows.push(ScheduleRow {
            installment,
            opening_balance: opening,
            payment,
            principal_component,
            interest_component: interest,
            closing_balance: balance,
        });
    }

    Ok(rows)
}

/// Interest-only installments followed by a terminal principal payoff row.
pub fn generate_bullet_schedule(params: &LoanParameters) -> LoanResult<Vec<ScheduleRow>> {
    let interest = monthly_interest_only(params.principal, params.annual_rate_percent)?;
    let months = tenure_months(params.tenure_years)?;
    let principal = params.principal;

    let payoff_installment = months.checked_add(1).ok_or_else(|| LoanError::Overflow {
        context: "bullet payoff installment".into(),
    })?;

    let mut rows = Vec::with_capacity(payoff_installment as usize);
    rows.extend((1..=months).map(|installment| ScheduleRow {
        installment,
        opening_balance: principal,
        payment: interest,
        principal_component: Decimal::ZERO,
        interest_component: interest,
        closing_balance: principal,
    }));

    rows.push(ScheduleRow {
        installment: payoff_installment,
        opening_balance: principal,
        payment: principal,
        principal_component: principal,
        interest_component: Decimal::ZERO,
        closing_balance: Decimal::ZERO,
    });

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amortizing(principal: Money, rate: Percent, years: u32) -> LoanParameters {
        LoanParameters {
            principal,
            annual_rate_percent: rate,
            tenure_years: years,
            repayment_kind: RepaymentKind::Amortizing,
        }
    }

    #[test]
    fn test_amortizing_row_count_and_indexing() {
        let rows = generate_schedule(&amortizing(dec!(100000), dec!(10), 1)).unwrap();
        assert_eq!(rows.len(), 12);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.installment, i as Months + 1);
        }
    }

    #[test]
    fn test_amortizing_first_month_split() {
        let rows = generate_schedule(&amortizing(dec!(100000), dec!(12), 1)).unwrap();
        let first = &rows[0];
        // 1% of 100,000 is interest
        assert_eq!(first.interest_component, dec!(1000));
        assert_eq!(first.principal_component, first.payment - dec!(1000));
        assert_eq!(first.closing_balance, dec!(100000) - first.principal_component);
    }

    #[test]
    fn test_amortizing_balances_chain() {
        let rows = generate_schedule(&amortizing(dec!(250000), dec!(9.5), 3)).unwrap();
        for pair in rows.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        }
        assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_amortizing_beyond_decimal_range_settles_in_final_row() {
        let rows = generate_schedule(&amortizing(dec!(500000), dec!(14.5), 500)).unwrap();
        assert_eq!(rows.len(), 6000);

        let emi = rows[0].payment;
        for row in &rows[..5999] {
            assert_eq!(row.payment, emi);
        }
        let last = rows.last().unwrap();
        assert_eq!(last.principal_component, last.opening_balance);
        assert_eq!(last.payment, last.principal_component + last.interest_component);
        assert_eq!(last.closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_amortizing_zero_rate() {
        let rows = generate_schedule(&amortizing(dec!(120000), Decimal::ZERO, 1)).unwrap();
        for row in &rows {
            assert_eq!(row.payment, dec!(10000));
            assert_eq!(row.interest_component, Decimal::ZERO);
        }
        assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_bullet_shape() {
        let params = LoanParameters {
            repayment_kind: RepaymentKind::Bullet,
            ..amortizing(dec!(240000), dec!(12), 2)
        };
        let rows = generate_schedule(&params).unwrap();
        assert_eq!(rows.len(), 25);

        for row in &rows[..24] {
            assert_eq!(row.payment, dec!(2400));
            assert_eq!(row.principal_component, Decimal::ZERO);
            assert_eq!(row.opening_balance, dec!(240000));
            assert_eq!(row.closing_balance, dec!(240000));
        }

        let last = &rows[24];
        assert_eq!(last.installment, 25);
        assert_eq!(last.payment, dec!(240000));
        assert_eq!(last.principal_component, dec!(240000));
        assert_eq!(last.interest_component, Decimal::ZERO);
        assert_eq!(last.closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(RepaymentKind::Amortizing.export_file_name(), "amortization_schedule.csv");
        assert_eq!(RepaymentKind::Bullet.export_file_name(), "bullet_schedule.csv");
    }

    #[test]
    fn test_invalid_parameters_error() {
        assert!(generate_schedule(&amortizing(Decimal::ZERO, dec!(10), 1)).is_err());
        assert!(generate_schedule(&amortizing(dec!(1000), dec!(10), 0)).is_err());
    }
}
