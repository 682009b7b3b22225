use loan_estimator_core::pricing::CreditTier;
use loan_estimator_core::schedule::RepaymentKind;
use loan_estimator_core::simulation::LoanSimulation;
use loan_estimator_core::{format_money, ComputationOutput};
use rust_decimal_macros::dec;
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

fn tier_label(tier: CreditTier) -> &'static str {
    match tier {
        CreditTier::Excellent => "Excellent (800+)",
        CreditTier::VeryGood => "Very good (700-799)",
        CreditTier::Good => "Good (650-699)",
        CreditTier::Fair => "Fair (600-649)",
        CreditTier::Subprime => "Subprime (<600)",
    }
}

fn kind_label(kind: RepaymentKind) -> &'static str {
    match kind {
        RepaymentKind::Amortizing => "EMI (fixed)",
        RepaymentKind::Bullet => "Bullet (interest only)",
    }
}

/// Render the loan summary as a two-column table followed by any warnings.
pub fn write_simulation<W: Write>(w: &mut W, output: &ComputationOutput<LoanSimulation>) -> io::Result<()> {
    let sim = &output.result;

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Credit tier", tier_label(sim.credit_tier)]);
    builder.push_record(["Suggested rate", &format!("{}%", sim.suggested_rate.normalize())]);
    builder.push_record(["Applied rate", &format!("{}%", sim.applied_rate.normalize())]);
    builder.push_record(["Repayment", kind_label(sim.repayment_kind)]);
    builder.push_record(["Installments", &sim.installments.to_string()]);
    builder.push_record(["Monthly payment", &format_money(sim.monthly_payment)]);
    builder.push_record(["Total repayment", &format_money(sim.total_repayment)]);
    builder.push_record(["Total interest", &format_money(sim.total_interest)]);
    builder.push_record(["Principal due at maturity", &format_money(sim.principal_due_at_maturity)]);
    let dti = match sim.debt_to_income.and_then(|ratio| ratio.checked_mul(dec!(100))) {
        Some(percent) => format!("{}%", format_money(percent)),
        None => "n/a".to_string(),
    };
    builder.push_record(["Debt-to-income", &dti]);

    let table = Table::from(builder);
    writeln!(w, "{}", table)?;

    if !output.warnings.is_empty() {
        writeln!(w, "\nWarnings:")?;
        for warning in &output.warnings {
            writeln!(w, "  - {}", warning)?;
        }
    }

    Ok(())
}
