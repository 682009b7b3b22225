use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;

use loan_estimator_core::eligibility::check_eligibility;
use loan_estimator_core::pricing::suggest_rate;
use loan_estimator_core::schedule::{generate_schedule, LoanParameters, RepaymentKind};
use loan_estimator_core::simulation::simulate_loan;
use loan_estimator_core::{format_money, Applicant};

use crate::input::{PromptError, Prompter};
use crate::output::{csv_out, table};

/// Eligibility check, loan pricing and optional schedule export for one
/// applicant. Computation failures are reported and end the simulation
/// without ending the session.
pub fn run_simulation<R: BufRead, W: Write>(
    applicant: &Applicant,
    prompter: &mut Prompter<R, W>,
    output_dir: &Path,
) -> Result<(), PromptError> {
    let out = prompter.writer();
    writeln!(out, "\n-- Applicant summary --")?;
    writeln!(out, "{applicant}")?;

    let eligibility = check_eligibility(applicant);
    let verdict = if eligibility.is_eligible {
        "ELIGIBLE".green().bold()
    } else {
        "NOT ELIGIBLE".red().bold()
    };
    writeln!(out, "\nEligibility: {verdict}")?;
    writeln!(out, "Reason: {}", eligibility.reason)?;
    tracing::debug!(decision = ?eligibility.decision, "eligibility checked");

    if !eligibility.is_eligible {
        writeln!(out, "Cannot simulate loan since applicant is not eligible.\n")?;
        return Ok(());
    }

    let principal = prompter.ask_positive_amount("Enter desired loan amount (principal) in INR: ", "principal")?;
    let tenure_years = prompter.ask_positive_int("Enter tenure in years: ", "tenure_years")?;

    let suggested = suggest_rate(applicant.credit_score(), tenure_years);
    writeln!(
        prompter.writer(),
        "Suggested annual interest rate: {}% per annum",
        suggested.round_dp(2).normalize()
    )?;

    let annual_rate_percent = if prompter.confirm("Accept suggested rate? (Y/n): ")? {
        suggested
    } else {
        prompter.ask_positive_amount("Enter annual interest rate (%) to use: ", "annual_rate_percent")?
    };

    let choice = prompter.ask(
        "Choose repayment type - 1) EMI (fixed)  2) Bullet (interest only with principal at end) : ",
    )?;
    let repayment_kind = if choice == "2" {
        RepaymentKind::Bullet
    } else {
        RepaymentKind::Amortizing
    };

    let params = LoanParameters {
        principal,
        annual_rate_percent,
        tenure_years,
        repayment_kind,
    };

    let simulation = match simulate_loan(applicant, &params) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "loan simulation failed");
            writeln!(prompter.writer(), "{}: {}\n", "Unable to price loan".red(), e)?;
            return Ok(());
        }
    };
    tracing::debug!(
        assumptions = %simulation.assumptions,
        elapsed_us = simulation.metadata.computation_time_us,
        "loan simulated"
    );

    let out = prompter.writer();
    let sim = &simulation.result;
    let generate_prompt = match repayment_kind {
        RepaymentKind::Amortizing => {
            writeln!(out, "\nEstimated monthly EMI: INR {}", format_money(sim.monthly_payment))?;
            writeln!(
                out,
                "Total payment (principal + interest): INR {}",
                format_money(sim.total_repayment)
            )?;
            "Generate and save amortization schedule to CSV? (Y/n): "
        }
        RepaymentKind::Bullet => {
            writeln!(out, "\nInterest-only monthly payment: INR {}", format_money(sim.monthly_payment))?;
            writeln!(
                out,
                "Principal due at end of tenure: INR {}",
                format_money(sim.principal_due_at_maturity)
            )?;
            "Generate and save payment schedule to CSV? (Y/n): "
        }
    };
    writeln!(out)?;
    table::write_simulation(out, &simulation)?;

    if prompter.confirm(generate_prompt)? {
        export(&params, prompter, output_dir)?;
    }

    writeln!(prompter.writer(), "\nSimulation done.\n")?;
    Ok(())
}

fn export<R: BufRead, W: Write>(
    params: &LoanParameters,
    prompter: &mut Prompter<R, W>,
    output_dir: &Path,
) -> Result<(), PromptError> {
    let out = prompter.writer();

    let rows = match generate_schedule(params) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "schedule generation failed");
            writeln!(out, "{}: {}", "Failed to generate schedule".red(), e)?;
            return Ok(());
        }
    };

    let path = output_dir.join(params.repayment_kind.export_file_name());
    match csv_out::export_schedule(&rows, &path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), rows = rows.len(), "schedule exported");
            writeln!(out, "Schedule saved to: {}", path.display())?;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "schedule export failed");
            writeln!(out, "{}: {}", "Failed to write CSV".red(), e)?;
        }
    }
    Ok(())
}
