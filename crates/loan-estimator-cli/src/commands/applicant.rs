use std::io::{BufRead, Write};

use loan_estimator_core::applicant::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
use loan_estimator_core::Applicant;

use crate::input::{PromptError, Prompter};

/// Ask for every applicant field and build the record.
pub fn prompt_applicant<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Applicant, PromptError> {
    let name = prompter.ask("Full name: ")?;
    let income = prompter.ask_non_negative_amount("Monthly gross income (INR): ", "monthly_income")?;
    let existing_emi = prompter.ask_non_negative_amount(
        "Existing monthly EMI obligations (INR): ",
        "existing_monthly_emi",
    )?;
    let credit_score = prompter.ask_int_in_range(
        &format!("Credit score ({MIN_CREDIT_SCORE} - {MAX_CREDIT_SCORE}): "),
        "credit_score",
        MIN_CREDIT_SCORE,
        MAX_CREDIT_SCORE,
    )?;

    let applicant = Applicant::new(name, income, existing_emi, credit_score)?;

    writeln!(prompter.writer(), "Applicant saved.\n")?;
    tracing::debug!(credit_score, "applicant stored");
    Ok(applicant)
}
