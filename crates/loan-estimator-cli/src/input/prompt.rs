use loan_estimator_core::LoanError;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Loan(#[from] LoanError),

    #[error("End of input")]
    EndOfInput,

    #[error("No valid value for {field} after {attempts} attempts")]
    AttemptsExhausted { field: String, attempts: u32 },
}

/// Line-oriented prompt/answer loop over any reader and writer.
///
/// Numeric reads retry until the answer satisfies the field's constraint,
/// or until `max_attempts` answers have been rejected when a cap is set.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    max_attempts: Option<u32>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W, max_attempts: Option<u32>) -> Self {
        Self {
            reader,
            writer,
            max_attempts,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Print `prompt` without a newline and return the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        self.read_answer()
    }

    /// Yes unless the answer is `n`/`N`; an empty answer accepts.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let answer = self.ask(prompt)?;
        Ok(!answer.eq_ignore_ascii_case("n"))
    }

    fn ask_until<T>(
        &mut self,
        prompt: &str,
        field: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut attempts: u32 = 0;
        loop {
            let answer = self.read_answer()?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }

            attempts += 1;
            tracing::debug!(field = %field, attempts, answer = %answer, "rejected input");
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    tracing::warn!(field = %field, attempts, "prompt attempts exhausted");
                    return Err(PromptError::AttemptsExhausted {
                        field: field.to_string(),
                        attempts,
                    });
                }
            }

            write!(self.writer, "{retry}")?;
            self.writer.flush()?;
        }
    }

    pub fn ask_positive_amount(&mut self, prompt: &str, field: &str) -> Result<Decimal, PromptError> {
        self.ask_until(prompt, field, "Please enter a positive number: ", |s| {
            parse_amount(s).filter(|v| *v > Decimal::ZERO)
        })
    }

    pub fn ask_non_negative_amount(&mut self, prompt: &str, field: &str) -> Result<Decimal, PromptError> {
        self.ask_until(prompt, field, "Enter a valid non-negative number: ", |s| {
            parse_amount(s).filter(|v| *v >= Decimal::ZERO)
        })
    }

    pub fn ask_positive_int(&mut self, prompt: &str, field: &str) -> Result<u32, PromptError> {
        self.ask_until(prompt, field, "Please enter a positive integer: ", |s| {
            s.parse::<u32>().ok().filter(|v| *v > 0)
        })
    }

    pub fn ask_int_in_range(
        &mut self,
        prompt: &str,
        field: &str,
        lo: u16,
        hi: u16,
    ) -> Result<u16, PromptError> {
        let retry = format!("Enter a number between {lo} and {hi}: ");
        self.ask_until(prompt, field, &retry, |s| {
            s.parse::<u16>().ok().filter(|v| (lo..=hi).contains(v))
        })
    }
}

/// Parse a plain or scientific-notation decimal amount.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}
