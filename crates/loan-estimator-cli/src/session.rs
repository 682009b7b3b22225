use std::io::{BufRead, Write};
use std::path::PathBuf;

use loan_estimator_core::Applicant;

use crate::commands;
use crate::input::{PromptError, Prompter};

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub output_dir: PathBuf,
    pub max_attempts: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            max_attempts: None,
        }
    }
}

/// State carried between menu transitions: at most one stored applicant.
#[derive(Debug, Clone, Default)]
pub struct Session {
    applicant: Option<Applicant>,
}

impl Session {
    pub fn applicant(&self) -> Option<&Applicant> {
        self.applicant.as_ref()
    }

    /// Replace any stored applicant.
    pub fn with_applicant(self, applicant: Applicant) -> Self {
        Self {
            applicant: Some(applicant),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterApplicant,
    Simulate,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::EnterApplicant),
            "2" => Some(MenuChoice::Simulate),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub enum Transition {
    Continue(Session),
    Exit,
}

fn write_menu<W: Write>(w: &mut W) -> std::io::Result<()> {
    writeln!(w, "Menu:")?;
    writeln!(w, "1) Enter applicant data")?;
    writeln!(w, "2) Check eligibility & simulate loan")?;
    writeln!(w, "3) Exit")
}

/// Run one menu round and return the next state.
pub fn step<R: BufRead, W: Write>(
    session: Session,
    prompter: &mut Prompter<R, W>,
    config: &SessionConfig,
) -> Result<Transition, PromptError> {
    write_menu(prompter.writer())?;
    let answer = prompter.ask("Choose an option: ")?;
    let choice = MenuChoice::parse(&answer);
    tracing::debug!(?choice, "menu selection");

    match choice {
        Some(MenuChoice::EnterApplicant) => {
            let applicant = commands::applicant::prompt_applicant(prompter)?;
            Ok(Transition::Continue(session.with_applicant(applicant)))
        }
        Some(MenuChoice::Simulate) => {
            let session = if session.applicant().is_some() {
                session
            } else {
                writeln!(
                    prompter.writer(),
                    "No stored applicant found. Please enter applicant data first."
                )?;
                let applicant = commands::applicant::prompt_applicant(prompter)?;
                session.with_applicant(applicant)
            };
            if let Some(applicant) = session.applicant() {
                commands::simulate::run_simulation(applicant, prompter, &config.output_dir)?;
            }
            Ok(Transition::Continue(session))
        }
        Some(MenuChoice::Exit) => {
            writeln!(prompter.writer(), "Goodbye!")?;
            Ok(Transition::Exit)
        }
        None => {
            writeln!(prompter.writer(), "Invalid option. Try again.\n")?;
            Ok(Transition::Continue(session))
        }
    }
}

/// Drive the menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &SessionConfig,
) -> Result<(), PromptError> {
    writeln!(prompter.writer(), "=== Loan Automation System (Console) ===\n")?;

    let mut session = Session::default();
    loop {
        match step(session, prompter, config) {
            Ok(Transition::Continue(next)) => session = next,
            Ok(Transition::Exit) => return Ok(()),
            Err(PromptError::EndOfInput) => {
                tracing::debug!("input closed; ending session");
                writeln!(prompter.writer())?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
