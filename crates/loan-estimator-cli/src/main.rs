mod commands;
mod input;
mod output;
mod session;

use clap::Parser;
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use input::Prompter;
use session::SessionConfig;

/// Interactive personal loan estimator
#[derive(Parser)]
#[command(
    name = "loanest",
    version,
    about = "Interactive personal loan estimator",
    long_about = "A console session that checks loan eligibility, suggests an interest \
                  rate from the applicant's credit score, computes EMI or bullet \
                  repayments and exports the repayment schedule as CSV."
)]
struct Cli {
    /// Directory the repayment schedule CSV is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Give up after this many invalid answers to a single prompt
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loanest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.no_color || !input::stdin::stdout_is_terminal() {
        colored::control::set_override(false);
    }
    if !input::stdin::is_interactive() {
        tracing::warn!("stdin is not a terminal; answering prompts from piped input");
    }

    let config = SessionConfig {
        output_dir: cli.output_dir,
        max_attempts: cli.max_attempts,
    };
    tracing::debug!(?config, "starting session");

    let result = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut prompter = Prompter::new(stdin.lock(), stdout.lock(), config.max_attempts);
        session::run(&mut prompter, &config)
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
