pub mod prompt;
pub mod stdin;

pub use prompt::{PromptError, Prompter};
