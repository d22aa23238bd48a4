//! Interactive prompts for the comparison and deploy flows

mod wizard;

pub use wizard::{PromptError, Prompter};
