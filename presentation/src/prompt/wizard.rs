//! Line-based prompter over any reader/writer pair

use crate::output::console::ConsoleFormatter;
use cloudcorp_domain::{ProvisioningDefaults, ProvisioningInput, ResourceCategory};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Times an invalid category selection is re-asked before giving up
const MAX_CATEGORY_ATTEMPTS: usize = 3;

const CATEGORY_QUESTION: &str = "Services to compare (compute, vpn, storage; blank for all): ";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input closed before an answer was given")]
    Closed,

    #[error("No valid selection after {0} attempts")]
    TooManyAttempts(usize),
}

/// Asks questions on `output` and reads one answer per line from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter on the process terminal.
    ///
    /// Questions go to stderr so stdout carries only the report.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and return the trimmed answer line
    pub fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask which categories to compare; a blank answer selects all of them
    pub fn prompt_categories(&mut self) -> Result<BTreeSet<ResourceCategory>, PromptError> {
        for _ in 0..MAX_CATEGORY_ATTEMPTS {
            let answer = self.ask(CATEGORY_QUESTION)?;
            if answer.is_empty() {
                return Ok(ResourceCategory::ALL.into_iter().collect());
            }
            match ResourceCategory::parse_selection(&answer) {
                Ok(selection) if !selection.is_empty() => return Ok(selection),
                Ok(_) => writeln!(self.output, "Please name at least one service.")?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
        Err(PromptError::TooManyAttempts(MAX_CATEGORY_ATTEMPTS))
    }

    /// Ask for every deploy field not already present in `prefilled`.
    ///
    /// Blank answers are kept blank; the resolver fills them from `defaults`.
    pub fn prompt_provisioning_input(
        &mut self,
        defaults: &ProvisioningDefaults,
        prefilled: ProvisioningInput,
    ) -> Result<ProvisioningInput, PromptError> {
        let mut input = prefilled;

        if input.instance_type.trim().is_empty() {
            input.instance_type =
                self.ask(&format!("Instance type [{}]: ", defaults.instance_type))?;
        }

        if input.region_choice.trim().is_empty() {
            let menu = ConsoleFormatter::format_region_menu(defaults);
            write!(self.output, "{}", menu)?;
            input.region_choice = self.ask(&format!(
                "Region number [{}]: ",
                defaults.default_region
            ))?;
        }

        if input.image_id.trim().is_empty() {
            input.image_id = self.ask("Image id [region default]: ")?;
        }

        if input.storage_gb.trim().is_empty() {
            input.storage_gb = self.ask(&format!("Storage GB [{}]: ", defaults.storage_gb))?;
        }

        if input.key_name.trim().is_empty() {
            input.key_name = self.ask("Key pair name: ")?;
        }

        if input.security_group_id.trim().is_empty() {
            input.security_group_id = self.ask("Security group id: ")?;
        }

        Ok(input)
    }

    /// Yes/no gate; only `y` or `yes` (any case) confirms
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.ask(&format!("{} [y/N]: ", question))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// The underlying writer
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}
