//! Interactive prompting primitives.
//!
//! [`Prompter`] is the single capability seam for console input: the real
//! [`ConsolePrompter`] blocks on stdin, while [`ScriptedPrompter`] feeds
//! pre-recorded answers for tests and non-interactive callers.
//!
//! [`choose`] and [`confirm`] are the only two interactive operations in the
//! tool. Both re-prompt on invalid input without any timeout; end of input
//! maps to cancellation.

use crate::core::error::{HelmPilotError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Synchronous line-oriented input capability.
pub trait Prompter {
    /// Presents `prompt` and reads one line of input.
    ///
    /// Returns `Ok(None)` when the input source is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompter backed by the process stdin/stdout.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input))
    }
}

/// Prompter that replays a fixed sequence of answers.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.responses.pop_front())
    }
}

/// Prompts for a 0-based index into a displayed list of `len` candidates.
///
/// Re-prompts until the input parses as an integer within `[0, len)`. Values
/// outside the range are rejected, never clamped.
pub fn choose(prompter: &mut dyn Prompter, len: usize) -> Result<usize> {
    debug_assert!(len > 0, "choose requires a non-empty candidate list");

    loop {
        let prompt = format!(
            "Enter the index of the repository to select (0-{}): ",
            len - 1
        );
        let Some(input) = prompter.read_line(&prompt)? else {
            return Err(HelmPilotError::Cancelled);
        };

        match input.trim().parse::<usize>() {
            Ok(selection) if selection < len => return Ok(selection),
            _ => println!("Invalid selection. Please try again."),
        }
    }
}

/// Prompts for a strict Y/N answer.
///
/// The comparison is on the trimmed, upper-cased input; anything other than
/// `Y` or `N` is rejected with a retry, never silently defaulted.
pub fn confirm(prompter: &mut dyn Prompter, prompt: &str) -> Result<bool> {
    loop {
        let Some(input) = prompter.read_line(prompt)? else {
            return Err(HelmPilotError::Cancelled);
        };

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            _ => println!("Invalid input. Please enter Y or N."),
        }
    }
}
