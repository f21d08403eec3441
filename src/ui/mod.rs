//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts behind the [Prompter] trait

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use console::style;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_header, display_manual_push_instruction,
    display_plan, display_release_context, display_status, display_success, validation_message,
};

/// Source of answers for the interactive release flow.
pub trait Prompter {
    /// Ask the user to pick one of `options`.
    ///
    /// # Returns
    /// * `Ok(Some(index))` - The chosen option
    /// * `Ok(None)` - The user cancelled
    fn select(&mut self, prompt: &str, options: &[String], default: usize) -> Result<Option<usize>>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompts on stdin/stdout.
pub struct TerminalPrompter<R> {
    input: R,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        TerminalPrompter {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    pub fn new(input: R) -> Self {
        TerminalPrompter { input }
    }

    /// Read one trimmed line; `None` on end of input.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    /// Displays a numbered list and accepts a 1-based index.
    /// Enter picks the default, `q` cancels.
    fn select(&mut self, prompt: &str, options: &[String], default: usize) -> Result<Option<usize>> {
        println!("\n{}", style(prompt).bold());
        for (i, option) in options.iter().enumerate() {
            let marker = if i == default { "*" } else { " " };
            println!(" {} {}. {}", marker, i + 1, option);
        }

        loop {
            print!(
                "\nSelect (1-{}) [default: {}, q to cancel]: ",
                options.len(),
                default + 1
            );
            io::stdout().flush()?;

            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };

            match answer.as_str() {
                "" => return Ok(Some(default)),
                "q" | "Q" => return Ok(None),
                other => match other.parse::<usize>() {
                    Ok(index) if index > 0 && index <= options.len() => {
                        return Ok(Some(index - 1))
                    }
                    _ => println!("{} Invalid selection '{}'", style("✗").red(), other),
                },
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        print!("\n{} ({}): ", prompt, hint);
        io::stdout().flush()?;

        let Some(answer) = self.read_answer()? else {
            return Ok(false);
        };

        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

/// One scripted answer for [ScriptedPrompter]
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Pick the first option containing this text
    Pick(String),
    /// Accept the default
    Default,
    /// Cancel the prompt (selection) or answer no (confirmation)
    Cancel,
    Yes,
    No,
}

impl Answer {
    pub fn pick(text: impl Into<String>) -> Self {
        Answer::Pick(text.into())
    }
}

/// Prompter that replays prepared answers, for tests and scripted runs.
///
/// Every prompt and the options shown are recorded in `shown`. Running out of
/// answers accepts defaults.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub shown: Vec<(String, Vec<String>)>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into_iter().collect(),
            shown: Vec::new(),
        }
    }

    /// Options shown for the first prompt containing `prompt`
    pub fn options_for(&self, prompt: &str) -> Option<&[String]> {
        self.shown
            .iter()
            .find(|(p, _)| p.contains(prompt))
            .map(|(_, options)| options.as_slice())
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, options: &[String], default: usize) -> Result<Option<usize>> {
        self.shown.push((prompt.to_string(), options.to_vec()));

        match self.answers.pop_front().unwrap_or(Answer::Default) {
            Answer::Pick(text) => options
                .iter()
                .position(|o| o.contains(&text))
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("no option containing '{}' in {:?}", text, options)),
            Answer::Cancel | Answer::No => Ok(None),
            Answer::Default | Answer::Yes => Ok(Some(default)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        self.shown.push((prompt.to_string(), Vec::new()));

        Ok(match self.answers.pop_front().unwrap_or(Answer::Default) {
            Answer::Yes => true,
            Answer::No | Answer::Cancel => false,
            Answer::Default => default,
            Answer::Pick(text) => {
                return Err(anyhow::anyhow!(
                    "expected a yes/no answer for '{}', got pick '{}'",
                    prompt,
                    text
                ))
            }
        })
    }
}
