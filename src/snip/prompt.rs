use crate::error::Result;
use console::Term;

/// Questions asked on the controlling terminal.
pub trait Prompt {
    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Reads one line of input.
    fn read_line(&mut self, label: &str) -> Result<String>;
}

/// Prompts on stderr so stdout stays free for the shell integration.
#[derive(Debug)]
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.term.write_str(&format!("{} [y/N] ", question))?;
        let answer = self.term.read_line()?;
        Ok(is_yes(&answer))
    }

    fn read_line(&mut self, label: &str) -> Result<String> {
        self.term.write_str(label)?;
        Ok(self.term.read_line()?)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Splits a typed argument line with shell-word rules.
///
/// An empty or blank line is zero arguments, not one empty argument. Input
/// with unbalanced quotes falls back to whitespace splitting.
pub fn parse_prompt_args(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    shell_words::split(line)
        .unwrap_or_else(|_| line.split_whitespace().map(str::to_string).collect())
}
