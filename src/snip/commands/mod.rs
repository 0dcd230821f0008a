use crate::model::Snippet;
use std::path::PathBuf;

pub mod abbr;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod exec;
pub mod expand;
pub mod helpers;
pub mod list;
pub mod path;
pub mod save;
pub mod search;
pub mod yank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Snippets listed or touched by the command.
    pub snippets: Vec<Snippet>,
    /// Final names of snippets created or renamed.
    pub names: Vec<String>,
    pub paths: Vec<PathBuf>,
    /// Text meant for stdout as-is (bodies, search protocol, shell lines).
    pub output: Option<String>,
    /// Exit status of an executed snippet.
    pub exit_code: Option<i32>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// True when a step was refused, e.g. a rename conflict.
    pub fn failed(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
