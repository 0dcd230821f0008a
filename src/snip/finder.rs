//! # Fuzzy Finder
//!
//! The finder is an external process (fzf by default). It gets a tab-separated
//! listing on stdin and reports back three things: the query as typed, the key
//! that ended the selection, and the selected line. A cancelled finder is an
//! empty selection, not an error.

use crate::error::{Result, SnipError};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// What the user did in the finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Insert,
    Execute,
    Yank,
    Edit,
    Delete,
    Duplicate,
}

impl SearchAction {
    /// Keys passed to `--expect`, in display order.
    pub const EXPECT_KEYS: [&'static str; 5] = ["ctrl-x", "ctrl-y", "ctrl-e", "ctrl-d", "ctrl-n"];

    /// Maps the key reported by the finder. An empty key is plain enter.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "" | "enter" => Some(SearchAction::Insert),
            "ctrl-x" => Some(SearchAction::Execute),
            "ctrl-y" => Some(SearchAction::Yank),
            "ctrl-e" => Some(SearchAction::Edit),
            "ctrl-d" => Some(SearchAction::Delete),
            "ctrl-n" => Some(SearchAction::Duplicate),
            _ => None,
        }
    }

    /// Terminal actions end the search loop; the others re-open the finder.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchAction::Insert | SearchAction::Execute | SearchAction::Yank
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct FinderRequest {
    pub lines: Vec<String>,
    pub query: String,
    pub header: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderResponse {
    /// The query text when the finder exited.
    pub query: String,
    /// Key that ended the selection, empty for enter.
    pub key: String,
    /// Selected line, `None` when cancelled or nothing matched.
    pub selection: Option<String>,
}

pub trait Finder {
    fn select(&mut self, request: &FinderRequest) -> Result<FinderResponse>;
}

/// Parses `--print-query --expect` output: query, key, then the selection.
pub fn parse_output(output: &str) -> FinderResponse {
    let mut lines = output.lines();
    let query = lines.next().unwrap_or("").to_string();
    let key = lines.next().unwrap_or("").to_string();
    let selection = lines.next().filter(|s| !s.is_empty()).map(str::to_string);
    FinderResponse {
        query,
        key,
        selection,
    }
}

/// fzf-compatible finder process.
#[derive(Debug, Clone)]
pub struct FzfFinder {
    program: String,
}

impl FzfFinder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Fails with `MissingTool` when the finder binary cannot be found.
    pub fn locate(program: &str) -> Result<Self> {
        which::which(program).map_err(|_| SnipError::MissingTool(program.to_string()))?;
        Ok(Self::new(program))
    }

    pub fn args(&self, request: &FinderRequest) -> Vec<String> {
        let mut args = vec![
            "--delimiter=\t".to_string(),
            "--with-nth=1,2,3".to_string(),
            "--print-query".to_string(),
            format!("--expect={}", SearchAction::EXPECT_KEYS.join(",")),
            format!("--query={}", request.query),
        ];
        if !request.header.is_empty() {
            args.push(format!("--header={}", request.header));
        }
        args
    }
}

impl Finder for FzfFinder {
    fn select(&mut self, request: &FinderRequest) -> Result<FinderResponse> {
        let args = self.args(request);
        debug!(program = %self.program, lines = request.lines.len(), "launching finder");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| SnipError::Tool(format!("Failed to launch {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut listing = request.lines.join("\n");
            listing.push('\n');
            // The finder may exit before reading everything; that is a cancel, not a failure.
            let _ = stdin.write_all(listing.as_bytes());
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SnipError::Tool(format!("Failed to wait for {}: {}", self.program, e)))?;

        // 1 = no match, 130 = cancelled; both still print the query.
        match output.status.code() {
            Some(0) | Some(1) | Some(130) => {}
            code => {
                return Err(SnipError::Tool(format!(
                    "{} exited with status {:?}",
                    self.program, code
                )))
            }
        }

        let mut response = parse_output(&String::from_utf8_lossy(&output.stdout));
        if output.status.code() != Some(0) {
            response.selection = None;
        }
        Ok(response)
    }
}
