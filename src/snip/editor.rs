use crate::error::{Result, SnipError};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Something that lets the user edit a snippet file and returns once they are
/// done. The file on disk is the only channel back.
pub trait Editor {
    /// Opens `path`, with the cursor on `line` (1-based) when supported.
    fn edit(&self, path: &Path, line: Option<usize>) -> Result<()>;
}

/// Editors with a known way to position the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Vim,
    Emacs,
    Nano,
    Micro,
    Kakoune,
    Helix,
    Sublime,
    VsCode,
    Other,
}

impl EditorKind {
    /// Detects the editor from the basename of its binary.
    pub fn detect(program: &str) -> Self {
        let name = Path::new(program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(program);
        match name {
            "vim" | "nvim" | "vi" | "view" | "gvim" | "mvim" => EditorKind::Vim,
            "emacs" | "emacsclient" => EditorKind::Emacs,
            "nano" => EditorKind::Nano,
            "micro" => EditorKind::Micro,
            "kak" => EditorKind::Kakoune,
            "hx" | "helix" => EditorKind::Helix,
            "subl" | "sublime_text" => EditorKind::Sublime,
            "code" | "codium" | "code-insiders" | "cursor" => EditorKind::VsCode,
            _ => EditorKind::Other,
        }
    }

    /// Arguments that open `path` at `line`.
    pub fn open_args(&self, path: &str, line: Option<usize>) -> Vec<String> {
        let Some(line) = line else {
            return match self {
                EditorKind::VsCode => vec!["--wait".to_string(), path.to_string()],
                _ => vec![path.to_string()],
            };
        };
        match self {
            EditorKind::Vim
            | EditorKind::Emacs
            | EditorKind::Nano
            | EditorKind::Micro
            | EditorKind::Kakoune => vec![format!("+{}", line), path.to_string()],
            EditorKind::Helix | EditorKind::Sublime => vec![format!("{}:{}", path, line)],
            EditorKind::VsCode => vec![
                "--wait".to_string(),
                "--goto".to_string(),
                format!("{}:{}", path, line),
            ],
            EditorKind::Other => vec![path.to_string()],
        }
    }
}

/// Runs the configured editor command and waits for it.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: String,
    base_args: Vec<String>,
    kind: EditorKind,
}

impl ExternalEditor {
    /// Parses an editor command line such as `code --new-window`.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut words = shell_words::split(command_line)
            .map_err(|e| SnipError::Api(format!("Invalid editor command '{}': {}", command_line, e)))?;
        if words.is_empty() {
            return Err(SnipError::Api("Editor command is empty".to_string()));
        }
        let program = words.remove(0);
        let kind = EditorKind::detect(&program);
        Ok(Self {
            program,
            base_args: words,
            kind,
        })
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    /// Full argument list for opening `path`.
    pub fn args_for(&self, path: &Path, line: Option<usize>) -> Vec<String> {
        let mut args = self.base_args.clone();
        let mut open = self.kind.open_args(&path.to_string_lossy(), line);
        // `--wait` is only added when the user did not already pass it.
        if self.kind == EditorKind::VsCode && args.iter().any(|a| a == "--wait" || a == "-w") {
            open.retain(|a| a != "--wait");
        }
        args.extend(open);
        args
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path, line: Option<usize>) -> Result<()> {
        let args = self.args_for(path, line);
        debug!(program = %self.program, ?args, "launching editor");
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| SnipError::Tool(format!("Failed to launch editor '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(SnipError::Tool(format!(
                "Editor '{}' exited with non-zero status",
                self.program
            )));
        }
        Ok(())
    }
}
