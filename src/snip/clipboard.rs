use crate::config::ClipboardSetting;
use crate::error::{Result, SnipError};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// A resolved clipboard command: program plus arguments, fed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardTool {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Pipes `text` into the tool.
    pub fn copy(&self, text: &str) -> Result<()> {
        debug!(program = %self.program, "copying to clipboard");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| SnipError::Tool(format!("Failed to spawn {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| SnipError::Tool(format!("Failed to write to {}: {}", self.program, e)))?;
        }

        let status = child
            .wait()
            .map_err(|e| SnipError::Tool(format!("Failed to wait for {}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(SnipError::Tool(format!("{} exited with error", self.program)))
        }
    }
}

/// Outcome of resolving the clipboard setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clipboard {
    Tool(ClipboardTool),
    /// Turned off by configuration.
    Disabled,
    /// Auto-detection found nothing.
    Unavailable,
}

/// Environment facts that drive auto-detection.
#[derive(Debug, Clone, Default)]
pub struct ClipboardEnv {
    pub macos: bool,
    pub windows: bool,
    pub wayland: bool,
    pub x11: bool,
}

impl ClipboardEnv {
    pub fn current() -> Self {
        Self {
            macos: cfg!(target_os = "macos"),
            windows: cfg!(target_os = "windows"),
            wayland: std::env::var_os("WAYLAND_DISPLAY").is_some(),
            x11: std::env::var_os("DISPLAY").is_some(),
        }
    }
}

/// Picks a clipboard command from the setting and environment. `available`
/// reports whether a program is installed.
pub fn resolve<F>(setting: &ClipboardSetting, env: &ClipboardEnv, available: F) -> Result<Clipboard>
where
    F: Fn(&str) -> bool,
{
    match setting {
        ClipboardSetting::Disabled => Ok(Clipboard::Disabled),
        ClipboardSetting::Command(command_line) => {
            let mut words = shell_words::split(command_line).map_err(|e| {
                SnipError::Api(format!("Invalid clipboard command '{}': {}", command_line, e))
            })?;
            if words.is_empty() {
                return Ok(Clipboard::Disabled);
            }
            let program = words.remove(0);
            Ok(Clipboard::Tool(ClipboardTool {
                program,
                args: words,
            }))
        }
        ClipboardSetting::Auto => {
            let candidates: Vec<ClipboardTool> = if env.macos {
                vec![ClipboardTool::new("pbcopy", &[])]
            } else if env.windows {
                vec![ClipboardTool::new("clip", &[])]
            } else {
                let mut tools = Vec::new();
                if env.wayland {
                    tools.push(ClipboardTool::new("wl-copy", &[]));
                }
                if env.x11 {
                    tools.push(ClipboardTool::new("xclip", &["-selection", "clipboard"]));
                    tools.push(ClipboardTool::new("xsel", &["--clipboard", "--input"]));
                }
                tools
            };
            Ok(candidates
                .into_iter()
                .find(|tool| available(&tool.program))
                .map(Clipboard::Tool)
                .unwrap_or(Clipboard::Unavailable))
        }
    }
}

/// Resolves against the real environment and `$PATH`.
pub fn detect(setting: &ClipboardSetting) -> Result<Clipboard> {
    resolve(setting, &ClipboardEnv::current(), |program| {
        which::which(program).is_ok()
    })
}
