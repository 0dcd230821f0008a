use std::collections::HashSet;

/// Optional tools whose absence is reported once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalTool {
    Clipboard,
    Editor,
}

/// Per-session state shared by the operations of one invocation.
///
/// A search loop can open the editor several times; a broken editor setup is
/// reported the first time only.
#[derive(Debug, Default)]
pub struct Session {
    warned: HashSet<OptionalTool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `message` the first time it is called for `tool`, `None` after.
    pub fn warn_once(&mut self, tool: OptionalTool, message: impl Into<String>) -> Option<String> {
        if self.warned.insert(tool) {
            Some(message.into())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_only_once_per_tool() {
        let mut session = Session::new();
        assert_eq!(
            session.warn_once(OptionalTool::Clipboard, "no clipboard"),
            Some("no clipboard".to_string())
        );
        assert_eq!(session.warn_once(OptionalTool::Clipboard, "no clipboard"), None);
        assert!(session
            .warn_once(OptionalTool::Editor, "no editor")
            .is_some());
    }
}
