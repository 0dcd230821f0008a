use crate::clipboard::Clipboard;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SnipError};
use crate::model::ScopeFilter;
use crate::store::StorePaths;

pub const NO_CLIPBOARD: &str = "clipboard tool (pbcopy, wl-copy, xclip or xsel)";

/// Copies a snippet body to the clipboard.
///
/// An explicitly disabled clipboard is a quiet no-op; a clipboard that could
/// not be found is an error, since copying is all this command does.
pub fn run(
    paths: &StorePaths,
    clipboard: &Clipboard,
    name: &str,
    filter: ScopeFilter,
) -> Result<CmdResult> {
    let snippet = paths.load(name, filter)?;
    let mut result = CmdResult::default();
    match clipboard {
        Clipboard::Tool(tool) => {
            tool.copy(&snippet.body)?;
            result.add_message(CmdMessage::success(format!("Copied '{}' to clipboard", name)));
        }
        Clipboard::Disabled => {
            result.add_message(CmdMessage::info("Clipboard is disabled"));
        }
        Clipboard::Unavailable => return Err(SnipError::MissingTool(NO_CLIPBOARD.to_string())),
    }
    Ok(result.with_snippets(vec![snippet]))
}
