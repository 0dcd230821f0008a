use crate::commands::helpers::prune_empty_dirs;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::prompt::Prompt;
use crate::store::StorePaths;
use std::fs;
use tracing::debug;

/// Deletes a snippet. With a prompt, asks first; `None` skips the question.
pub fn run(
    paths: &StorePaths,
    prompt: Option<&mut dyn Prompt>,
    name: &str,
    filter: ScopeFilter,
) -> Result<CmdResult> {
    let (scope, path) = paths.locate(name, filter)?;
    let root = paths.root(scope)?;
    let mut result = CmdResult::default();

    if let Some(prompt) = prompt {
        if !prompt.confirm(&format!("Delete {} snippet '{}'?", scope, name))? {
            result.add_message(CmdMessage::info(format!("Kept '{}'", name)));
            return Ok(result);
        }
    }

    fs::remove_file(&path)?;
    debug!(name, %scope, "deleted snippet");
    if let Some(parent) = path.parent() {
        prune_empty_dirs(parent, root);
    }

    result.add_message(CmdMessage::success(format!("Deleted {} snippet: {}", scope, name)));
    result.names.push(name.to_string());
    result.paths.push(path);
    Ok(result)
}
