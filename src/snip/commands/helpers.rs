use crate::commands::{CmdMessage, CmdResult};
use crate::editor::Editor;
use crate::error::Result;
use crate::header;
use crate::reconcile::{reconcile, ReconcileOutcome};
use crate::session::{OptionalTool, Session};
use std::fs;
use std::path::{Path, PathBuf};

/// Line the editor cursor should start on.
pub fn body_line(path: &Path) -> Result<usize> {
    let text = fs::read_to_string(path)?;
    Ok(header::body_start_line(&text))
}

/// Runs the rename reconciler and turns its outcome into messages.
///
/// Returns the snippet's final name and path.
pub fn reconcile_into(
    result: &mut CmdResult,
    path: &Path,
    name: &str,
    store_root: &Path,
) -> Result<(String, PathBuf)> {
    let (final_path, outcome) = reconcile(path, name, store_root)?;
    match outcome {
        ReconcileOutcome::Unchanged => Ok((name.to_string(), final_path)),
        ReconcileOutcome::Renamed { from, to } => {
            result.add_message(CmdMessage::success(format!("Renamed {} -> {}", from, to)));
            Ok((to, final_path))
        }
        ReconcileOutcome::Conflict { wanted } => {
            result.add_message(CmdMessage::error(format!(
                "Cannot rename '{}' to '{}': already exists. Kept as '{}'",
                name, wanted, name
            )));
            Ok((name.to_string(), final_path))
        }
        ReconcileOutcome::Invalid { wanted, reason } => {
            result.add_message(CmdMessage::error(format!(
                "Cannot rename '{}' to '{}': {}. Kept as '{}'",
                name, wanted, reason, name
            )));
            Ok((name.to_string(), final_path))
        }
    }
}

/// Opens a freshly written snippet in the editor, then reconciles its name.
///
/// The snippet already exists on disk, so an editor that fails to start only
/// costs the edit: it is reported once per session and the snippet is kept
/// under `name`.
pub fn edit_new_snippet(
    result: &mut CmdResult,
    session: &mut Session,
    editor: &dyn Editor,
    path: &Path,
    name: &str,
    store_root: &Path,
) -> Result<(String, PathBuf)> {
    let line = body_line(path)?;
    if let Err(err) = editor.edit(path, Some(line)) {
        if let Some(warning) = session.warn_once(OptionalTool::Editor, err.to_string()) {
            result.add_message(CmdMessage::warning(warning));
        }
        return Ok((name.to_string(), path.to_path_buf()));
    }
    reconcile_into(result, path, name, store_root)
}

/// Removes directories left empty between `dir` and `store_root`.
pub fn prune_empty_dirs(dir: &Path, store_root: &Path) {
    let mut current = Some(dir);
    while let Some(dir) = current {
        if dir == store_root || !dir.starts_with(store_root) {
            break;
        }
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}
