use crate::commands::helpers::edit_new_snippet;
use crate::commands::{CmdMessage, CmdResult};
use crate::editor::Editor;
use crate::error::{Result, SnipError};
use crate::header::{self, FIELD_CREATED, FIELD_NAME};
use crate::model::ScopeFilter;
use crate::naming::duplicate_name;
use crate::session::Session;
use crate::store::StorePaths;
use std::fs;
use tracing::debug;

/// Copies a snippet under the next free duplicate name in the same store.
///
/// The copy keeps every header line except `name`, which is rewritten, and
/// `created`, which is stamped fresh.
pub fn run(
    paths: &StorePaths,
    session: &mut Session,
    editor: Option<&dyn Editor>,
    name: &str,
    filter: ScopeFilter,
) -> Result<CmdResult> {
    let (scope, source) = paths.locate(name, filter)?;
    let root = paths.root(scope)?;

    let new_name = duplicate_name(root, name);
    let target = paths.path_for(scope, &new_name)?;
    if target.exists() {
        return Err(SnipError::NameConflict(target));
    }

    let text = fs::read_to_string(&source)?;
    let text = header::set_field(&text, FIELD_NAME, &new_name);
    let text = header::set_field(&text, FIELD_CREATED, &header::timestamp_now());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, text)?;
    debug!(from = name, to = %new_name, %scope, "duplicated snippet");

    let mut result = CmdResult::default();
    let (final_name, final_path) = match editor {
        Some(editor) => edit_new_snippet(&mut result, session, editor, &target, &new_name, root)?,
        None => (new_name, target),
    };

    result.add_message(CmdMessage::success(format!(
        "Duplicated {} -> {}",
        name, final_name
    )));
    result.names.push(final_name);
    result.paths.push(final_path);
    Ok(result)
}
