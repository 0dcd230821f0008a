use crate::commands::helpers::{body_line, reconcile_into};
use crate::commands::CmdResult;
use crate::editor::Editor;
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::store::StorePaths;

/// Opens an existing snippet in the editor and applies a changed `name`.
///
/// Unlike save, a failing editor is an error here: editing is the whole
/// operation.
pub fn run(
    paths: &StorePaths,
    editor: &dyn Editor,
    name: &str,
    filter: ScopeFilter,
) -> Result<CmdResult> {
    let (scope, path) = paths.locate(name, filter)?;
    let root = paths.root(scope)?;

    editor.edit(&path, Some(body_line(&path)?))?;

    let mut result = CmdResult::default();
    let (final_name, final_path) = reconcile_into(&mut result, &path, name, root)?;
    result.names.push(final_name);
    result.paths.push(final_path);
    Ok(result)
}
