use crate::commands::helpers::edit_new_snippet;
use crate::commands::{CmdMessage, CmdResult};
use crate::comment::split_metadata;
use crate::editor::Editor;
use crate::error::{Result, SnipError};
use crate::header;
use crate::model::ScopeFilter;
use crate::naming::{extract_primary_command, next_suffix, slugify, validate_name, FALLBACK_NAME};
use crate::session::Session;
use crate::store::StorePaths;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    /// The command line as typed.
    pub buffer: String,
    /// Name given on the command line; wins over a `# name: ...` comment.
    pub name: Option<String>,
    pub scope: ScopeFilter,
    pub open_editor: bool,
}

pub fn run(
    paths: &StorePaths,
    session: &mut Session,
    editor: Option<&dyn Editor>,
    request: SaveRequest,
) -> Result<CmdResult> {
    let buffer = request.buffer.trim_end_matches(['\n', '\r']);
    if buffer.trim().is_empty() {
        return Err(SnipError::EmptyInput);
    }

    let metadata = split_metadata(buffer);
    if metadata.body.trim().is_empty() {
        return Err(SnipError::EmptyInput);
    }

    let scope = paths.write_scope(request.scope)?;
    let root = paths.root(scope)?;

    let explicit = request
        .name
        .as_deref()
        .map(normalize_name)
        .filter(|n| !n.is_empty())
        .or_else(|| Some(normalize_name(&metadata.name)).filter(|n| !n.is_empty()));

    let name = match explicit {
        Some(name) => {
            validate_name(&name)?;
            free_name(root, &name)
        }
        None => derived_name(root, &metadata.body),
    };
    debug!(%name, %scope, "saving snippet");

    let path = paths.path_for(scope, &name)?;
    header::write(&path, &name, &metadata.description, &metadata.body)?;

    let mut result = CmdResult::default();
    let (final_name, final_path) = match editor {
        Some(editor) if request.open_editor => {
            edit_new_snippet(&mut result, session, editor, &path, &name, root)?
        }
        _ => (name, path),
    };

    result.add_message(CmdMessage::success(format!(
        "Saved {} snippet: {}",
        scope, final_name
    )));
    result.names.push(final_name);
    result.paths.push(final_path);
    Ok(result)
}

/// Slugifies a user-supplied name, keeping its `/` structure.
fn normalize_name(name: &str) -> String {
    slugify(name)
        .split('/')
        .map(|segment| segment.trim_matches('-'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A chosen name is used as-is when free, else suffixed.
fn free_name(root: &Path, name: &str) -> String {
    if root.join(name).exists() {
        format!("{}-{}", name, next_suffix(root, name))
    } else {
        name.to_string()
    }
}

/// `git-1`, `docker-3`: the primary command's slug plus the next suffix.
fn derived_name(root: &Path, body: &str) -> String {
    let command = extract_primary_command(body);
    let basename = command.rsplit('/').next().unwrap_or(&command);
    let slug = slugify(basename);
    let base = if slug.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        slug
    };
    format!("{}-{}", base, next_suffix(root, &base))
}
