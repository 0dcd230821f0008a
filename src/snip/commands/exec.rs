use crate::commands::CmdResult;
use crate::error::{Result, SnipError};
use crate::model::ScopeFilter;
use crate::store::StorePaths;
use std::process::Command;
use tracing::debug;

/// Runs a snippet body with `shell -c`, passing `args` as positional
/// parameters. The child's exit status becomes the result's exit code.
///
/// A snippet with an `args` hint refuses to run without arguments.
pub fn run(
    paths: &StorePaths,
    shell: &str,
    name: &str,
    filter: ScopeFilter,
    args: &[String],
) -> Result<CmdResult> {
    let snippet = paths.load(name, filter)?;
    if let Some(hint) = snippet.header.args_hint() {
        if args.is_empty() {
            return Err(SnipError::MissingArguments {
                name: name.to_string(),
                hint: hint.to_string(),
            });
        }
    }

    debug!(name, shell, ?args, "executing snippet");
    let status = Command::new(shell)
        .arg("-c")
        .arg(&snippet.body)
        .arg(name)
        .args(args)
        .status()
        .map_err(|e| SnipError::Tool(format!("Failed to run {}: {}", shell, e)))?;

    let mut result = CmdResult::default().with_snippets(vec![snippet]);
    // Killed by a signal: report the conventional shell status.
    result.exit_code = Some(status.code().unwrap_or(128));
    Ok(result)
}
