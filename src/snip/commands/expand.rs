use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::store::StorePaths;

/// The snippet body, for inserting into the command line.
pub fn run(paths: &StorePaths, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
    let snippet = paths.load(name, filter)?;
    let body = snippet.body.clone();
    Ok(CmdResult::default()
        .with_snippets(vec![snippet])
        .with_output(body))
}
