use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::store::StorePaths;

pub fn run(paths: &StorePaths, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
    let (_, path) = paths.locate(name, filter)?;
    Ok(CmdResult::default().with_paths(vec![path]))
}
