use crate::abbr::{collect, registration_command};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::store::StorePaths;

/// `<key>\t<name>` for every declared abbreviation.
pub fn list(paths: &StorePaths, filter: ScopeFilter) -> Result<CmdResult> {
    let snippets = paths.load_all(filter)?;
    let (abbreviations, skipped) = collect(&snippets);
    let lines: Vec<String> = abbreviations
        .iter()
        .map(|abbr| format!("{}\t{}", abbr.key, abbr.name))
        .collect();

    let mut result = CmdResult::default();
    for reason in skipped {
        result.add_message(CmdMessage::warning(reason));
    }
    Ok(result.with_output(lines.join("\n")))
}

/// Registration commands for the shell to `eval`.
pub fn load(paths: &StorePaths, filter: ScopeFilter) -> Result<CmdResult> {
    let snippets = paths.load_all(filter)?;
    let (abbreviations, skipped) = collect(&snippets);
    let lines: Vec<String> = abbreviations.iter().map(registration_command).collect();

    let mut result = CmdResult::default();
    for reason in skipped {
        result.add_message(CmdMessage::warning(format!("Skipped abbreviation {}", reason)));
    }
    Ok(result.with_output(lines.join("\n")))
}
