//! The interactive search loop.
//!
//! Each round lists the snippets, hands them to the finder and acts on the key
//! the user pressed. Terminal actions (insert, execute, yank) end the loop;
//! edit, delete and duplicate change the store and re-open the finder with the
//! same query. Cancelling the finder ends the loop with no output.

use crate::clipboard::Clipboard;
use crate::commands::helpers::{body_line, prune_empty_dirs, reconcile_into};
use crate::commands::yank::NO_CLIPBOARD;
use crate::commands::{duplicate, CmdMessage, CmdResult};
use crate::editor::Editor;
use crate::error::Result;
use crate::finder::{Finder, FinderRequest, SearchAction};
use crate::header;
use crate::model::{Scope, ScopeFilter, Snippet};
use crate::prompt::{parse_prompt_args, Prompt};
use crate::session::{OptionalTool, Session};
use crate::shell::{bind_arguments, search_output, ACTION_EXECUTE, ACTION_INSERT};
use crate::store::StorePaths;
use std::fs;
use tracing::debug;

pub const FINDER_HEADER: &str =
    "enter: insert | ctrl-x: execute | ctrl-y: yank | ctrl-e: edit | ctrl-d: delete | ctrl-n: duplicate";

/// Collaborators the loop drives.
pub struct SearchTools<'a> {
    pub finder: &'a mut dyn Finder,
    pub editor: &'a dyn Editor,
    pub prompt: &'a mut dyn Prompt,
    pub clipboard: &'a Clipboard,
}

/// One finder line: `<name>\t<description>\t<preview>\t<scope>`.
pub fn listing_line(snippet: &Snippet, preview_length: usize) -> String {
    let preview = header::preview(&snippet.body, preview_length);
    format!(
        "{}\t{}\t{}\t{}",
        no_tabs(&snippet.name),
        no_tabs(&snippet.header.description),
        no_tabs(&preview),
        snippet.scope
    )
}

fn no_tabs(field: &str) -> String {
    field.replace('\t', " ")
}

/// Name and scope of a selected listing line.
pub fn parse_listing_line(line: &str) -> Option<(String, Scope)> {
    let name = line.split('\t').next()?;
    let scope = match line.rsplit('\t').next()? {
        "local" => Scope::Local,
        "user" => Scope::User,
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), scope))
}

pub fn run(
    paths: &StorePaths,
    session: &mut Session,
    tools: SearchTools<'_>,
    filter: ScopeFilter,
    preview_length: usize,
    query: &str,
) -> Result<CmdResult> {
    let SearchTools {
        finder,
        editor,
        prompt,
        clipboard,
    } = tools;
    let mut result = CmdResult::default();
    let mut query = query.to_string();

    loop {
        let snippets = paths.load_all(filter)?;
        let request = FinderRequest {
            lines: snippets
                .iter()
                .map(|s| listing_line(s, preview_length))
                .collect(),
            query: query.clone(),
            header: FINDER_HEADER.to_string(),
        };
        let response = finder.select(&request)?;
        query = response.query;

        let Some(selection) = response.selection else {
            debug!("search cancelled");
            return Ok(result);
        };
        let Some(action) = SearchAction::from_key(&response.key) else {
            debug!(key = %response.key, "unknown finder key");
            return Ok(result);
        };
        let Some((name, scope)) = parse_listing_line(&selection) else {
            debug!(%selection, "unparseable selection");
            return Ok(result);
        };
        let snippet = paths.load(&name, ScopeFilter::Only(scope))?;
        debug!(%name, ?action, "search action");

        let output = match action {
            SearchAction::Insert => Some(search_output(ACTION_INSERT, &snippet.body)),
            SearchAction::Execute => {
                let args = match snippet.header.args_hint() {
                    Some(hint) => {
                        let line = prompt.read_line(&format!("{} {}: ", name, hint))?;
                        parse_prompt_args(&line)
                    }
                    None => Vec::new(),
                };
                let command = bind_arguments(&snippet.body, &args);
                Some(search_output(ACTION_EXECUTE, &command))
            }
            SearchAction::Yank => match clipboard {
                Clipboard::Tool(tool) => {
                    tool.copy(&snippet.body)?;
                    result.add_message(CmdMessage::success(format!(
                        "Copied '{}' to clipboard",
                        name
                    )));
                    None
                }
                Clipboard::Disabled => None,
                Clipboard::Unavailable => {
                    // Still hand the command over, on the command line instead.
                    let warning = format!("No {} found; inserted instead", NO_CLIPBOARD);
                    if let Some(warning) = session.warn_once(OptionalTool::Clipboard, warning) {
                        result.add_message(CmdMessage::warning(warning));
                    }
                    Some(search_output(ACTION_INSERT, &snippet.body))
                }
            },
            SearchAction::Edit => {
                let root = paths.root(scope)?;
                match editor.edit(&snippet.path, Some(body_line(&snippet.path)?)) {
                    Ok(()) => {
                        reconcile_into(&mut result, &snippet.path, &name, root)?;
                    }
                    Err(err) => {
                        let warning = session.warn_once(OptionalTool::Editor, err.to_string());
                        if let Some(warning) = warning {
                            result.add_message(CmdMessage::warning(warning));
                        }
                    }
                }
                None
            }
            SearchAction::Delete => {
                if prompt.confirm(&format!("Delete {} snippet '{}'?", scope, name))? {
                    let root = paths.root(scope)?;
                    fs::remove_file(&snippet.path)?;
                    if let Some(parent) = snippet.path.parent() {
                        prune_empty_dirs(parent, root);
                    }
                    result.add_message(CmdMessage::success(format!("Deleted {}", name)));
                }
                None
            }
            SearchAction::Duplicate => {
                let copy = duplicate::run(
                    paths,
                    session,
                    Some(editor),
                    &name,
                    ScopeFilter::Only(scope),
                )?;
                result.messages.extend(copy.messages);
                result.names.extend(copy.names);
                None
            }
        };

        if action.is_terminal() {
            return Ok(match output {
                Some(text) => result.with_output(text),
                None => result,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardTool;
    use crate::commands::helpers::testing::{FakeEditor, FakeFinder, FakePrompt};
    use tempfile::TempDir;

    fn setup() -> (TempDir, StorePaths) {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("local");
        let user = temp.path().join("user");
        header::write(&local.join("build"), "build", "local build", "make -j8").unwrap();
        header::write(&user.join("build"), "build", "generic", "make").unwrap();
        header::write(&user.join("git-1"), "git-1", "check\trepo", "git status").unwrap();
        fs::write(
            user.join("co"),
            "# name: co\n# description: checkout\n# args: <branch>\n# created: c\n# ---\ngit checkout \"$1\"\n",
        )
        .unwrap();
        (temp, StorePaths::new(Some(local), user))
    }

    fn search(
        paths: &StorePaths,
        finder: &mut FakeFinder,
        editor: &FakeEditor,
        prompt: &mut FakePrompt,
        clipboard: &Clipboard,
    ) -> CmdResult {
        let tools = SearchTools {
            finder,
            editor,
            prompt,
            clipboard,
        };
        run(paths, &mut Session::new(), tools, ScopeFilter::Any, 60, "").unwrap()
    }

    #[test]
    fn listing_lines_and_parsing() {
        let (_temp, paths) = setup();
        let snippets = paths.load_all(ScopeFilter::Any).unwrap();
        let lines: Vec<String> = snippets.iter().map(|s| listing_line(s, 60)).collect();
        assert_eq!(lines[0], "build\tlocal build\tmake -j8\tlocal");
        assert_eq!(lines[2], "git-1\tcheck repo\tgit status\tuser");
        assert_eq!(
            parse_listing_line(&lines[0]),
            Some(("build".to_string(), Scope::Local))
        );
        assert_eq!(parse_listing_line("x\ty\tz\tremote"), None);
    }

    #[test]
    fn enter_inserts_body() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("", "git-1", "gi");
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut FakePrompt::default(),
            &Clipboard::Disabled,
        );
        assert_eq!(result.output.as_deref(), Some("insert\ngit status"));
        assert_eq!(finder.requests[0].header, FINDER_HEADER);
    }

    #[test]
    fn cancel_produces_no_output() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default();
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut FakePrompt::default(),
            &Clipboard::Disabled,
        );
        assert!(result.output.is_none());
        assert_eq!(finder.requests.len(), 1);
    }

    #[test]
    fn execute_prompts_for_arguments() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("ctrl-x", "co", "");
        let mut prompt = FakePrompt::answering(&["'feature x'"]);
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut prompt,
            &Clipboard::Disabled,
        );
        assert_eq!(
            result.output.as_deref(),
            Some("execute\n() {\ngit checkout \"$1\"\n} 'feature x'")
        );
        assert_eq!(prompt.asked, vec!["co <branch>: "]);
    }

    #[test]
    fn execute_with_empty_argument_line_runs_bare_body() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("ctrl-x", "co", "");
        let mut prompt = FakePrompt::answering(&[""]);
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut prompt,
            &Clipboard::Disabled,
        );
        assert_eq!(
            result.output.as_deref(),
            Some("execute\ngit checkout \"$1\"")
        );
    }

    #[test]
    fn execute_without_hint_does_not_prompt() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("ctrl-x", "build", "");
        let mut prompt = FakePrompt::default();
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut prompt,
            &Clipboard::Disabled,
        );
        assert_eq!(result.output.as_deref(), Some("execute\nmake -j8"));
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn edit_reenters_finder_with_query() {
        let (temp, paths) = setup();
        let mut finder = FakeFinder::default()
            .pick("ctrl-e", "git-1", "git")
            .pick("", "git/status", "git");
        let editor = FakeEditor::renaming("git/status");
        let result = search(
            &paths,
            &mut finder,
            &editor,
            &mut FakePrompt::default(),
            &Clipboard::Disabled,
        );

        assert_eq!(finder.requests.len(), 2);
        assert_eq!(finder.requests[1].query, "git");
        assert!(finder.requests[1]
            .lines
            .iter()
            .any(|l| l.starts_with("git/status\t")));
        assert_eq!(result.output.as_deref(), Some("insert\ngit status"));
        assert!(temp.path().join("user/git/status").is_file());
        let line = editor.calls.borrow()[0].1;
        assert_eq!(line, Some(5));
    }

    #[test]
    fn delete_and_duplicate_are_non_terminal() {
        let (temp, paths) = setup();
        let user = temp.path().join("user");
        let mut finder = FakeFinder::default()
            .pick("ctrl-n", "git-1", "")
            .pick("ctrl-d", "git-1", "")
            .pick("ctrl-d", "git-2", "");
        let mut prompt = FakePrompt::answering(&["y", "n"]);
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut prompt,
            &Clipboard::Disabled,
        );

        assert_eq!(finder.requests.len(), 4);
        assert!(result.output.is_none());
        assert!(!user.join("git-1").exists());
        assert!(user.join("git-2").is_file());
        assert_eq!(result.names, vec!["git-2"]);
    }

    #[test]
    fn delete_removes_the_selected_scope_only() {
        let (temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("ctrl-d", "build", "");
        let mut prompt = FakePrompt::answering(&["y"]);
        search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut prompt,
            &Clipboard::Disabled,
        );
        assert!(!temp.path().join("local/build").exists());
        assert!(temp.path().join("user/build").is_file());
    }

    #[test]
    fn yank_copies_and_ends() {
        let (temp, paths) = setup();
        let sink = temp.path().join("clip");
        let clipboard = Clipboard::Tool(ClipboardTool {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), format!("cat > '{}'", sink.display())],
        });
        let mut finder = FakeFinder::default().pick("ctrl-y", "git-1", "");
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut FakePrompt::default(),
            &clipboard,
        );
        assert!(result.output.is_none());
        assert_eq!(fs::read_to_string(&sink).unwrap(), "git status");
    }

    #[test]
    fn yank_without_clipboard_inserts_and_warns() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default().pick("ctrl-y", "git-1", "");
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut FakePrompt::default(),
            &Clipboard::Unavailable,
        );
        assert_eq!(result.output.as_deref(), Some("insert\ngit status"));
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn terminal_actions_close_the_finder_even_without_output() {
        let (_temp, paths) = setup();
        let mut finder = FakeFinder::default()
            .pick("ctrl-y", "git-1", "")
            .pick("", "build", "");
        let result = search(
            &paths,
            &mut finder,
            &FakeEditor::noop(),
            &mut FakePrompt::default(),
            &Clipboard::Disabled,
        );
        assert!(result.output.is_none());
        assert_eq!(finder.requests.len(), 1);
        assert_eq!(finder.responses.len(), 1);
    }
}
