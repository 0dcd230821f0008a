//! # CLI Layer
//!
//! The CLI is one client of [`snip::api::SnipApi`], and the only place that
//! touches stdout/stderr, builds the real external collaborators (editor,
//! finder, terminal prompt, clipboard) and picks exit codes.
//!
//! stdout carries data only (names, paths, bodies, shell code) so the zsh
//! integration can capture it; status messages and logs go to stderr.
//!
//! Exit codes: 0 on success, 1 on any error or refused step (e.g. a rename
//! conflict), and for `exec` the snippet's own status.

use super::render::{print_messages, render_snippet_list, ListStyle};
use super::setup::{init_tracing, parse_cli, AbbrCommands, Commands, InitShell, Parsed};
use snip::api::{CmdResult, SaveRequest, SearchTools, SnipApi};
use snip::clipboard;
use snip::editor::{Editor, ExternalEditor};
use snip::error::Result;
use snip::finder::FzfFinder;
use snip::init::initialize;
use snip::model::ScopeFilter;
use snip::prompt::TermPrompt;
use snip::shell;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "zsh-snip";

pub fn run() -> Result<i32> {
    let cli = match parse_cli() {
        Parsed::Run(cli) => cli,
        Parsed::Exit(code) => return Ok(code),
    };
    init_tracing(cli.verbose);
    let filter = cli.scope.filter();

    // Printing the integration needs no store.
    if let Commands::Init { shell } = &cli.command {
        return handle_init(*shell);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut api = initialize(&cwd)?;

    match cli.command {
        Commands::List {
            pattern,
            names_only,
            full_path,
            no_color,
        } => handle_list(&api, filter, pattern, names_only, full_path, no_color),
        Commands::Path { name } => handle_path(&api, filter, &name),
        Commands::Expand { name } => handle_expand(&api, filter, &name),
        Commands::Exec { name, args } => handle_exec(&api, filter, &name, &args),
        Commands::Yank { name } => handle_yank(&api, filter, &name),
        Commands::Abbr { action } => handle_abbr(&api, filter, action),
        Commands::Save {
            no_edit,
            name,
            buffer,
        } => handle_save(&mut api, filter, buffer.join(" "), name, no_edit),
        Commands::Edit { name } => handle_edit(&api, filter, &name),
        Commands::Delete { yes, name } => handle_delete(&api, filter, &name, yes),
        Commands::Dup { name } => handle_dup(&mut api, filter, &name),
        Commands::Search { query, output } => handle_search(&mut api, filter, &query, output),
        Commands::Init { shell } => handle_init(shell),
    }
}

fn messages_use_color() -> bool {
    std::io::stderr().is_terminal()
}

/// Prints messages and maps the result to an exit code.
fn finish(result: &CmdResult) -> i32 {
    print_messages(&result.messages, messages_use_color());
    if result.failed() {
        1
    } else {
        0
    }
}

fn editor_for(api: &SnipApi) -> Result<ExternalEditor> {
    ExternalEditor::from_command_line(&api.config().editor_command())
}

fn handle_list(
    api: &SnipApi,
    filter: ScopeFilter,
    pattern: Option<String>,
    names_only: bool,
    full_path: bool,
    no_color: bool,
) -> Result<i32> {
    let result = api.list(filter, pattern.as_deref())?;
    let style = if names_only {
        ListStyle::NamesOnly
    } else if full_path {
        ListStyle::FullPath
    } else {
        ListStyle::Table
    };
    let use_color = !no_color && std::io::stdout().is_terminal();
    print!("{}", render_snippet_list(&result.snippets, style, use_color));
    Ok(finish(&result))
}

fn handle_path(api: &SnipApi, filter: ScopeFilter, name: &str) -> Result<i32> {
    let result = api.path(name, filter)?;
    for path in &result.paths {
        println!("{}", path.display());
    }
    Ok(finish(&result))
}

fn handle_expand(api: &SnipApi, filter: ScopeFilter, name: &str) -> Result<i32> {
    let result = api.expand(name, filter)?;
    if let Some(body) = &result.output {
        println!("{}", body);
    }
    Ok(finish(&result))
}

fn handle_exec(api: &SnipApi, filter: ScopeFilter, name: &str, args: &[String]) -> Result<i32> {
    let result = api.exec(name, filter, args)?;
    let code = finish(&result);
    Ok(result.exit_code.unwrap_or(code))
}

fn handle_yank(api: &SnipApi, filter: ScopeFilter, name: &str) -> Result<i32> {
    let clipboard = clipboard::detect(&api.config().clipboard)?;
    let result = api.yank(&clipboard, name, filter)?;
    Ok(finish(&result))
}

fn handle_abbr(api: &SnipApi, filter: ScopeFilter, action: AbbrCommands) -> Result<i32> {
    let result = match action {
        AbbrCommands::List => api.abbr_list(filter)?,
        AbbrCommands::Load => api.abbr_load(filter)?,
    };
    if let Some(output) = result.output.as_deref().filter(|o| !o.is_empty()) {
        println!("{}", output);
    }
    Ok(finish(&result))
}

fn handle_save(
    api: &mut SnipApi,
    filter: ScopeFilter,
    buffer: String,
    name: Option<String>,
    no_edit: bool,
) -> Result<i32> {
    let editor = if no_edit {
        None
    } else {
        Some(editor_for(api)?)
    };
    let request = SaveRequest {
        buffer,
        name,
        scope: filter,
        open_editor: !no_edit,
    };
    let result = api.save(editor.as_ref().map(|e| e as &dyn Editor), request)?;
    for name in &result.names {
        println!("{}", name);
    }
    Ok(finish(&result))
}

fn handle_edit(api: &SnipApi, filter: ScopeFilter, name: &str) -> Result<i32> {
    let editor = editor_for(api)?;
    let result = api.edit(&editor, name, filter)?;
    for name in &result.names {
        println!("{}", name);
    }
    Ok(finish(&result))
}

fn handle_delete(api: &SnipApi, filter: ScopeFilter, name: &str, yes: bool) -> Result<i32> {
    let result = if yes {
        api.delete(None, name, filter)?
    } else {
        let mut prompt = TermPrompt::new();
        api.delete(Some(&mut prompt), name, filter)?
    };
    Ok(finish(&result))
}

fn handle_dup(api: &mut SnipApi, filter: ScopeFilter, name: &str) -> Result<i32> {
    let editor = editor_for(api)?;
    let result = api.duplicate(Some(&editor), name, filter)?;
    for name in &result.names {
        println!("{}", name);
    }
    Ok(finish(&result))
}

fn handle_search(
    api: &mut SnipApi,
    filter: ScopeFilter,
    query: &str,
    output: Option<PathBuf>,
) -> Result<i32> {
    let mut finder = FzfFinder::locate(&api.config().finder)?;
    let editor = editor_for(api)?;
    let clipboard = clipboard::detect(&api.config().clipboard)?;
    let mut prompt = TermPrompt::new();

    let tools = SearchTools {
        finder: &mut finder,
        editor: &editor,
        prompt: &mut prompt,
        clipboard: &clipboard,
    };
    let result = api.search(tools, filter, query)?;

    if let Some(text) = &result.output {
        match &output {
            Some(path) => write_output(path, text)?,
            None => println!("{}", text),
        }
    }
    Ok(finish(&result))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

fn handle_init(shell: InitShell) -> Result<i32> {
    match shell {
        InitShell::Zsh => {
            let bin = std::env::current_exe()
                .ok()
                .and_then(|p| p.to_str().map(str::to_string))
                .unwrap_or_else(|| BIN_NAME.to_string());
            print!("{}", shell::zsh_script(&bin));
        }
    }
    Ok(0)
}
