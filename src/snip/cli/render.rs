//! # Rendering
//!
//! Turns command results into terminal text. Layout (column widths) is
//! computed with `unicode-width` so names with wide characters still line up;
//! styling uses `colored` and is switched off for `--no-color` or when stdout
//! is not a terminal.

use colored::Colorize;
use snip::api::{CmdMessage, MessageLevel};
use snip::model::{Scope, Snippet};
use unicode_width::UnicodeWidthStr;

/// Gap between the name column and the description.
const COLUMN_GAP: usize = 2;

/// How `list` prints each snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Table,
    NamesOnly,
    FullPath,
}

pub fn render_snippet_list(snippets: &[Snippet], style: ListStyle, use_color: bool) -> String {
    let mut out = String::new();
    match style {
        ListStyle::NamesOnly => {
            for snippet in snippets {
                out.push_str(&snippet.name);
                out.push('\n');
            }
        }
        ListStyle::FullPath => {
            for snippet in snippets {
                out.push_str(&snippet.path.display().to_string());
                out.push('\n');
            }
        }
        ListStyle::Table => {
            let width = snippets.iter().map(|s| s.name.width()).max().unwrap_or(0);
            for snippet in snippets {
                let padding = " ".repeat(width - snippet.name.width() + COLUMN_GAP);
                let name = if use_color && snippet.scope == Scope::Local {
                    snippet.name.cyan().to_string()
                } else {
                    snippet.name.clone()
                };
                let description = if use_color {
                    snippet.header.description.dimmed().to_string()
                } else {
                    snippet.header.description.clone()
                };
                let line = format!("{}{}{}", name, padding, description);
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let text = if use_color {
            match message.level {
                MessageLevel::Info => message.content.dimmed().to_string(),
                MessageLevel::Success => message.content.green().to_string(),
                MessageLevel::Warning => message.content.yellow().to_string(),
                MessageLevel::Error => message.content.red().to_string(),
            }
        } else {
            message.content.clone()
        };
        out.push_str(&text);
        out.push('\n');
    }
    out
}

/// Messages go to stderr: stdout carries data for the shell.
pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        eprint!("{}", output);
    }
}
