//! # Header Codec
//!
//! Snippet files start with `# <field>: <value>` lines, then a `# ---` sentinel,
//! then the body verbatim:
//!
//! ```text
//! # name: docker-1
//! # description: list running containers
//! # created: 2026-01-04T10:12:55+01:00
//! # ---
//! docker ps
//! ```
//!
//! Parsing is a two-state scanner: header mode until the sentinel, body mode
//! after it. Field lookups only ever see header-mode lines, so a body line that
//! happens to look like `# name: x` is never read as metadata.
//!
//! The writer always terminates the body with a newline and the reader drops
//! exactly one, so bodies round-trip byte for byte (including bodies that end
//! in their own newline, and empty bodies).
//!
//! A file without a sentinel has no header: every field reads as empty and the
//! whole file is the body.

use crate::error::Result;
use crate::model::Header;
use chrono::{Local, SecondsFormat};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const MARKER: &str = "#";
pub const SENTINEL: &str = "# ---";
pub const ELLIPSIS: &str = "...";

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_ARGS: &str = "args";
pub const FIELD_ABBR: &str = "abbr";
pub const FIELD_CREATED: &str = "created";

/// Result of a single pass over a snippet file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSnippet {
    pub header: Header,
    pub body: String,
    /// Whether a sentinel line was found.
    pub has_header: bool,
}

/// Current time in the format used for the `created` field.
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Formats a complete snippet file.
///
/// Newlines in `name` and `description` are flattened to spaces: a header value
/// is always a single line.
pub fn format_snippet(name: &str, description: &str, created: &str, body: &str) -> String {
    let mut out = String::new();
    push_field(&mut out, FIELD_NAME, name);
    push_field(&mut out, FIELD_DESCRIPTION, description);
    push_field(&mut out, FIELD_CREATED, created);
    out.push_str(SENTINEL);
    out.push('\n');
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out
}

fn push_field(out: &mut String, field: &str, value: &str) {
    out.push_str(&field_line(field, value));
    out.push('\n');
}

fn field_line(field: &str, value: &str) -> String {
    format!("{} {}: {}", MARKER, field, single_line(value))
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Writes a new snippet file, creating missing parent directories. The
/// `created` timestamp is always generated here.
pub fn write(path: &Path, name: &str, description: &str, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format_snippet(name, description, &timestamp_now(), body);
    fs::write(path, content)?;
    debug!(path = %path.display(), name, "wrote snippet");
    Ok(())
}

/// Value of `field` if `line` is a header line for it.
///
/// `# description:` and `# description: ` both yield an empty string.
fn match_field<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(MARKER)?.strip_prefix(' ')?;
    let rest = rest.strip_prefix(field)?.strip_prefix(':')?;
    let rest = rest.strip_suffix('\r').unwrap_or(rest);
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn is_sentinel(line: &str) -> bool {
    line.trim_end() == SENTINEL
}

/// Splits file text into header lines and the body.
///
/// Returns `None` for the header when there is no sentinel line.
fn split(text: &str) -> (Option<Vec<&str>>, &str) {
    let mut header_lines = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        if is_sentinel(line) {
            let body = &text[offset..];
            let body = body.strip_suffix('\n').unwrap_or(body);
            return (Some(header_lines), body);
        }
        header_lines.push(line);
    }
    (None, text)
}

/// Parses header fields and body in one pass.
pub fn parse(text: &str) -> ParsedSnippet {
    let (header_lines, body) = split(text);
    let Some(lines) = header_lines else {
        return ParsedSnippet {
            header: Header::default(),
            body: text.to_string(),
            has_header: false,
        };
    };

    let mut header = Header::default();
    let mut seen = [false; 5];
    for line in lines {
        for (slot, field) in [
            FIELD_NAME,
            FIELD_DESCRIPTION,
            FIELD_ARGS,
            FIELD_ABBR,
            FIELD_CREATED,
        ]
        .iter()
        .enumerate()
        {
            if seen[slot] {
                continue;
            }
            if let Some(value) = match_field(line, field) {
                seen[slot] = true;
                let value = value.to_string();
                match slot {
                    0 => header.name = value,
                    1 => header.description = value,
                    2 => header.args = Some(value),
                    3 => header.abbr = Some(value),
                    _ => header.created = value,
                }
                break;
            }
        }
    }

    ParsedSnippet {
        header,
        body: body.to_string(),
        has_header: true,
    }
}

/// Looks up one header field in file text. Empty when absent.
pub fn field_value(text: &str, field: &str) -> String {
    let (header_lines, _) = split(text);
    header_lines
        .unwrap_or_default()
        .into_iter()
        .find_map(|line| match_field(line, field))
        .unwrap_or_default()
        .to_string()
}

/// First body line, truncated to `max_len` characters plus [`ELLIPSIS`].
pub fn preview(body: &str, max_len: usize) -> String {
    let first = body.lines().next().unwrap_or("");
    if first.chars().count() > max_len {
        let mut out: String = first.chars().take(max_len).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        first.to_string()
    }
}

/// 1-based line number of the first body line, for placing the editor cursor.
pub fn body_start_line(text: &str) -> usize {
    text.lines()
        .position(is_sentinel)
        .map_or(1, |idx| idx + 2)
}

/// Reads one header field from a snippet file. Empty when absent.
pub fn read_field(path: &Path, field: &str) -> Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(field_value(&text, field))
}

/// Reads the body of a snippet file.
pub fn read_body(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let (_, body) = split(&text);
    Ok(body.to_string())
}

/// Reads the first body line of a snippet file, truncated for listings.
pub fn read_body_preview(path: &Path, max_len: usize) -> Result<String> {
    let body = read_body(path)?;
    Ok(preview(&body, max_len))
}

/// Reads and parses a whole snippet file.
pub fn read(path: &Path) -> Result<ParsedSnippet> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

/// Sets `field` to `value` in file text, changing nothing else.
///
/// An existing header line is rewritten in place. A missing field is inserted
/// before the `created` line, or before the sentinel when there is none. Text
/// without a header gets one.
pub fn set_field(text: &str, field: &str, value: &str) -> String {
    let new_line = field_line(field, value);
    let mut out = String::with_capacity(text.len() + new_line.len() + 1);
    let mut in_header = true;
    let mut done = false;

    for raw in text.split_inclusive('\n') {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        if in_header && !done {
            if match_field(line, field).is_some() {
                out.push_str(&new_line);
                if raw.ends_with('\n') {
                    out.push('\n');
                }
                done = true;
                continue;
            }
            let before_created = match_field(line, FIELD_CREATED).is_some();
            if before_created || is_sentinel(line) {
                out.push_str(&new_line);
                out.push('\n');
                done = true;
            }
        }
        if is_sentinel(line) {
            in_header = false;
        }
        out.push_str(raw);
    }

    if in_header {
        // No sentinel: the original text was all body.
        let mut with_header = String::with_capacity(text.len() + new_line.len() + 8);
        with_header.push_str(&new_line);
        with_header.push('\n');
        with_header.push_str(SENTINEL);
        with_header.push('\n');
        with_header.push_str(text);
        return with_header;
    }
    out
}

/// Rewrites one header field of a snippet file in place.
pub fn write_field(path: &Path, field: &str, value: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;
    fs::write(path, set_field(&text, field, value))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CREATED: &str = "2026-01-04T10:12:55+01:00";

    #[test]
    fn format_has_fixed_layout() {
        let text = format_snippet("git-1", "check repo state", CREATED, "git status");
        assert_eq!(
            text,
            "# name: git-1\n# description: check repo state\n# created: 2026-01-04T10:12:55+01:00\n# ---\ngit status\n"
        );
    }

    #[test]
    fn format_flattens_multiline_values() {
        let text = format_snippet("a", "line one\nline two", CREATED, "x");
        assert!(text.contains("# description: line one line two\n"));
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/git-1");
        let body = "for f in *; do\n\n  echo \"$f\"\ndone";
        write(&path, "nested/dir/git-1", "loop it", body).unwrap();

        assert_eq!(read_field(&path, FIELD_NAME).unwrap(), "nested/dir/git-1");
        assert_eq!(read_field(&path, FIELD_DESCRIPTION).unwrap(), "loop it");
        assert_eq!(read_body(&path).unwrap(), body);
        assert!(!read_field(&path, FIELD_CREATED).unwrap().is_empty());
    }

    #[test]
    fn body_with_trailing_newline_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s");
        write(&path, "s", "", "echo hi\n").unwrap();
        assert_eq!(read_body(&path).unwrap(), "echo hi\n");
    }

    #[test]
    fn empty_body_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        write(&path, "empty", "nothing", "").unwrap();
        assert_eq!(read_body(&path).unwrap(), "");
        assert_eq!(read_body_preview(&path, 10).unwrap(), "");
    }

    #[test]
    fn empty_field_value_is_empty_string() {
        let text = "# name: x\n# description:\n# created: now\n# ---\nbody\n";
        assert_eq!(field_value(text, FIELD_DESCRIPTION), "");
        let parsed = parse(text);
        assert_eq!(parsed.header.description, "");

        let text = "# name: x\n# description: \n# ---\n";
        assert_eq!(field_value(text, FIELD_DESCRIPTION), "");
    }

    #[test]
    fn field_lookup_never_reads_the_body() {
        let text = "# name: real\n# ---\n# name: fake\n# args: <x>\n";
        assert_eq!(field_value(text, FIELD_NAME), "real");
        assert_eq!(field_value(text, FIELD_ARGS), "");
        let parsed = parse(text);
        assert_eq!(parsed.header.name, "real");
        assert_eq!(parsed.header.args, None);
        assert_eq!(parsed.body, "# name: fake\n# args: <x>");
    }

    #[test]
    fn first_matching_field_wins() {
        let text = "# name: first\n# name: second\n# ---\n";
        assert_eq!(field_value(text, FIELD_NAME), "first");
        assert_eq!(parse(text).header.name, "first");
    }

    #[test]
    fn optional_fields_in_any_order() {
        let text = "# name: deploy\n# description: ship it\n# abbr: dp dpl\n# args: <env>\n# created: then\n# ---\n./deploy.sh \"$1\"\n";
        let parsed = parse(text);
        assert_eq!(parsed.header.args.as_deref(), Some("<env>"));
        assert_eq!(parsed.header.abbr.as_deref(), Some("dp dpl"));
        assert_eq!(parsed.header.created, "then");
        assert_eq!(parsed.body, "./deploy.sh \"$1\"");
    }

    #[test]
    fn field_prefix_must_match_whole_field_name() {
        let text = "# named: nope\n# name: yes\n# ---\n";
        assert_eq!(field_value(text, FIELD_NAME), "yes");
    }

    #[test]
    fn file_without_sentinel_is_all_body() {
        let text = "#!/bin/sh\n# name: looks like a header\necho hi\n";
        let parsed = parse(text);
        assert!(!parsed.has_header);
        assert_eq!(parsed.header, Header::default());
        assert_eq!(parsed.body, text);
        assert_eq!(field_value(text, FIELD_NAME), "");
    }

    #[test]
    fn crlf_header_values_are_trimmed() {
        let text = "# name: win\r\n# ---\r\nbody\r\n";
        assert_eq!(field_value(text, FIELD_NAME), "win");
        assert_eq!(parse(text).body, "body\r");
    }

    #[test]
    fn preview_truncates_first_line_only() {
        assert_eq!(preview("short\nsecond line", 10), "short");
        assert_eq!(preview("abcdefghijkl\nx", 5), "abcde...");
        assert_eq!(preview("exact", 5), "exact");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview("ééééé", 5), "ééééé");
        assert_eq!(preview("éééééé", 5), "ééééé...");
    }

    #[test]
    fn read_body_preview_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("p");
        write(&path, "p", "", "docker run --rm -it ubuntu bash\nsecond").unwrap();
        assert_eq!(read_body_preview(&path, 10).unwrap(), "docker run...");
    }

    #[test]
    fn set_field_rewrites_in_place() {
        let text = format_snippet("old", "desc", CREATED, "# name: body stays");
        let updated = set_field(&text, FIELD_NAME, "new");
        assert_eq!(
            updated,
            format_snippet("new", "desc", CREATED, "# name: body stays")
        );
    }

    #[test]
    fn set_field_inserts_missing_field_before_created() {
        let text = format_snippet("n", "d", CREATED, "body");
        let updated = set_field(&text, FIELD_ARGS, "<file>");
        assert_eq!(
            updated,
            "# name: n\n# description: d\n# args: <file>\n# created: 2026-01-04T10:12:55+01:00\n# ---\nbody\n"
        );
    }

    #[test]
    fn set_field_inserts_before_sentinel_without_created() {
        let text = "# name: n\n# ---\nbody\n";
        assert_eq!(
            set_field(text, FIELD_DESCRIPTION, "d"),
            "# name: n\n# description: d\n# ---\nbody\n"
        );
    }

    #[test]
    fn set_field_keeps_unknown_header_lines() {
        let text = "# name: n\n# note: keep me\n# created: c\n# ---\nbody\n";
        let updated = set_field(text, FIELD_CREATED, "later");
        assert_eq!(updated, "# name: n\n# note: keep me\n# created: later\n# ---\nbody\n");
    }

    #[test]
    fn set_field_on_headerless_text_adds_header() {
        let updated = set_field("echo hi\n", FIELD_NAME, "hi");
        assert_eq!(updated, "# name: hi\n# ---\necho hi\n");
        assert_eq!(parse(&updated).body, "echo hi");
    }

    #[test]
    fn write_field_updates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s");
        write(&path, "s", "before", "body").unwrap();
        write_field(&path, FIELD_DESCRIPTION, "after").unwrap();
        assert_eq!(read_field(&path, FIELD_DESCRIPTION).unwrap(), "after");
        assert_eq!(read_body(&path).unwrap(), "body");
    }

    #[test]
    fn body_start_line_follows_sentinel() {
        let text = format_snippet("n", "d", CREATED, "body");
        assert_eq!(body_start_line(&text), 5);
        assert_eq!(body_start_line("no header\n"), 1);
    }
}
