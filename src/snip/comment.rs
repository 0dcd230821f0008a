//! # Trailing-Comment Metadata
//!
//! A saved command line may carry its own metadata as a trailing comment:
//!
//! ```text
//! git add -p          # add: stage hunks interactively
//! git status          # check repo state
//! ```
//!
//! `# name: text` supplies a name and a description, `# text` only a
//! description. Only single-line input is considered; a multi-line script
//! (heredocs, functions) keeps all of its `#` lines as body.
//!
//! The scan for the comment marker does not know about shell quoting: in
//! `echo "a # b" # note` the first `#` wins and the comment is `b" # note`.
//! Stripping uses the *last* marker instead, so the body saved for that line is
//! still `echo "a # b"`.

/// Byte offset of the first `#` that has a non-backslash character before it.
fn first_marker(line: &str) -> Option<usize> {
    let mut prev: Option<char> = None;
    for (idx, c) in line.char_indices() {
        if c == '#' {
            if let Some(p) = prev {
                if p != '\\' {
                    return Some(idx);
                }
            }
        }
        prev = Some(c);
    }
    None
}

/// Byte offset of the last `#` that has a non-backslash character before it.
fn last_marker(line: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    chars
        .windows(2)
        .rev()
        .find(|pair| pair[1].1 == '#' && pair[0].1 != '\\')
        .map(|pair| pair[1].0)
}

/// Raw comment text after the first marker, leading whitespace trimmed.
fn raw_comment(line: &str) -> Option<&str> {
    if line.contains('\n') {
        return None;
    }
    let idx = first_marker(line)?;
    Some(line[idx + 1..].trim_start())
}

/// Description part of a trailing comment.
///
/// With a `:` in the comment, the text after the first `:` (one leading space
/// dropped); otherwise the whole comment. Empty for multi-line input or when
/// there is no qualifying `#`.
///
/// ```
/// use snip::comment::extract_trailing_comment;
///
/// assert_eq!(
///     extract_trailing_comment("git add # add: adding files to git"),
///     "adding files to git"
/// );
/// assert_eq!(extract_trailing_comment("git status # check repo state"), "check repo state");
/// ```
pub fn extract_trailing_comment(line: &str) -> String {
    let Some(comment) = raw_comment(line) else {
        return String::new();
    };
    match comment.split_once(':') {
        Some((_, description)) => description
            .strip_prefix(' ')
            .unwrap_or(description)
            .to_string(),
        None => comment.to_string(),
    }
}

/// Name part of a trailing comment: the text before the first `:`, trimmed.
/// Empty when the comment has no `:`.
pub fn extract_trailing_name(line: &str) -> String {
    raw_comment(line)
        .and_then(|comment| comment.split_once(':'))
        .map(|(name, _)| name.trim().to_string())
        .unwrap_or_default()
}

/// Removes a trailing comment from a single-line command.
///
/// Cuts at the last unescaped `#` and trims the whitespace left behind.
/// Multi-line input is returned unchanged.
pub fn strip_trailing_comment(line: &str) -> String {
    if line.contains('\n') {
        return line.to_string();
    }
    match last_marker(line) {
        Some(idx) => line[..idx].trim_end().to_string(),
        None => line.to_string(),
    }
}

/// Name, description and cleaned body for a command line being saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentMetadata {
    pub name: String,
    pub description: String,
    pub body: String,
}

/// Runs both extractors on `line` and strips the comment from the body when one
/// was found.
pub fn split_metadata(line: &str) -> CommentMetadata {
    let name = extract_trailing_name(line);
    let description = extract_trailing_comment(line);
    let body = if raw_comment(line).is_some() {
        strip_trailing_comment(line)
    } else {
        line.to_string()
    };
    CommentMetadata {
        name,
        description,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_description() {
        let line = "git add # add: adding files to git";
        assert_eq!(extract_trailing_name(line), "add");
        assert_eq!(extract_trailing_comment(line), "adding files to git");
    }

    #[test]
    fn description_only() {
        let line = "git add # just a description";
        assert_eq!(extract_trailing_name(line), "");
        assert_eq!(extract_trailing_comment(line), "just a description");
    }

    #[test]
    fn no_comment() {
        assert_eq!(extract_trailing_comment("ls -la"), "");
        assert_eq!(extract_trailing_name("ls -la"), "");
    }

    #[test]
    fn leading_hash_is_not_a_trailing_comment() {
        assert_eq!(extract_trailing_comment("# only a comment"), "");
        assert_eq!(extract_trailing_name("#name: x"), "");
    }

    #[test]
    fn escaped_hash_is_skipped() {
        assert_eq!(extract_trailing_comment(r"echo \# not # real one"), "real one");
        assert_eq!(extract_trailing_comment(r"echo \#nope"), "");
    }

    #[test]
    fn multiline_input_never_yields_metadata() {
        let script = "cat <<'EOF' > run.sh # run: script\n#!/bin/bash\necho hi # inner: thing\nEOF";
        assert_eq!(extract_trailing_comment(script), "");
        assert_eq!(extract_trailing_name(script), "");
        assert_eq!(strip_trailing_comment(script), script);
    }

    #[test]
    fn colon_split_keeps_later_colons() {
        let line = "curl x # fetch: see http://example.com";
        assert_eq!(extract_trailing_name(line), "fetch");
        assert_eq!(extract_trailing_comment(line), "see http://example.com");
    }

    #[test]
    fn only_one_space_dropped_after_colon() {
        assert_eq!(extract_trailing_comment("x # n:   spaced"), "  spaced");
        assert_eq!(extract_trailing_comment("x # n:tight"), "tight");
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(extract_trailing_name("x #   my name  : d"), "my name");
    }

    #[test]
    fn quoted_hash_matches_first() {
        let line = r#"echo "a # b" # note"#;
        assert_eq!(extract_trailing_comment(line), r#"b" # note"#);
        assert_eq!(strip_trailing_comment(line), r#"echo "a # b""#);
    }

    #[test]
    fn strip_removes_comment_and_trailing_space() {
        assert_eq!(strip_trailing_comment("git status   # check"), "git status");
        assert_eq!(strip_trailing_comment("git status"), "git status");
        assert_eq!(strip_trailing_comment(r"echo \#tag"), r"echo \#tag");
    }

    #[test]
    fn split_metadata_for_save() {
        let meta = split_metadata("git status # check repo state");
        assert_eq!(meta.name, "");
        assert_eq!(meta.description, "check repo state");
        assert_eq!(meta.body, "git status");

        let meta = split_metadata("docker ps -a # dps: all containers");
        assert_eq!(meta.name, "dps");
        assert_eq!(meta.description, "all containers");
        assert_eq!(meta.body, "docker ps -a");
    }

    #[test]
    fn split_metadata_leaves_multiline_alone() {
        let script = "for x in a b; do # loop\n  echo $x\ndone";
        let meta = split_metadata(script);
        assert_eq!(meta, CommentMetadata {
            body: script.to_string(),
            ..CommentMetadata::default()
        });
    }
}
