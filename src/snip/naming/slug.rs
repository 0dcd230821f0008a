/// Name used when nothing usable can be derived from the input.
pub const FALLBACK_NAME: &str = "snippet";

/// Turns arbitrary text into a filesystem-safe name.
///
/// Every character outside `[A-Za-z0-9_/-]` becomes `-`; runs of dashes are
/// kept, leading and trailing dashes are stripped. `/` survives so that a name
/// can still point into a subdirectory. An empty result is returned as-is and
/// the caller picks a fallback.
///
/// ```
/// use snip::naming::slugify;
///
/// assert_eq!(slugify("hello world"), "hello-world");
/// assert_eq!(slugify("git/status"), "git/status");
/// assert_eq!(slugify("  test  "), "test");
/// ```
pub fn slugify(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    replaced.trim_matches('-').to_string()
}

/// Finds the command a command line actually runs.
///
/// Leading `KEY=VALUE` assignments, `sudo`, and a `(` subshell opener are
/// skipped, repeatedly, until another token shows up. The token is returned
/// verbatim; callers slugify it themselves.
///
/// ```
/// use snip::naming::extract_primary_command;
///
/// assert_eq!(extract_primary_command("sudo FOO=bar git push"), "git");
/// assert_eq!(extract_primary_command("(cd /tmp; make)"), "cd");
/// assert_eq!(extract_primary_command("   "), "snippet");
/// ```
pub fn extract_primary_command(text: &str) -> String {
    for token in text.split_whitespace() {
        let token = token.trim_start_matches('(');
        if token.is_empty() || token.contains('=') || token == "sudo" {
            continue;
        }
        return token.to_string();
    }
    FALLBACK_NAME.to_string()
}
