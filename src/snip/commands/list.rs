use crate::commands::CmdResult;
use crate::error::{Result, SnipError};
use crate::model::ScopeFilter;
use crate::store::StorePaths;
use regex::Regex;

/// Lists visible snippets, optionally filtered by a glob on the name.
pub fn run(paths: &StorePaths, filter: ScopeFilter, pattern: Option<&str>) -> Result<CmdResult> {
    let mut snippets = paths.load_all(filter)?;
    if let Some(pattern) = pattern {
        let matcher = glob_to_regex(pattern)?;
        snippets.retain(|snippet| matcher.is_match(&snippet.name));
    }
    Ok(CmdResult::default().with_snippets(snippets))
}

/// Translates a shell glob into an anchored regex.
///
/// `*` matches any run of characters (including `/`), `?` one character, and
/// `[...]` a class, with `[!...]` negated.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut class = String::new();
                let mut closed = false;
                if chars.peek() == Some(&'!') {
                    chars.next();
                    class.push('^');
                }
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    if c == '\\' || c == '[' {
                        class.push('\\');
                    }
                    class.push(c);
                }
                if !closed {
                    return Err(SnipError::Api(format!(
                        "Invalid pattern '{}': unclosed '['",
                        pattern
                    )));
                }
                out.push('[');
                out.push_str(&class);
                out.push(']');
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    Regex::new(&out).map_err(|e| SnipError::Api(format!("Invalid pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header;
    use crate::model::Scope;
    use tempfile::TempDir;

    fn names(result: &CmdResult) -> Vec<(&str, Scope)> {
        result
            .snippets
            .iter()
            .map(|s| (s.name.as_str(), s.scope))
            .collect()
    }

    #[test]
    fn glob_translation() {
        let re = glob_to_regex("git*").unwrap();
        assert!(re.is_match("git-1"));
        assert!(re.is_match("git/status"));
        assert!(!re.is_match("my-git"));

        let re = glob_to_regex("docker-?").unwrap();
        assert!(re.is_match("docker-1"));
        assert!(!re.is_match("docker-10"));

        let re = glob_to_regex("[!a-c]*.x").unwrap();
        assert!(re.is_match("d.x"));
        assert!(!re.is_match("b.x"));
        assert!(!re.is_match("dax"));

        assert!(glob_to_regex("[abc").is_err());
    }

    #[test]
    fn local_shadows_user_and_filter_applies() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("local");
        let user = temp.path().join("user");
        header::write(&local.join("git-1"), "git-1", "", "git status -s").unwrap();
        header::write(&user.join("git-1"), "git-1", "", "git status").unwrap();
        header::write(&user.join("git/log"), "git/log", "", "git log").unwrap();
        header::write(&user.join("ls-1"), "ls-1", "", "ls").unwrap();
        header::write(&user.join(".hidden"), ".hidden", "", "x").unwrap();
        let paths = StorePaths::new(Some(local), user);

        let all = run(&paths, ScopeFilter::Any, None).unwrap();
        assert_eq!(
            names(&all),
            vec![
                ("git-1", Scope::Local),
                ("git/log", Scope::User),
                ("ls-1", Scope::User)
            ]
        );

        let git = run(&paths, ScopeFilter::Any, Some("git*")).unwrap();
        assert_eq!(git.snippets.len(), 2);

        let user_only = run(&paths, ScopeFilter::Only(Scope::User), Some("git-1")).unwrap();
        assert_eq!(names(&user_only), vec![("git-1", Scope::User)]);
        assert_eq!(user_only.snippets[0].body, "git status");
    }
}
