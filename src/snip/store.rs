//! # Storage Layer
//!
//! Snippets are plain files under a store root; the snippet name is the path
//! relative to that root, so `git/status` lives at `<root>/git/status`.
//!
//! There are two roots per invocation:
//!
//! - `Scope::User`: the per-user data directory (always present, created lazily)
//! - `Scope::Local`: a project directory named by the configured marker
//!   (default `.zsh-snip`), found by walking up from the working directory
//!
//! The two are separate namespaces. Reads with no forced scope try local first,
//! so a local snippet shadows a user snippet of the same name.
//!
//! Nothing is cached: every operation lists and reads from disk again. Entries
//! with any path segment starting with `.` are invisible.

use crate::error::{Result, SnipError};
use crate::header;
use crate::model::{Scope, ScopeFilter, Snippet};
use crate::naming::validate_name;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walks from `start_dir` up to the filesystem root looking for a child
/// directory named `marker_name`. Returns that directory, nearest first.
///
/// An empty `marker_name` disables local stores.
pub fn find_local_root(start_dir: &Path, marker_name: &str) -> Option<PathBuf> {
    if marker_name.is_empty() {
        return None;
    }
    start_dir
        .ancestors()
        .map(|dir| dir.join(marker_name))
        .find(|candidate| candidate.is_dir())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Lists snippet names under `store_root`, sorted by relative path.
///
/// Only regular files count. Hidden files and anything inside hidden
/// directories are skipped; the root itself may be hidden.
pub fn list_snippets(store_root: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(store_root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(store_root).ok()?;
            let parts: Option<Vec<&str>> =
                relative.components().map(|c| c.as_os_str().to_str()).collect();
            parts.map(|parts| parts.join("/"))
        })
        .collect();
    names.sort();
    names
}

/// The store roots resolved for one invocation.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub local: Option<PathBuf>,
    pub user: PathBuf,
}

impl StorePaths {
    pub fn new(local: Option<PathBuf>, user: PathBuf) -> Self {
        Self { local, user }
    }

    pub fn root(&self, scope: Scope) -> Result<&Path> {
        match scope {
            Scope::Local => self.local.as_deref().ok_or(SnipError::NoLocalStore),
            Scope::User => Ok(&self.user),
        }
    }

    /// Scopes to consult for reads, in precedence order.
    pub fn read_order(&self, filter: ScopeFilter) -> Result<Vec<Scope>> {
        match filter {
            ScopeFilter::Only(scope) => {
                self.root(scope)?;
                Ok(vec![scope])
            }
            ScopeFilter::Any => {
                let mut scopes = Vec::with_capacity(2);
                if self.local.is_some() {
                    scopes.push(Scope::Local);
                }
                scopes.push(Scope::User);
                Ok(scopes)
            }
        }
    }

    /// Scope new snippets are written to: the forced one, else the user store.
    pub fn write_scope(&self, filter: ScopeFilter) -> Result<Scope> {
        let scope = filter.forced().unwrap_or(Scope::User);
        self.root(scope)?;
        Ok(scope)
    }

    /// File path for `name` in `scope`, without checking existence.
    pub fn path_for(&self, scope: Scope, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root(scope)?.join(name))
    }

    /// Finds which store holds `name`, honoring local-over-user precedence.
    pub fn locate(&self, name: &str, filter: ScopeFilter) -> Result<(Scope, PathBuf)> {
        validate_name(name).map_err(|_| SnipError::NotFound {
            name: name.to_string(),
            scope: filter.forced(),
        })?;
        for scope in self.read_order(filter)? {
            let path = self.root(scope)?.join(name);
            if path.is_file() {
                debug!(name, %scope, path = %path.display(), "located snippet");
                return Ok((scope, path));
            }
        }
        Err(SnipError::NotFound {
            name: name.to_string(),
            scope: filter.forced(),
        })
    }

    /// Loads one snippet by name.
    pub fn load(&self, name: &str, filter: ScopeFilter) -> Result<Snippet> {
        let (scope, path) = self.locate(name, filter)?;
        load_file(name, scope, path)
    }

    /// Loads every visible snippet, local entries shadowing user entries.
    pub fn load_all(&self, filter: ScopeFilter) -> Result<Vec<Snippet>> {
        let mut seen = HashSet::new();
        let mut snippets = Vec::new();
        for scope in self.read_order(filter)? {
            let root = self.root(scope)?;
            for name in list_snippets(root) {
                if !seen.insert(name.clone()) {
                    continue;
                }
                let path = root.join(&name);
                match load_file(&name, scope, path) {
                    Ok(snippet) => snippets.push(snippet),
                    Err(err) => warn!(%name, %scope, "skipping unreadable snippet: {}", err),
                }
            }
        }
        snippets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snippets)
    }
}

fn load_file(name: &str, scope: Scope, path: PathBuf) -> Result<Snippet> {
    let parsed = header::read(&path)?;
    Ok(Snippet {
        name: name.to_string(),
        scope,
        path,
        header: parsed.header,
        body: parsed.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn put(root: &Path, name: &str, body: &str) {
        header::write(&root.join(name), name, "", body).unwrap();
    }

    #[test]
    fn find_local_root_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".zsh-snip")).unwrap();
        assert_eq!(
            find_local_root(temp.path(), ".zsh-snip"),
            Some(temp.path().join(".zsh-snip"))
        );
    }

    #[test]
    fn find_local_root_walks_up_to_nearest() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let deep = project.join("src").join("deep");
        fs::create_dir_all(&deep).unwrap();
        fs::create_dir(temp.path().join(".zsh-snip")).unwrap();
        fs::create_dir(project.join(".zsh-snip")).unwrap();

        assert_eq!(
            find_local_root(&deep, ".zsh-snip"),
            Some(project.join(".zsh-snip"))
        );
    }

    #[test]
    fn find_local_root_ignores_plain_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".snip-marker-file"), "").unwrap();
        assert_eq!(find_local_root(temp.path(), ".snip-marker-file"), None);
    }

    #[test]
    fn find_local_root_disabled_by_empty_marker() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_local_root(temp.path(), ""), None);
    }

    #[test]
    fn list_snippets_is_sorted_and_recursive() {
        let temp = TempDir::new().unwrap();
        put(temp.path(), "zeta", "z");
        put(temp.path(), "git/status", "git status");
        put(temp.path(), "alpha", "a");

        assert_eq!(
            list_snippets(temp.path()),
            vec!["alpha", "git/status", "zeta"]
        );
    }

    #[test]
    fn list_snippets_skips_hidden_entries() {
        let temp = TempDir::new().unwrap();
        put(temp.path(), "visible", "v");
        put(temp.path(), ".hidden", "h");
        put(temp.path(), ".git/config", "c");
        put(temp.path(), "dir/.swp", "s");

        assert_eq!(list_snippets(temp.path()), vec!["visible"]);
    }

    #[test]
    fn list_snippets_allows_hidden_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".zsh-snip");
        put(&root, "local-1", "x");
        assert_eq!(list_snippets(&root), vec!["local-1"]);
    }

    #[test]
    fn list_snippets_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_snippets(&temp.path().join("missing")).is_empty());
    }

    fn two_stores() -> (TempDir, StorePaths) {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join(".zsh-snip");
        let user = temp.path().join("user");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(&user).unwrap();
        (temp, StorePaths::new(Some(local), user))
    }

    #[test]
    fn local_shadows_user_on_read() {
        let (_temp, paths) = two_stores();
        put(&paths.user, "build", "make");
        put(paths.local.as_ref().unwrap(), "build", "cargo build");

        let snippet = paths.load("build", ScopeFilter::Any).unwrap();
        assert_eq!(snippet.scope, Scope::Local);
        assert_eq!(snippet.body, "cargo build");

        let snippet = paths.load("build", ScopeFilter::Only(Scope::User)).unwrap();
        assert_eq!(snippet.body, "make");
    }

    #[test]
    fn load_all_dedupes_by_name() {
        let (_temp, paths) = two_stores();
        put(&paths.user, "build", "make");
        put(&paths.user, "deploy", "ship");
        put(paths.local.as_ref().unwrap(), "build", "cargo build");

        let all = paths.load_all(ScopeFilter::Any).unwrap();
        let summary: Vec<(&str, Scope)> = all.iter().map(|s| (s.name.as_str(), s.scope)).collect();
        assert_eq!(summary, vec![("build", Scope::Local), ("deploy", Scope::User)]);
    }

    #[test]
    fn missing_snippet_is_not_found() {
        let (_temp, paths) = two_stores();
        let err = paths.locate("nope", ScopeFilter::Any).unwrap_err();
        assert!(matches!(err, SnipError::NotFound { .. }));
    }

    #[test]
    fn hidden_or_escaping_names_are_not_found() {
        let (_temp, paths) = two_stores();
        put(&paths.user, ".secret", "x");
        assert!(paths.locate(".secret", ScopeFilter::Any).is_err());
        assert!(paths.locate("../user/x", ScopeFilter::Any).is_err());
    }

    #[test]
    fn forcing_missing_local_scope_fails() {
        let temp = TempDir::new().unwrap();
        let paths = StorePaths::new(None, temp.path().to_path_buf());
        let err = paths.load_all(ScopeFilter::Only(Scope::Local)).unwrap_err();
        assert!(matches!(err, SnipError::NoLocalStore));
        assert_eq!(paths.read_order(ScopeFilter::Any).unwrap(), vec![Scope::User]);
    }

    #[test]
    fn write_scope_defaults_to_user() {
        let (_temp, paths) = two_stores();
        assert_eq!(paths.write_scope(ScopeFilter::Any).unwrap(), Scope::User);
        assert_eq!(
            paths.write_scope(ScopeFilter::Only(Scope::Local)).unwrap(),
            Scope::Local
        );
    }
}
