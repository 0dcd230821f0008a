use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which store a snippet lives in.
///
/// The local store is discovered per invocation by walking up from the working
/// directory; the user store is the per-user data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Local,
    User,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => write!(f, "local"),
            Scope::User => write!(f, "user"),
        }
    }
}

/// Scope restriction requested by the caller (`--user` / `--local`).
///
/// `Any` reads local first and falls back to the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeFilter {
    #[default]
    Any,
    Only(Scope),
}

impl ScopeFilter {
    pub fn from_flags(user: bool, local: bool) -> Self {
        match (user, local) {
            (true, false) => ScopeFilter::Only(Scope::User),
            (false, true) => ScopeFilter::Only(Scope::Local),
            _ => ScopeFilter::Any,
        }
    }

    pub fn forced(&self) -> Option<Scope> {
        match self {
            ScopeFilter::Any => None,
            ScopeFilter::Only(scope) => Some(*scope),
        }
    }
}

/// Parsed header fields of a snippet file.
///
/// Empty strings mean "present but empty"; `None` on the optional fields means
/// the line is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub description: String,
    pub args: Option<String>,
    pub abbr: Option<String>,
    pub created: String,
}

impl Header {
    /// Non-empty args hint, if the snippet expects arguments.
    pub fn args_hint(&self) -> Option<&str> {
        self.args.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn abbr_keys(&self) -> Vec<&str> {
        self.abbr
            .as_deref()
            .map(|keys| keys.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// A snippet as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Path relative to the store root, `/`-separated.
    pub name: String,
    pub scope: Scope,
    pub path: PathBuf,
    pub header: Header,
    pub body: String,
}

impl Snippet {
    /// First line of the body, for one-line listings.
    pub fn first_line(&self) -> &str {
        self.body.lines().next().unwrap_or("")
    }
}
