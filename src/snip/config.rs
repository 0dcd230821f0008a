use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_LOCAL_DIR: &str = ".zsh-snip";
pub const DEFAULT_FINDER: &str = "fzf";
pub const DEFAULT_PREVIEW_LENGTH: usize = 60;

pub const ENV_CONFIG: &str = "ZSH_SNIP_CONFIG";
pub const ENV_DIR: &str = "ZSH_SNIP_DIR";
pub const ENV_LOCAL_DIR: &str = "ZSH_SNIP_LOCAL_DIR";
pub const ENV_EDITOR: &str = "ZSH_SNIP_EDITOR";
pub const ENV_CLIPBOARD: &str = "ZSH_SNIP_CLIPBOARD";
pub const ENV_FINDER: &str = "ZSH_SNIP_FINDER";

/// How yank reaches the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ClipboardSetting {
    /// Pick a tool from the environment.
    #[default]
    Auto,
    /// Never touch the clipboard.
    Disabled,
    /// Pipe into this command line.
    Command(String),
}

impl From<String> for ClipboardSetting {
    fn from(value: String) -> Self {
        match value.trim() {
            "" | "auto" => ClipboardSetting::Auto,
            "none" | "off" | "false" => ClipboardSetting::Disabled,
            other => ClipboardSetting::Command(other.to_string()),
        }
    }
}

impl From<ClipboardSetting> for String {
    fn from(value: ClipboardSetting) -> Self {
        match value {
            ClipboardSetting::Auto => "auto".to_string(),
            ClipboardSetting::Disabled => "none".to_string(),
            ClipboardSetting::Command(cmd) => cmd,
        }
    }
}

/// User configuration, read from `config.json` in the per-user config
/// directory. Every field is optional in the file; environment variables win
/// over the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SnipConfig {
    /// User store root. `None` means the per-user data directory.
    pub snippets_dir: Option<PathBuf>,

    /// Directory name marking a local store. Empty disables local stores.
    pub local_dir_name: String,

    /// Editor command line. `None` falls back to `$VISUAL`, `$EDITOR`, `vi`.
    pub editor: Option<String>,

    pub clipboard: ClipboardSetting,

    /// Fuzzy finder binary.
    pub finder: String,

    /// Maximum characters of the body shown in listings.
    pub preview_length: usize,

    /// Shell used by `exec`. `None` falls back to `$SHELL`, then `sh`.
    pub shell: Option<String>,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            snippets_dir: None,
            local_dir_name: DEFAULT_LOCAL_DIR.to_string(),
            editor: None,
            clipboard: ClipboardSetting::Auto,
            finder: DEFAULT_FINDER.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            shell: None,
        }
    }
}

impl SnipConfig {
    /// Loads config from `path`, or returns defaults when the file is missing.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: SnipConfig = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads config from `config_dir/config.json` (or `$ZSH_SNIP_CONFIG`) and
    /// applies environment overrides.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir.join(CONFIG_FILENAME));
        let mut config = Self::load_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides from a variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DIR).filter(|v| !v.is_empty()) {
            self.snippets_dir = Some(PathBuf::from(dir));
        }
        // Set-but-empty is meaningful here: it turns local stores off.
        if let Some(name) = lookup(ENV_LOCAL_DIR) {
            self.local_dir_name = name;
        }
        if let Some(editor) = lookup(ENV_EDITOR).filter(|v| !v.is_empty()) {
            self.editor = Some(editor);
        }
        if let Some(clipboard) = lookup(ENV_CLIPBOARD) {
            self.clipboard = ClipboardSetting::from(clipboard);
        }
        if let Some(finder) = lookup(ENV_FINDER).filter(|v| !v.is_empty()) {
            self.finder = finder;
        }
    }

    /// Editor command line after environment fallbacks.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Shell used to run snippets.
    pub fn shell_command(&self) -> String {
        self.shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "sh".to_string())
    }
}
