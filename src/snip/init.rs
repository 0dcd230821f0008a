use crate::api::SnipApi;
use crate::config::SnipConfig;
use crate::error::{Result, SnipError};
use crate::store::{find_local_root, StorePaths};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-user directories, before configuration overrides.
#[derive(Debug, Clone)]
pub struct UserDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl UserDirs {
    pub fn discover() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "zsh-snip")
            .ok_or_else(|| SnipError::Api("Could not determine home directory".to_string()))?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }
}

/// Resolves the store roots for an invocation started in `cwd`.
pub fn resolve_paths(cwd: &Path, config: &SnipConfig, dirs: &UserDirs) -> StorePaths {
    let user = config
        .snippets_dir
        .clone()
        .unwrap_or_else(|| dirs.data_dir.clone());
    let local = find_local_root(cwd, &config.local_dir_name);
    debug!(user = %user.display(), local = ?local, "resolved store roots");
    StorePaths::new(local, user)
}

/// Loads configuration and builds the API for `cwd`.
pub fn initialize(cwd: &Path) -> Result<SnipApi> {
    let dirs = UserDirs::discover()?;
    let config = SnipConfig::load(&dirs.config_dir)?;
    let paths = resolve_paths(cwd, &config, &dirs);
    Ok(SnipApi::new(paths, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dirs(temp: &TempDir) -> UserDirs {
        UserDirs {
            config_dir: temp.path().join("config"),
            data_dir: temp.path().join("data"),
        }
    }

    #[test]
    fn defaults_to_data_dir_without_local_store() {
        let temp = TempDir::new().unwrap();
        let config = SnipConfig {
            local_dir_name: "snip-test-marker-absent".to_string(),
            ..SnipConfig::default()
        };
        let paths = resolve_paths(temp.path(), &config, &dirs(&temp));
        assert_eq!(paths.user, temp.path().join("data"));
        assert_eq!(paths.local, None);
    }

    #[test]
    fn configured_dir_and_local_store() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let nested = project.join("src/deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(project.join(".zsh-snip")).unwrap();

        let config = SnipConfig {
            snippets_dir: Some(temp.path().join("mine")),
            ..SnipConfig::default()
        };
        let paths = resolve_paths(&nested, &config, &dirs(&temp));
        assert_eq!(paths.user, temp.path().join("mine"));
        assert_eq!(paths.local, Some(project.join(".zsh-snip")));
    }

    #[test]
    fn empty_marker_disables_local_store() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".zsh-snip")).unwrap();
        let config = SnipConfig {
            local_dir_name: String::new(),
            ..SnipConfig::default()
        };
        let paths = resolve_paths(temp.path(), &config, &dirs(&temp));
        assert_eq!(paths.local, None);
    }
}
