//! Global context for petposter operations.
//!
//! Provides centralized access to configuration and paths.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::util::config::{load_config, project_config_path, Config};

/// Project directories for petposter
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "petposter", "petposter"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding stored drafts
    data_dir: PathBuf,

    /// Directory holding the global config file
    config_dir: Option<PathBuf>,

    /// Merged configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext for the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::in_dir(cwd))
    }

    /// Create a GlobalContext whose project config is looked up under `cwd`.
    pub fn in_dir(cwd: PathBuf) -> Self {
        let data_dir = match PROJECT_DIRS.as_ref() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            // Fallback to a project-local directory
            None => cwd.join(".petposter").join("data"),
        };
        let config_dir = PROJECT_DIRS
            .as_ref()
            .map(|dirs| dirs.config_dir().to_path_buf());

        let mut ctx = GlobalContext {
            cwd,
            data_dir,
            config_dir,
            config: Config::default(),
        };
        ctx.reload_config();
        ctx
    }

    /// Store drafts under `dir` instead of the platform data directory.
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    fn reload_config(&mut self) {
        let global = self.global_config_path();
        self.config = load_config(global.as_deref(), &self.project_config_path());
    }

    /// Get the draft data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join("config.toml"))
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_config_is_picked_up() {
        let tmp = TempDir::new().unwrap();
        let path = project_config_path(tmp.path());
        crate::util::fs::write_string(&path, "[store]\nload_attempts = 5\n").unwrap();

        let ctx = GlobalContext::in_dir(tmp.path().to_path_buf());
        assert_eq!(ctx.config().store.load_attempts, 5);
        assert_eq!(ctx.project_config_path(), path);
    }

    #[test]
    fn test_with_data_dir() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::in_dir(tmp.path().to_path_buf())
            .with_data_dir(tmp.path().join("drafts"));
        assert_eq!(ctx.data_dir(), tmp.path().join("drafts"));
    }
}
