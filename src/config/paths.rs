//! Where plugdash keeps its files
//!
//! Each directory can be pinned with an environment variable. Otherwise the
//! XDG base directories are used on Unix and the known folders on Windows.

use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "plugdash";

/// Which of the two application directories to resolve
#[derive(Clone, Copy)]
enum DirKind {
    Config,
    Data,
}

impl DirKind {
    fn override_var(self) -> &'static str {
        match self {
            DirKind::Config => "PLUGDASH_CONFIG_DIR",
            DirKind::Data => "PLUGDASH_DATA_DIR",
        }
    }

    fn xdg_var(self) -> &'static str {
        match self {
            DirKind::Config => "XDG_CONFIG_HOME",
            DirKind::Data => "XDG_DATA_HOME",
        }
    }

    /// Base directory relative to the home directory
    fn home_relative(self) -> PathBuf {
        match self {
            DirKind::Config => PathBuf::from(".config"),
            DirKind::Data => Path::new(".local").join("share"),
        }
    }

    fn resolve(self) -> PathBuf {
        if let Ok(dir) = std::env::var(self.override_var()) {
            return PathBuf::from(dir);
        }

        if cfg!(windows) {
            if let Some(dirs) = ProjectDirs::from("", "", APP_NAME) {
                return match self {
                    DirKind::Config => dirs.config_dir().to_path_buf(),
                    DirKind::Data => dirs.data_dir().to_path_buf(),
                };
            }
        }

        let base = std::env::var(self.xdg_var())
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = BaseDirs::new()
                    .map(|dirs| dirs.home_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."));
                home.join(self.home_relative())
            });
        base.join(APP_NAME)
    }
}

/// Configuration directory (`PLUGDASH_CONFIG_DIR`, else `~/.config/plugdash`)
pub fn config_dir() -> PathBuf {
    DirKind::Config.resolve()
}

/// Data directory (`PLUGDASH_DATA_DIR`, else `~/.local/share/plugdash`)
pub fn data_dir() -> PathBuf {
    DirKind::Data.resolve()
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Get the persisted login session path
pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_end_in_a_usable_location() {
        assert!(config_dir().is_absolute() || config_dir().to_string_lossy().starts_with("."));
        assert!(data_dir().is_absolute() || data_dir().to_string_lossy().starts_with("."));
    }

    #[test]
    fn test_file_names() {
        assert!(root_config_path().ends_with("config.yaml"));
        assert!(session_path().ends_with("session.json"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directories are left alone
        ensure_dir(&nested).unwrap();
    }
}
