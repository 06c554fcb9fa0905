//! Storage roots
//!
//! The configuration file lives in a data directory derived from where the
//! declaration sits:
//!
//! ```text
//! <working>/            working directory
//! <working>/src/        source directory, holds the declaration
//! <working>/data/       data directory, holds the configuration file
//! ```

use crate::domain::context::ResultExt;
use crate::domain::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the data directory under the working directory
pub const DATA_DIR_NAME: &str = "data";

/// Source, working and data directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageRoots {
    pub source_dir: PathBuf,
    pub working_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl StorageRoots {
    /// Working directory is the parent of `source_dir`; data goes in `<working>/data`
    pub fn from_source_dir(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let working_dir = source_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| source_dir.clone());
        let data_dir = working_dir.join(DATA_DIR_NAME);
        Self {
            source_dir,
            working_dir,
            data_dir,
        }
    }

    /// Uses the directory holding the declaration file as the source directory
    pub fn from_declaration(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let source_dir = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(absolute);
        Ok(Self::from_source_dir(source_dir))
    }

    /// `./src` if it exists, else the current directory
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let src = cwd.join("src");
        if src.is_dir() {
            Ok(Self::from_source_dir(src))
        } else {
            Ok(Self::from_source_dir(cwd))
        }
    }

    /// Replaces the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Full path of the configuration file inside the data directory
    pub fn config_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_source_dir() {
        let roots = StorageRoots::from_source_dir("/opt/app/src");
        assert_eq!(roots.working_dir, PathBuf::from("/opt/app"));
        assert_eq!(roots.data_dir, PathBuf::from("/opt/app/data"));
        assert_eq!(
            roots.config_path("config.cfg"),
            PathBuf::from("/opt/app/data/config.cfg")
        );
    }

    #[test]
    fn test_from_declaration_uses_parent() {
        let dir = TempDir::new().unwrap();
        let decl = dir.path().join("src").join("app-config.toml");
        let roots = StorageRoots::from_declaration(&decl).unwrap();
        assert_eq!(roots.source_dir, dir.path().join("src"));
        assert_eq!(roots.working_dir, dir.path());
        assert_eq!(roots.data_dir, dir.path().join("data"));
    }

    #[test]
    fn test_with_data_dir_override() {
        let roots = StorageRoots::from_source_dir("/opt/app/src").with_data_dir("/var/lib/app");
        assert_eq!(roots.working_dir, PathBuf::from("/opt/app"));
        assert_eq!(roots.config_path("a.cfg"), PathBuf::from("/var/lib/app/a.cfg"));
    }

    #[test]
    fn test_discover_is_absolute() {
        let roots = StorageRoots::discover().unwrap();
        assert!(roots.data_dir.is_absolute());
        assert!(roots.data_dir.ends_with(DATA_DIR_NAME));
    }
}
