//! CLI command implementations

pub mod init;
pub mod show;
pub mod sync;
pub mod validate;

use crate::config::{load_declaration, Declaration, StorageRoots};
use crate::domain::{AppConfigError, Result};

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;
/// Exit code for declaration and configuration file problems
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;

/// Exit code for a library error
pub fn exit_code(error: &AppConfigError) -> i32 {
    match error {
        AppConfigError::NotFound(_)
        | AppConfigError::Declaration(_)
        | AppConfigError::Malformed { .. }
        | AppConfigError::Syntax { .. } => EXIT_CONFIG,
        AppConfigError::Io(_) | AppConfigError::Hook(_) => EXIT_FATAL,
    }
}

/// A loaded declaration and the directories it resolves to
#[derive(Debug, Clone)]
pub struct Workspace {
    pub declaration: Declaration,
    pub roots: StorageRoots,
}

impl Workspace {
    /// Loads the declaration at `path`; `data_dir` overrides the derived data directory
    pub fn open(path: &str, data_dir: Option<&str>) -> Result<Self> {
        let declaration = load_declaration(path)?;
        let mut roots = StorageRoots::from_declaration(path)?;
        if let Some(dir) = data_dir {
            roots = roots.with_data_dir(dir);
        }
        Ok(Self { declaration, roots })
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.roots.config_path(&self.declaration.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VarKind;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&AppConfigError::NotFound("x".into())), EXIT_CONFIG);
        assert_eq!(
            exit_code(&AppConfigError::Malformed {
                section: "MAIN".into(),
                option: "var2".into(),
                kind: VarKind::Int,
                value: "two".into(),
            }),
            EXIT_CONFIG
        );
        assert_eq!(exit_code(&AppConfigError::Io("disk full".into())), EXIT_FATAL);
    }

    #[test]
    fn test_open_missing_declaration() {
        let err = Workspace::open("/nonexistent/src/app-config.toml", None).unwrap_err();
        assert!(matches!(err, AppConfigError::NotFound(_)));
    }
}
