//! Show command implementation
//!
//! Reconciles, then prints the configuration as the application would see it.

use super::sync::reconcile;
use super::{exit_code, EXIT_OK};
use crate::core::DocumentReport;
use clap::Args;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Leave out comment lines
    #[arg(long)]
    pub no_comments: bool,

    /// Print the materialized values as JSON instead
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, declaration_path: &str, data_dir: Option<&str>) -> anyhow::Result<i32> {
        let (workspace, outcome, state) = match reconcile(declaration_path, data_dir) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("❌ Reconciliation failed");
                eprintln!("   Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(EXIT_OK);
        }

        let comments = workspace.declaration.comments();
        let config_path = workspace.config_path();
        let report = DocumentReport::new(&outcome.document, &comments)
            .with_heading(config_path.display().to_string())
            .with_roots(&workspace.roots)
            .with_config_path(&config_path)
            .show_comments(!self.no_comments);
        print!("{report}");
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::init::MINIMAL_DECLARATION;
    use crate::cli::commands::EXIT_CONFIG;
    use tempfile::TempDir;

    #[test]
    fn test_show_runs_reconciliation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app-config.toml");
        std::fs::write(&path, MINIMAL_DECLARATION).unwrap();
        let data = dir.path().join("data");

        let args = ShowArgs {
            no_comments: false,
            json: true,
        };
        let code = args
            .execute(path.to_str().unwrap(), Some(data.to_str().unwrap()))
            .unwrap();
        assert_eq!(code, EXIT_OK);
        assert!(data.join("config.cfg").is_file());
    }

    #[test]
    fn test_show_missing_declaration() {
        let args = ShowArgs {
            no_comments: true,
            json: false,
        };
        let code = args.execute("/nonexistent/app-config.toml", None).unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
