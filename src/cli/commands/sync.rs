//! Sync command implementation
//!
//! Runs one reconciliation and reports what changed on disk.

use super::{exit_code, Workspace, EXIT_OK};
use crate::core::{ProcessState, RunOutcome};
use crate::domain::Result;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {}

impl SyncArgs {
    /// Execute the sync command
    pub fn execute(&self, declaration_path: &str, data_dir: Option<&str>) -> anyhow::Result<i32> {
        let (workspace, outcome, _) = match reconcile(declaration_path, data_dir) {
            Ok(result) => result,
            Err(e) => {
                log_error_with_context!(&e, "sync");
                println!("❌ Reconciliation failed");
                println!("   Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        let path = workspace.config_path();
        if outcome.created {
            println!("✅ Created {} from defaults", path.display());
        }
        if let Some(migration) = &outcome.migration {
            println!(
                "🔄 Version changed ({} -> {}), rewrote {}",
                migration.from.as_deref().unwrap_or("none"),
                migration.to,
                path.display()
            );
        }
        for section in &outcome.additions.sections {
            println!("➕ Added section [{section}]");
        }
        for (section, option) in &outcome.additions.options {
            println!("➕ Added [{section}] {option}");
        }
        if !outcome.wrote_file() {
            println!("✅ {} is up to date", path.display());
        }
        Ok(EXIT_OK)
    }
}

/// Loads the workspace and runs the engine against its defaults
pub(crate) fn reconcile(
    declaration_path: &str,
    data_dir: Option<&str>,
) -> Result<(Workspace, RunOutcome, ProcessState)> {
    let workspace = Workspace::open(declaration_path, data_dir)?;
    let mut state = workspace.declaration.defaults()?;
    let mut engine = workspace.declaration.engine(&workspace.roots)?;
    let outcome = engine.run(&mut state)?;
    Ok((workspace, outcome, state))
}
