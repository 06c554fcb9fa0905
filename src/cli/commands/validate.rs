//! Validate command implementation
//!
//! Loads the declaration file, checks it, and prints a summary.

use super::{exit_code, Workspace, EXIT_OK};
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, declaration_path: &str, data_dir: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(declaration = %declaration_path, "Validating declaration");

        println!("🔍 Validating declaration file: {declaration_path}");
        println!();

        let workspace = match Workspace::open(declaration_path, data_dir) {
            Ok(ws) => ws,
            Err(e) => {
                println!("❌ Declaration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        let declaration = &workspace.declaration;
        let schema = declaration.schema();
        let defaults = declaration.defaults()?;
        let version_key = schema.version_key();

        println!("✅ Declaration is valid");
        println!();
        println!("Declaration Summary:");
        println!("  Config File: {}", workspace.config_path().display());
        println!(
            "  Version: [{}] {} = {}",
            version_key.section,
            version_key.option,
            defaults.get_str(&version_key.option).unwrap_or_default()
        );
        println!(
            "  Comment Prefixes: {}",
            declaration.comment_prefixes.join(" ")
        );
        println!("  Sections: {}", schema.sections().len());
        for section in schema.sections() {
            println!("    [{}] {} variables", section.name, section.variables.len());
        }
        println!("  Variables: {}", schema.variable_count());
        println!();
        Ok(EXIT_OK)
    }
}
