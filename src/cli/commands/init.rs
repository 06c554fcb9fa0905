//! Init command implementation
//!
//! Writes a starter declaration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Declaration with one variable of each kind and no comments
pub const MINIMAL_DECLARATION: &str = r##"# app-config declaration
# kinds: b (bool), i (int), f (float), s (string), l (list)

file_name = "config.cfg"

[[sections]]
name = "MAIN"

[[sections.variables]]
name = "var1"
kind = "b"
default = true

[[sections.variables]]
name = "var2"
kind = "i"
default = 2

[[sections.variables]]
name = "var3"
kind = "f"
default = 3.4

[[sections]]
name = "DATA"

[[sections.variables]]
name = "m1"
kind = "s"
default = "textm1"

[[sections.variables]]
name = "m2"
kind = "l"
default = ["m2-1", "m2-2", "m2-3"]

[[sections]]
name = "SYSTEM"

[[sections.variables]]
name = "sys_cfg_version"
kind = "s"
default = "0.1"
"##;

/// Same variables, with comment lines and every optional setting spelled out
pub const EXAMPLE_DECLARATION: &str = r##"# app-config declaration
#
# Each [[sections]] entry becomes an INI section; each [[sections.variables]]
# entry becomes an option with a typed, compiled-in default.
# kinds: b (bool), i (int), f (float), s (string), l (list)
#
# ${VAR_NAME} is replaced with the environment variable's value on load.

# Configuration file written to the data directory (<working dir>/data)
file_name = "config.cfg"

# Option names starting with one of these are treated as comments.
# The first one is used for generated comment lines.
comment_prefixes = ["#", ";"]

# Changing the version default regenerates the file, keeping user values
[version]
section = "SYSTEM"
option = "sys_cfg_version"

[[sections]]
name = "MAIN"
comments = ["general settings"]

[[sections.variables]]
name = "var1"
kind = "b"
default = true
comments = ["this is a comment for var1"]

[[sections.variables]]
name = "var2"
kind = "i"
default = 2

[[sections.variables]]
name = "var3"
kind = "f"
default = 3.4

[[sections]]
name = "DATA"
comments = ["sec comment 1", "sec comment 2"]

[[sections.variables]]
name = "m1"
kind = "s"
default = "textm1"

[[sections.variables]]
name = "m2"
kind = "l"
default = ["m2-1", "m2-2", "m2-3"]
comments = ["m2 comment 1", "m2 comment 2"]

[[sections.variables]]
name = "seed"
kind = "f"
default = 0.0

[[sections]]
name = "SYSTEM"

[[sections.variables]]
name = "sys_cfg_version"
kind = "s"
default = "0.1"
comments = ["changing the version number will cause file to be rewritten"]

[[sections.variables]]
name = "sys_var"
kind = "s"
default = "sysvar test variable"
comments = ["sys var cmt1", "sys var cmt2"]
"##;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the declaration (defaults to --declaration)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include comments and every optional setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self, declaration_path: &str) -> anyhow::Result<i32> {
        let output = self.output.as_deref().unwrap_or(declaration_path);
        tracing::info!(output = %output, "Initializing declaration file");

        println!("📝 Initializing app-config declaration");
        println!();

        let path = Path::new(output);
        if path.exists() && !self.force {
            println!("❌ Declaration file already exists: {output}");
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let content = if self.with_examples {
            EXAMPLE_DECLARATION
        } else {
            MINIMAL_DECLARATION
        };

        let written = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::write(path, content)),
            None => fs::write(path, content),
        };

        match written {
            Ok(()) => {
                println!("✅ Declaration file created: {output}");
                println!();
                println!("Next steps:");
                println!("  1. Edit {output} to declare your sections and variables");
                println!("  2. Validate it: app-config -d {output} validate");
                println!("  3. Write the configuration file: app-config -d {output} sync");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write declaration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
