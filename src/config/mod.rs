//! Declarations, schema and storage locations
//!
//! # Overview
//!
//! An application describes its configuration once, in a TOML declaration:
//! the sections, each variable's kind and compiled-in default, and comment
//! lines for the generated file. The declaration turns into:
//!
//! - [`ConfigSchema`] - which sections and variables must exist
//! - [`CommentTable`] - annotation lines keyed by section or variable name
//! - a [`ProcessState`](crate::core::ProcessState) holding the defaults
//!
//! [`StorageRoots`] decides where the configuration file lives.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use app_config::config::{load_declaration, StorageRoots};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let declaration = load_declaration("src/app-config.toml")?;
//! let roots = StorageRoots::from_declaration("src/app-config.toml")?;
//!
//! println!("config file: {}", roots.config_path(&declaration.file_name).display());
//! for section in declaration.schema().sections() {
//!     println!("[{}] {} variables", section.name, section.variables.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders in the declaration are substituted on load:
//!
//! ```toml
//! [[sections.variables]]
//! name = "db_host"
//! kind = "s"
//! default = "${APP_DB_HOST}"
//! ```

pub mod declaration;
pub mod loader;
pub mod paths;
pub mod schema;

// Re-export commonly used types
pub use declaration::{Declaration, SectionDeclaration, VariableDeclaration};
pub use loader::load_declaration;
pub use paths::StorageRoots;
pub use schema::{CommentTable, ConfigSchema, LoggingConfig, SectionSpec, VariableSpec, VersionKey};
