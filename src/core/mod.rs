//! Reconciliation core
//!
//! # Modules
//!
//! - [`coercion`] - Typed value to text and back
//! - [`comments`] - Attach and strip annotation lines
//! - [`document`] - Ordered INI document store
//! - [`state`] - Live process variables
//! - [`hooks`] - Per-section and per-variable extension points
//! - [`engine`] - Load, migrate, verify and materialize
//! - [`report`] - Human-readable dump of a document
//!
//! # Workflow
//!
//! 1. **Load**: read the file, or write one from compiled-in defaults
//! 2. **Migrate**: regenerate it if the version tag changed, keeping user values
//! 3. **Verify**: add any missing declared section or variable
//! 4. **Strip**: drop comment options from the in-memory document
//! 5. **Materialize**: copy typed values into [`ProcessState`]
//!
//! # Example
//!
//! ```rust,no_run
//! use app_config::config::{load_declaration, StorageRoots};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let declaration = load_declaration("src/app-config.toml")?;
//! let roots = StorageRoots::from_declaration("src/app-config.toml")?;
//!
//! let mut state = declaration.defaults()?;
//! let mut engine = declaration.engine(&roots)?;
//! let outcome = engine.run(&mut state)?;
//!
//! if let Some(migration) = &outcome.migration {
//!     println!("migrated to {}", migration.to);
//! }
//! # Ok(())
//! # }
//! ```

pub mod coercion;
pub mod comments;
pub mod document;
pub mod engine;
pub mod hooks;
pub mod report;
pub mod state;

pub use comments::CommentOverlay;
pub use document::ConfigDocument;
pub use engine::{Additions, Migration, ReconcileEngine, RunOutcome};
pub use hooks::{Handling, HookSet, NoHooks, ReconcileHooks, SectionContext, VariableContext};
pub use report::DocumentReport;
pub use state::ProcessState;
