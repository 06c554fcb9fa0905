// app-config - typed INI configuration reconciliation
// Copyright (c) 2024 cswaim and app-config Contributors
// Licensed under the Apache License, Version 2.0

//! # app-config - typed INI configuration reconciliation
//!
//! app-config keeps a human-editable INI file and a program's typed
//! configuration variables in agreement. The program declares its sections and
//! variables once, with compiled-in defaults; the library then:
//!
//! - **Bootstraps** the file from defaults, with comments, if it is missing
//! - **Heals** it by adding any declared section or variable that went missing
//! - **Migrates** it when the declared version changes, keeping user edits
//! - **Materializes** the file's values, typed, into process state
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Reconciliation engine, document store, coercion, comments, hooks
//! - [`domain`] - Variable kinds, typed values and errors
//! - [`config`] - Declarations, schema and storage locations
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use app_config::config::{load_declaration, StorageRoots};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let declaration = load_declaration("src/app-config.toml")?;
//!     let roots = StorageRoots::from_declaration("src/app-config.toml")?;
//!
//!     let mut state = declaration.defaults()?;
//!     declaration.engine(&roots)?.run(&mut state)?;
//!
//!     let verbose = state.get_bool("verbose").unwrap_or(false);
//!     println!("verbose = {verbose}");
//!     Ok(())
//! }
//! ```
//!
//! ## Declaring in code
//!
//! The schema, comments and defaults can also be built directly, and the
//! engine's behavior adjusted per section or variable with hooks:
//!
//! ```rust,no_run
//! use app_config::config::{CommentTable, ConfigSchema, VersionKey};
//! use app_config::core::{Handling, HookSet, ProcessState, ReconcileEngine};
//! use app_config::domain::{Value, VarKind};
//!
//! # fn example() -> app_config::domain::Result<()> {
//! let schema = ConfigSchema::new(VersionKey::default())
//!     .with_section("DATA", [("seed", VarKind::Float)])
//!     .with_section("SYSTEM", [("sys_cfg_version", VarKind::Str)]);
//!
//! let hooks = HookSet::new().on_materialize_variable(|ctx| {
//!     if ctx.variable.name == "seed" {
//!         ctx.state.set("seed", Value::Float(0.023));
//!         return Ok(Handling::Handled);
//!     }
//!     Ok(Handling::Default)
//! });
//!
//! let mut state = ProcessState::new()
//!     .with("seed", 0.0)
//!     .with("sys_cfg_version", "0.1");
//! ReconcileEngine::new(schema, CommentTable::new(), "data/config.cfg")
//!     .with_hooks(hooks)
//!     .run(&mut state)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::AppConfigError`]. Missing sections,
//! missing variables and version changes are healed, not reported; a value
//! that cannot be read as its declared kind is always an error:
//!
//! ```rust,no_run
//! use app_config::domain::AppConfigError;
//!
//! fn example() -> Result<(), AppConfigError> {
//!     let declaration = app_config::config::load_declaration("src/app-config.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Reconciliation steps are reported with the `tracing` crate; install a
//! subscriber with [`logging::init_logging`] or your own.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
