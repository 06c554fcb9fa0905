//! Reconciliation engine
//!
//! [`ReconcileEngine`] keeps one configuration file and one [`ProcessState`]
//! in agreement. A [`run`](ReconcileEngine::run) goes through five steps:
//!
//! 1. **Load** the file, or generate and persist a default one if it is absent.
//! 2. **Migrate** if the stored version tag differs from the compiled-in
//!    version: values already on disk are pulled into process state first, so
//!    regenerating the file keeps them.
//! 3. **Verify** every declared section and variable exists, adding missing
//!    ones with their current value, and persist if anything was added.
//! 4. **Strip** comment options so the in-memory document matches a plain read.
//! 5. **Materialize** typed values from the document into process state.
//!
//! Files written by the engine keep their comment lines; only the in-memory
//! document returned by a run is free of them.
//!
//! # Examples
//!
//! ```no_run
//! use app_config::config::{CommentTable, ConfigSchema, VersionKey};
//! use app_config::core::{ProcessState, ReconcileEngine};
//! use app_config::domain::VarKind;
//!
//! # fn example() -> app_config::domain::Result<()> {
//! let schema = ConfigSchema::new(VersionKey::new("SYSTEM", "ver"))
//!     .with_section("MAIN", [("flag", VarKind::Bool)])
//!     .with_section("SYSTEM", [("ver", VarKind::Str)]);
//! let comments = CommentTable::new().with("flag", ["turn the feature on or off"]);
//!
//! let mut state = ProcessState::new().with("flag", true).with("ver", "1.0");
//! let mut engine = ReconcileEngine::new(schema, comments, "data/app.cfg");
//! let outcome = engine.run(&mut state)?;
//!
//! println!("created: {}, flag = {:?}", outcome.created, state.get_bool("flag"));
//! # Ok(())
//! # }
//! ```

use crate::config::{CommentTable, ConfigSchema, VariableSpec};
use crate::core::coercion::{decode, encode};
use crate::core::comments::CommentOverlay;
use crate::core::document::ConfigDocument;
use crate::core::hooks::{NoHooks, ReconcileHooks, SectionContext, VariableContext};
use crate::core::state::ProcessState;
use crate::domain::{AppConfigError, Result, Value};
use crate::log_migration;
use std::path::{Path, PathBuf};

/// A version-triggered rewrite of the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Version found in the file, `None` if the tag was missing
    pub from: Option<String>,
    /// Compiled-in version now recorded in the file
    pub to: String,
}

/// Sections and options added by [`ReconcileEngine::verify`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Additions {
    pub sections: Vec<String>,
    pub options: Vec<(String, String)>,
}

impl Additions {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.options.is_empty()
    }
}

/// What a [`ReconcileEngine::run`] did
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The reconciled document, comments stripped
    pub document: ConfigDocument,
    /// The file did not exist and was generated from defaults
    pub created: bool,
    /// Set if the version tag differed and the file was rewritten
    pub migration: Option<Migration>,
    /// Declared items that were missing and got added
    pub additions: Additions,
}

impl RunOutcome {
    /// Whether the run wrote the file
    pub fn wrote_file(&self) -> bool {
        self.created || self.migration.is_some() || !self.additions.is_empty()
    }
}

/// Keeps a configuration file and a [`ProcessState`] in agreement
pub struct ReconcileEngine {
    schema: ConfigSchema,
    comments: CommentTable,
    config_path: PathBuf,
    overlay: CommentOverlay,
    hooks: Box<dyn ReconcileHooks>,
    initialized: bool,
}

impl std::fmt::Debug for ReconcileEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileEngine")
            .field("config_path", &self.config_path)
            .field("sections", &self.schema.sections().len())
            .field("overlay", &self.overlay)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl ReconcileEngine {
    /// Creates an engine with the stock behavior and default comment prefixes
    pub fn new(schema: ConfigSchema, comments: CommentTable, config_path: impl Into<PathBuf>) -> Self {
        Self {
            schema,
            comments,
            config_path: config_path.into(),
            overlay: CommentOverlay::default(),
            hooks: Box::new(NoHooks),
            initialized: false,
        }
    }

    /// Replaces the hooks
    pub fn with_hooks(mut self, hooks: impl ReconcileHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Replaces the comment marker and prefix set
    pub fn with_overlay(mut self, overlay: CommentOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    pub fn comments(&self) -> &CommentTable {
        &self.comments
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn overlay(&self) -> &CommentOverlay {
        &self.overlay
    }

    /// Runs the init hook, once per engine
    pub fn initialize(&mut self, state: &mut ProcessState) -> Result<()> {
        if !self.initialized {
            self.hooks.init(state)?;
            self.initialized = true;
        }
        Ok(())
    }

    /// Load, migrate, verify, strip comments and materialize
    ///
    /// Running twice with no external edits in between yields the same process
    /// state and leaves the file untouched the second time.
    ///
    /// # Errors
    ///
    /// - [`AppConfigError::Io`] if the file cannot be read or written
    /// - [`AppConfigError::Syntax`] if the file is not valid INI text
    /// - [`AppConfigError::Malformed`] if a stored value does not fit its kind
    /// - [`AppConfigError::Declaration`] if a declared variable has no value in `state`
    pub fn run(&mut self, state: &mut ProcessState) -> Result<RunOutcome> {
        self.initialize(state)?;

        let (mut document, created) = self.load(state)?;
        let migration = self.migrate_if_version_changed(&mut document, state)?;

        let additions = self.verify(&mut document, state)?;
        if !additions.is_empty() {
            tracing::info!(
                sections = additions.sections.len(),
                options = additions.options.len(),
                "Added missing declared entries"
            );
            self.write_through(&mut document)?;
        }

        self.strip_comments(&mut document);
        self.materialize(&document, state)?;

        tracing::debug!(
            path = %self.config_path.display(),
            created,
            migrated = migration.is_some(),
            "Reconciliation complete"
        );

        Ok(RunOutcome {
            document,
            created,
            migration,
            additions,
        })
    }

    /// Builds a fully populated, comment-annotated document from `state`
    ///
    /// Each declared section is created (or emptied), its comments attached,
    /// then each variable's comments and current value written in declaration
    /// order. Sections not in the schema are left alone.
    pub fn generate_default(
        &mut self,
        document: &mut ConfigDocument,
        state: &mut ProcessState,
    ) -> Result<()> {
        for section in self.schema.sections() {
            document.add_section(&section.name);
            document.clear_section(&section.name);
            self.overlay
                .attach(document, &section.name, &section.name, &self.comments);

            let mut ctx = SectionContext {
                document: &mut *document,
                state: &mut *state,
                comments: &self.comments,
                section,
            };
            if self.hooks.default_section(&mut ctx)?.is_handled() {
                tracing::debug!(section = %section.name, "Default generation handled by hook");
                continue;
            }

            for variable in &section.variables {
                self.overlay
                    .attach(document, &section.name, &variable.name, &self.comments);

                let mut ctx = VariableContext {
                    document: &mut *document,
                    state: &mut *state,
                    comments: &self.comments,
                    section,
                    variable,
                };
                if self.hooks.default_variable(&mut ctx)?.is_handled() {
                    continue;
                }

                let value = current_value(state, variable)?;
                document.set(&section.name, &variable.name, encode(value));
            }
        }
        Ok(())
    }

    /// Reads the file, or generates and persists a default one
    ///
    /// Returns the document and whether it was freshly created. A loaded
    /// document has its comment options stripped; a created one still
    /// carries them.
    pub fn load(&mut self, state: &mut ProcessState) -> Result<(ConfigDocument, bool)> {
        if self.config_path.is_file() {
            let mut document = ConfigDocument::load(&self.config_path)?;
            let stripped = self.overlay.strip(&mut document);
            tracing::debug!(
                path = %self.config_path.display(),
                comments = stripped,
                "Loaded configuration file"
            );
            return Ok((document, false));
        }

        tracing::info!(
            path = %self.config_path.display(),
            "Configuration file not found, writing defaults"
        );
        let mut document = ConfigDocument::new();
        self.generate_default(&mut document, state)?;
        self.write_through(&mut document)?;
        Ok((document, true))
    }

    /// Rewrites the document if its version tag differs from the compiled-in one
    ///
    /// Values present in the document are materialized first, so the
    /// regenerated document keeps every value the user had for a variable
    /// that is still declared. Variables new to the schema get their defaults.
    pub fn migrate_if_version_changed(
        &mut self,
        document: &mut ConfigDocument,
        state: &mut ProcessState,
    ) -> Result<Option<Migration>> {
        let expected = self.expected_version(state)?;
        let key = self.schema.version_key().clone();
        let stored = document.get(&key.section, &key.option).map(str::to_string);

        if stored.as_deref() == Some(expected.as_str()) {
            return Ok(None);
        }

        log_migration!(stored.as_deref().unwrap_or("<none>"), &expected);

        self.materialize(document, state)?;
        self.generate_default(document, state)?;
        document.set(&key.section, &key.option, expected.clone());
        self.write_through(document)?;

        Ok(Some(Migration {
            from: stored,
            to: expected,
        }))
    }

    /// Adds any declared section or variable missing from the document
    ///
    /// Never removes undeclared entries.
    pub fn verify(
        &mut self,
        document: &mut ConfigDocument,
        state: &mut ProcessState,
    ) -> Result<Additions> {
        let mut additions = Additions::default();

        for section in self.schema.sections() {
            if document.add_section(&section.name) {
                additions.sections.push(section.name.clone());
            }

            let mut ctx = SectionContext {
                document: &mut *document,
                state: &mut *state,
                comments: &self.comments,
                section,
            };
            if self.hooks.verify_section(&mut ctx)?.is_handled() {
                tracing::debug!(section = %section.name, "Verification handled by hook");
                continue;
            }

            for variable in &section.variables {
                let mut ctx = VariableContext {
                    document: &mut *document,
                    state: &mut *state,
                    comments: &self.comments,
                    section,
                    variable,
                };
                if self.hooks.verify_variable(&mut ctx)?.is_handled() {
                    continue;
                }

                if !document.has_option(&section.name, &variable.name) {
                    let value = current_value(state, variable)?;
                    document.set(&section.name, &variable.name, encode(value));
                    tracing::debug!(
                        section = %section.name,
                        option = %variable.name,
                        "Added missing option"
                    );
                    additions
                        .options
                        .push((section.name.clone(), variable.name.clone()));
                }
            }
        }

        Ok(additions)
    }

    /// Copies typed values from the document into `state`
    ///
    /// Absent options keep their current value. The version variable is never
    /// read from the document. The derive hook runs last.
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError::Malformed`] if a stored value does not fit its
    /// declared kind.
    pub fn materialize(&mut self, document: &ConfigDocument, state: &mut ProcessState) -> Result<()> {
        // Hooks receive a mutable document; materialization must not change the caller's
        let mut scratch = document.clone();
        let version = self.schema.version_key();

        for section in self.schema.sections() {
            let mut ctx = SectionContext {
                document: &mut scratch,
                state: &mut *state,
                comments: &self.comments,
                section,
            };
            if self.hooks.materialize_section(&mut ctx)?.is_handled() {
                tracing::debug!(section = %section.name, "Materialization handled by hook");
                continue;
            }

            for variable in &section.variables {
                if version.matches(&section.name, &variable.name) {
                    continue;
                }

                let mut ctx = VariableContext {
                    document: &mut scratch,
                    state: &mut *state,
                    comments: &self.comments,
                    section,
                    variable,
                };
                if self.hooks.materialize_variable(&mut ctx)?.is_handled() {
                    continue;
                }

                let fallback = current_value(state, variable)?;
                // A bare key reads as empty text
                let raw = document
                    .get_raw(&section.name, &variable.name)
                    .map(|value| value.unwrap_or(""));
                let value = decode(raw, variable.kind, fallback)
                    .map_err(|e| e.at(&section.name, &variable.name))?;
                state.set(variable.name.as_str(), value);
            }
        }

        self.hooks.derive(document, state)
    }

    /// Removes comment options from the document
    pub fn strip_comments(&self, document: &mut ConfigDocument) -> usize {
        self.overlay.strip(document)
    }

    /// Writes the document to the configuration file
    pub fn persist(&self, document: &ConfigDocument) -> Result<()> {
        document.persist(&self.config_path)?;
        tracing::info!(path = %self.config_path.display(), "Configuration file written");
        Ok(())
    }

    /// Persists `document`, then replaces it with what loading the file reads back
    ///
    /// Option text is trimmed on load, so values written with surrounding
    /// whitespace come back without it on every later run.
    fn write_through(&self, document: &mut ConfigDocument) -> Result<()> {
        self.persist(document)?;
        *document = ConfigDocument::parse(&document.to_ini_string())?;
        Ok(())
    }

    /// The compiled-in version, as it reads back from the file
    pub fn expected_version(&self, state: &ProcessState) -> Result<String> {
        let key = self.schema.version_key();
        state.get(&key.option).map(|v| encode(v).trim().to_string()).ok_or_else(|| {
            AppConfigError::Declaration(format!(
                "No compiled-in value for version variable '{}'",
                key.option
            ))
        })
    }
}

fn current_value<'s>(state: &'s ProcessState, variable: &VariableSpec) -> Result<&'s Value> {
    state.get(&variable.name).ok_or_else(|| {
        AppConfigError::Declaration(format!(
            "No value for declared variable '{}'",
            variable.name
        ))
    })
}
