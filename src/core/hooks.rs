//! Extension points for the reconciliation engine
//!
//! Each of the three passes (default generation, verification,
//! materialization) offers a section hook and a variable hook. A hook that
//! returns [`Handling::Handled`] for a section makes the engine skip its
//! normal work for that whole section; for a variable, only that variable is
//! skipped. Two more hooks run once: [`ReconcileHooks::init`] before the first
//! run, and [`ReconcileHooks::derive`] after every materialization.
//!
//! Implement [`ReconcileHooks`] directly, or assemble a [`HookSet`] from
//! closures:
//!
//! ```
//! use app_config::core::hooks::{Handling, HookSet};
//! use app_config::domain::Value;
//!
//! let hooks = HookSet::new()
//!     .on_materialize_variable(|ctx| {
//!         if ctx.variable.name == "seed" {
//!             ctx.state.set("seed", Value::Float(0.023));
//!             return Ok(Handling::Handled);
//!         }
//!         Ok(Handling::Default)
//!     })
//!     .on_derive(|_doc, state| {
//!         let count = state.get_int("worker_count").unwrap_or(0);
//!         let names: Vec<String> = (1..=count).map(|i| format!("worker-{i}")).collect();
//!         state.set("workers", names);
//!         Ok(())
//!     });
//! ```

use crate::config::{CommentTable, SectionSpec, VariableSpec};
use crate::core::document::ConfigDocument;
use crate::core::state::ProcessState;
use crate::domain::Result;

/// What a hook did with the item it was offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handling {
    /// Run the engine's normal logic
    #[default]
    Default,
    /// The hook took care of it; skip the normal logic
    Handled,
}

impl Handling {
    pub fn is_handled(self) -> bool {
        self == Handling::Handled
    }
}

impl From<bool> for Handling {
    fn from(handled: bool) -> Self {
        if handled {
            Handling::Handled
        } else {
            Handling::Default
        }
    }
}

/// Everything a section hook may read or change
pub struct SectionContext<'a> {
    pub document: &'a mut ConfigDocument,
    pub state: &'a mut ProcessState,
    pub comments: &'a CommentTable,
    pub section: &'a SectionSpec,
}

/// Everything a variable hook may read or change
pub struct VariableContext<'a> {
    pub document: &'a mut ConfigDocument,
    pub state: &'a mut ProcessState,
    pub comments: &'a CommentTable,
    pub section: &'a SectionSpec,
    pub variable: &'a VariableSpec,
}

/// Per-section and per-variable overrides of the engine's behavior
///
/// Every method defaults to doing nothing.
pub trait ReconcileHooks {
    /// Runs once before the first reconciliation
    fn init(&mut self, _state: &mut ProcessState) -> Result<()> {
        Ok(())
    }

    fn default_section(&mut self, _ctx: &mut SectionContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    fn default_variable(&mut self, _ctx: &mut VariableContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    fn verify_section(&mut self, _ctx: &mut SectionContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    fn verify_variable(&mut self, _ctx: &mut VariableContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    fn materialize_section(&mut self, _ctx: &mut SectionContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    fn materialize_variable(&mut self, _ctx: &mut VariableContext<'_>) -> Result<Handling> {
        Ok(Handling::Default)
    }

    /// Runs after all declared variables are materialized, for values computed
    /// from other values
    fn derive(&mut self, _document: &ConfigDocument, _state: &mut ProcessState) -> Result<()> {
        Ok(())
    }
}

/// The engine's stock behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl ReconcileHooks for NoHooks {}

type InitFn = dyn FnMut(&mut ProcessState) -> Result<()>;
type SectionFn = dyn FnMut(&mut SectionContext<'_>) -> Result<Handling>;
type VariableFn = dyn FnMut(&mut VariableContext<'_>) -> Result<Handling>;
type DeriveFn = dyn FnMut(&ConfigDocument, &mut ProcessState) -> Result<()>;

/// Hooks built from optional closures, one per hook point
#[derive(Default)]
pub struct HookSet {
    init: Option<Box<InitFn>>,
    default_section: Option<Box<SectionFn>>,
    default_variable: Option<Box<VariableFn>>,
    verify_section: Option<Box<SectionFn>>,
    verify_variable: Option<Box<VariableFn>>,
    materialize_section: Option<Box<SectionFn>>,
    materialize_variable: Option<Box<VariableFn>>,
    derive: Option<Box<DeriveFn>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ProcessState) -> Result<()> + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_default_section<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SectionContext<'_>) -> Result<Handling> + 'static,
    {
        self.default_section = Some(Box::new(f));
        self
    }

    pub fn on_default_variable<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut VariableContext<'_>) -> Result<Handling> + 'static,
    {
        self.default_variable = Some(Box::new(f));
        self
    }

    pub fn on_verify_section<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SectionContext<'_>) -> Result<Handling> + 'static,
    {
        self.verify_section = Some(Box::new(f));
        self
    }

    pub fn on_verify_variable<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut VariableContext<'_>) -> Result<Handling> + 'static,
    {
        self.verify_variable = Some(Box::new(f));
        self
    }

    pub fn on_materialize_section<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut SectionContext<'_>) -> Result<Handling> + 'static,
    {
        self.materialize_section = Some(Box::new(f));
        self
    }

    pub fn on_materialize_variable<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut VariableContext<'_>) -> Result<Handling> + 'static,
    {
        self.materialize_variable = Some(Box::new(f));
        self
    }

    pub fn on_derive<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ConfigDocument, &mut ProcessState) -> Result<()> + 'static,
    {
        self.derive = Some(Box::new(f));
        self
    }
}

fn call_section(hook: &mut Option<Box<SectionFn>>, ctx: &mut SectionContext<'_>) -> Result<Handling> {
    match hook {
        Some(f) => f(ctx),
        None => Ok(Handling::Default),
    }
}

fn call_variable(
    hook: &mut Option<Box<VariableFn>>,
    ctx: &mut VariableContext<'_>,
) -> Result<Handling> {
    match hook {
        Some(f) => f(ctx),
        None => Ok(Handling::Default),
    }
}

impl ReconcileHooks for HookSet {
    fn init(&mut self, state: &mut ProcessState) -> Result<()> {
        match &mut self.init {
            Some(f) => f(state),
            None => Ok(()),
        }
    }

    fn default_section(&mut self, ctx: &mut SectionContext<'_>) -> Result<Handling> {
        call_section(&mut self.default_section, ctx)
    }

    fn default_variable(&mut self, ctx: &mut VariableContext<'_>) -> Result<Handling> {
        call_variable(&mut self.default_variable, ctx)
    }

    fn verify_section(&mut self, ctx: &mut SectionContext<'_>) -> Result<Handling> {
        call_section(&mut self.verify_section, ctx)
    }

    fn verify_variable(&mut self, ctx: &mut VariableContext<'_>) -> Result<Handling> {
        call_variable(&mut self.verify_variable, ctx)
    }

    fn materialize_section(&mut self, ctx: &mut SectionContext<'_>) -> Result<Handling> {
        call_section(&mut self.materialize_section, ctx)
    }

    fn materialize_variable(&mut self, ctx: &mut VariableContext<'_>) -> Result<Handling> {
        call_variable(&mut self.materialize_variable, ctx)
    }

    fn derive(&mut self, document: &ConfigDocument, state: &mut ProcessState) -> Result<()> {
        match &mut self.derive {
            Some(f) => f(document, state),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VarKind;

    fn section() -> SectionSpec {
        SectionSpec {
            name: "DATA".to_string(),
            variables: vec![VariableSpec::new("seed", VarKind::Float)],
        }
    }

    #[test]
    fn test_handling_from_bool() {
        assert!(Handling::from(true).is_handled());
        assert!(!Handling::from(false).is_handled());
        assert_eq!(Handling::default(), Handling::Default);
    }

    #[test]
    fn test_no_hooks_never_handle() {
        let mut hooks = NoHooks;
        let spec = section();
        let mut doc = ConfigDocument::new();
        let mut state = ProcessState::new();
        let comments = CommentTable::new();
        let mut ctx = SectionContext {
            document: &mut doc,
            state: &mut state,
            comments: &comments,
            section: &spec,
        };
        assert_eq!(hooks.default_section(&mut ctx).unwrap(), Handling::Default);
        assert_eq!(hooks.verify_section(&mut ctx).unwrap(), Handling::Default);
        assert_eq!(hooks.materialize_section(&mut ctx).unwrap(), Handling::Default);
    }

    #[test]
    fn test_hook_set_dispatches_to_closure() {
        let mut hooks = HookSet::new().on_materialize_variable(|ctx| {
            ctx.state.set("seen", ctx.variable.name.clone());
            Ok(Handling::Handled)
        });
        let spec = section();
        let mut doc = ConfigDocument::new();
        let mut state = ProcessState::new();
        let comments = CommentTable::new();
        let mut ctx = VariableContext {
            document: &mut doc,
            state: &mut state,
            comments: &comments,
            section: &spec,
            variable: &spec.variables[0],
        };
        assert!(hooks.materialize_variable(&mut ctx).unwrap().is_handled());
        // unset hook points fall back to the default
        assert!(!hooks.verify_variable(&mut ctx).unwrap().is_handled());
        assert_eq!(state.get_str("seen"), Some("seed"));
    }

    #[test]
    fn test_hook_set_init_and_derive() {
        let mut hooks = HookSet::new()
            .on_init(|state| {
                state.set("init_var", "loaded from ext");
                Ok(())
            })
            .on_derive(|_, state| {
                state.set("derived", true);
                Ok(())
            });
        let mut state = ProcessState::new();
        hooks.init(&mut state).unwrap();
        hooks.derive(&ConfigDocument::new(), &mut state).unwrap();
        assert_eq!(state.get_str("init_var"), Some("loaded from ext"));
        assert_eq!(state.get_bool("derived"), Some(true));
    }
}
