//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but for `Result<T, AppConfigError>`. The
//! context is prefixed to the error message and the variant is kept, so
//! callers can still match on the kind of failure.
//!
//! # Examples
//!
//! ```rust
//! use app_config::domain::Result;
//! use app_config::domain::context::ResultExt;
//!
//! fn read_declaration(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read declaration {}", path))
//! }
//! ```

use crate::domain::errors::AppConfigError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Adds `.context()` and `.with_context()` to results
pub trait ResultExt<T> {
    /// Prefixes `context` to the error message
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    /// Like [`context`](ResultExt::context), evaluated only on error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppConfigError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.map_err(|e| prefix(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| prefix(e.into(), f()))
    }
}

fn prefix(error: AppConfigError, context: impl Display) -> AppConfigError {
    match error {
        AppConfigError::NotFound(msg) => AppConfigError::NotFound(format!("{context}: {msg}")),
        AppConfigError::Declaration(msg) => {
            AppConfigError::Declaration(format!("{context}: {msg}"))
        }
        AppConfigError::Hook(msg) => AppConfigError::Hook(format!("{context}: {msg}")),
        AppConfigError::Io(msg) => AppConfigError::Io(format!("{context}: {msg}")),
        AppConfigError::Syntax { line, message } => AppConfigError::Syntax {
            line,
            message: format!("{context}: {message}"),
        },
        // Already names its section and option
        malformed @ AppConfigError::Malformed { .. } => malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VarKind;
    use std::cell::Cell;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(AppConfigError::Declaration("duplicate section".to_string()));
        let err = result.context("Loading app-config.toml").unwrap_err();
        assert!(matches!(err, AppConfigError::Declaration(_)));
        let msg = err.to_string();
        assert!(msg.contains("Loading app-config.toml"));
        assert!(msg.contains("duplicate section"));
    }

    #[test]
    fn test_context_from_io_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("Writing data/config.cfg").unwrap_err();
        assert!(matches!(err, AppConfigError::Io(ref m) if m.starts_with("Writing data/config.cfg")));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let called = Cell::new(false);
        let result: Result<i32> = Ok(42);
        let value = result
            .with_context(|| {
                called.set(true);
                "never built"
            })
            .unwrap();
        assert_eq!(value, 42);
        assert!(!called.get());
    }

    #[test]
    fn test_syntax_line_is_kept() {
        let result: Result<()> = Err(AppConfigError::Syntax {
            line: 7,
            message: "unterminated section header".to_string(),
        });
        match result.context("config.cfg").unwrap_err() {
            AppConfigError::Syntax { line, message } => {
                assert_eq!(line, 7);
                assert_eq!(message, "config.cfg: unterminated section header");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_unchanged() {
        let result: Result<()> = Err(AppConfigError::Malformed {
            section: "MAIN".to_string(),
            option: "count".to_string(),
            kind: VarKind::Int,
            value: "x".to_string(),
        });
        let before = "Malformed value for [MAIN] count";
        assert!(result.context("ignored").unwrap_err().to_string().starts_with(before));
    }
}
