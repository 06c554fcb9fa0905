//! Domain error types
//!
//! This module defines the error hierarchy for app-config. Missing sections,
//! missing variables, version mismatches and extra undeclared options are not
//! errors: the reconciliation engine heals them. Everything here is surfaced to
//! the caller.

use crate::domain::value::VarKind;
use thiserror::Error;

/// Main app-config error type
#[derive(Debug, Error)]
pub enum AppConfigError {
    /// The declaration source (schema, defaults, comments) could not be located
    #[error("Declaration not found: {0}")]
    NotFound(String),

    /// An on-disk value cannot be coerced to its declared kind
    #[error("Malformed value for [{section}] {option}: expected {kind}, found '{value}'")]
    Malformed {
        section: String,
        option: String,
        kind: VarKind,
        value: String,
    },

    /// The configuration file is not valid INI text
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The declaration parsed but describes an invalid schema
    #[error("Invalid declaration: {0}")]
    Declaration(String),

    /// A consumer hook reported a failure
    #[error("Hook error: {0}")]
    Hook(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// A raw value that could not be parsed as `kind`
///
/// Produced by the coercion layer, which does not know which option the text
/// came from. The engine attaches the location with [`CoercionError::at`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read '{value}' as {kind}")]
pub struct CoercionError {
    /// Kind the value was declared as
    pub kind: VarKind,
    /// The offending text
    pub value: String,
}

impl CoercionError {
    /// Creates a new coercion error
    pub fn new(kind: VarKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Converts into an [`AppConfigError::Malformed`] located at `[section] option`
    pub fn at(self, section: &str, option: &str) -> AppConfigError {
        AppConfigError::Malformed {
            section: section.to_string(),
            option: option.to_string(),
            kind: self.kind,
            value: self.value,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AppConfigError {
    fn from(err: std::io::Error) -> Self {
        AppConfigError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AppConfigError {
    fn from(err: toml::de::Error) -> Self {
        AppConfigError::Declaration(format!("TOML parse error: {err}"))
    }
}
