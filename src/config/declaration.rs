//! Declaration file model
//!
//! A declaration is the TOML file that names every section and variable,
//! gives each variable a kind and a compiled-in default, and carries the
//! comment lines written into a generated configuration file.
//!
//! ```toml
//! file_name = "config.cfg"
//!
//! [version]
//! section = "SYSTEM"
//! option = "sys_cfg_version"
//!
//! [[sections]]
//! name = "MAIN"
//! comments = ["main settings"]
//!
//! [[sections.variables]]
//! name = "var1"
//! kind = "b"
//! default = true
//! comments = ["this is a comment for var1"]
//!
//! [[sections]]
//! name = "SYSTEM"
//!
//! [[sections.variables]]
//! name = "sys_cfg_version"
//! kind = "s"
//! default = "0.1"
//! ```

use crate::config::paths::StorageRoots;
use crate::config::schema::{CommentTable, ConfigSchema, SectionSpec, VariableSpec, VersionKey};
use crate::core::coercion::{encode, LIST_DELIMITER};
use crate::core::comments::{split_lines, CommentOverlay, DEFAULT_COMMENT_PREFIXES};
use crate::core::engine::ReconcileEngine;
use crate::core::state::ProcessState;
use crate::domain::{AppConfigError, Result, Value, VarKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Parsed declaration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Configuration file name inside the data directory
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Option-name prefixes treated as comments; the first one names new comment lines
    #[serde(default = "default_comment_prefixes")]
    pub comment_prefixes: Vec<String>,

    /// Where the version tag is stored
    #[serde(default)]
    pub version: VersionKey,

    #[serde(default)]
    pub sections: Vec<SectionDeclaration>,
}

/// One `[[sections]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDeclaration {
    pub name: String,

    #[serde(default)]
    pub comments: Vec<String>,

    #[serde(default)]
    pub variables: Vec<VariableDeclaration>,
}

/// One `[[sections.variables]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub kind: VarKind,
    pub default: toml::Value,

    #[serde(default)]
    pub comments: Vec<String>,
}

fn default_file_name() -> String {
    "config.cfg".to_string()
}

fn default_comment_prefixes() -> Vec<String> {
    DEFAULT_COMMENT_PREFIXES.iter().map(char::to_string).collect()
}

impl Declaration {
    /// Parses and validates declaration text
    pub fn parse(text: &str) -> Result<Self> {
        let declaration: Declaration = toml::from_str(text)?;
        declaration.validate()?;
        Ok(declaration)
    }

    /// Checks names, prefixes, the file name and every default
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(AppConfigError::Declaration(
                "file_name cannot be empty".to_string(),
            ));
        }
        if self.file_name.contains(['/', '\\']) {
            return Err(AppConfigError::Declaration(format!(
                "file_name '{}' must be a plain file name; use the data directory to relocate it",
                self.file_name
            )));
        }

        let prefixes = self.prefixes()?;
        self.schema().validate(&prefixes)?;
        self.defaults()?;
        self.sections.iter().for_each(warn_repeated_comments);
        Ok(())
    }

    /// Comment prefixes as characters
    pub fn prefixes(&self) -> Result<Vec<char>> {
        if self.comment_prefixes.is_empty() {
            return Err(AppConfigError::Declaration(
                "comment_prefixes needs at least one entry".to_string(),
            ));
        }
        self.comment_prefixes
            .iter()
            .map(|p| {
                let mut chars = p.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace() => Ok(c),
                    _ => Err(AppConfigError::Declaration(format!(
                        "Comment prefix '{p}' must be a single punctuation character"
                    ))),
                }
            })
            .collect()
    }

    /// Comment overlay using the first prefix as the marker
    pub fn overlay(&self) -> Result<CommentOverlay> {
        let prefixes = self.prefixes()?;
        let marker = prefixes[0];
        Ok(CommentOverlay::new(marker, prefixes))
    }

    pub fn schema(&self) -> ConfigSchema {
        let mut schema = ConfigSchema::new(self.version.clone());
        for section in &self.sections {
            schema = schema.with_section(
                section.name.as_str(),
                section.variables.iter().map(|v| (v.name.as_str(), v.kind)),
            );
        }
        schema
    }

    /// Section comments keyed by section name, variable comments by variable name
    pub fn comments(&self) -> CommentTable {
        let mut table = CommentTable::new();
        for section in &self.sections {
            if !section.comments.is_empty() {
                table.insert(section.name.as_str(), section.comments.iter().map(String::as_str));
            }
            for variable in &section.variables {
                if !variable.comments.is_empty() {
                    table.insert(
                        variable.name.as_str(),
                        variable.comments.iter().map(String::as_str),
                    );
                }
            }
        }
        table
    }

    /// Compiled-in values, ready to be reconciled
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError::Declaration`] if a default does not fit its kind.
    pub fn defaults(&self) -> Result<ProcessState> {
        let mut state = ProcessState::new();
        for section in &self.sections {
            for variable in &section.variables {
                let value = default_value(variable.kind, &variable.default).map_err(|reason| {
                    AppConfigError::Declaration(format!(
                        "Default for '{}' in section '{}': {}",
                        variable.name, section.name, reason
                    ))
                })?;
                state.set(variable.name.as_str(), value);
            }
        }
        Ok(state)
    }

    /// Engine writing `file_name` inside the data directory of `roots`
    pub fn engine(&self, roots: &StorageRoots) -> Result<ReconcileEngine> {
        Ok(ReconcileEngine::new(
            self.schema(),
            self.comments(),
            roots.config_path(&self.file_name),
        )
        .with_overlay(self.overlay()?))
    }
}

impl From<&ConfigSchema> for Declaration {
    /// Skeleton declaration for a schema; every default is the kind's zero value
    fn from(schema: &ConfigSchema) -> Self {
        let sections = schema
            .sections()
            .iter()
            .map(|section: &SectionSpec| SectionDeclaration {
                name: section.name.clone(),
                comments: Vec::new(),
                variables: section
                    .variables
                    .iter()
                    .map(|v: &VariableSpec| VariableDeclaration {
                        name: v.name.clone(),
                        kind: v.kind,
                        default: zero_value(v.kind),
                        comments: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            file_name: default_file_name(),
            comment_prefixes: default_comment_prefixes(),
            version: schema.version_key().clone(),
            sections,
        }
    }
}

/// Comment options are keyed by their text, so a repeat within a section is written once
fn warn_repeated_comments(section: &SectionDeclaration) {
    let mut seen = HashSet::new();
    let comments = section
        .comments
        .iter()
        .chain(section.variables.iter().flat_map(|v| v.comments.iter()));
    for line in comments.flat_map(|c| split_lines(c)) {
        if !seen.insert(line) {
            tracing::warn!(
                section = %section.name,
                comment = %line,
                "Repeated comment line is written only once in its section"
            );
        }
    }
}

fn zero_value(kind: VarKind) -> toml::Value {
    match kind {
        VarKind::Bool => toml::Value::Boolean(false),
        VarKind::Int => toml::Value::Integer(0),
        VarKind::Float => toml::Value::Float(0.0),
        VarKind::Str => toml::Value::String(String::new()),
        VarKind::List => toml::Value::Array(Vec::new()),
    }
}

fn default_value(kind: VarKind, raw: &toml::Value) -> std::result::Result<Value, String> {
    match (kind, raw) {
        (VarKind::Bool, toml::Value::Boolean(b)) => Ok(Value::Bool(*b)),
        (VarKind::Int, toml::Value::Integer(i)) => Ok(Value::Int(*i)),
        (VarKind::Float, toml::Value::Float(x)) => Ok(Value::Float(*x)),
        (VarKind::Float, toml::Value::Integer(i)) => Ok(Value::Float(*i as f64)),
        (VarKind::Str, toml::Value::String(s)) => Ok(Value::Str(s.clone())),
        (VarKind::List, toml::Value::Array(items)) => items
            .iter()
            .map(list_item)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::List),
        (kind, other) => Err(format!("expected {kind}, found {}", other.type_str())),
    }
}

fn list_item(raw: &toml::Value) -> std::result::Result<String, String> {
    let item = match raw {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(x) => encode(&Value::Float(*x)),
        toml::Value::Boolean(b) => encode(&Value::Bool(*b)),
        other => return Err(format!("list items must be scalars, found {}", other.type_str())),
    };
    if item.contains(LIST_DELIMITER) {
        return Err(format!(
            "list item '{item}' contains the list delimiter '{LIST_DELIMITER}'"
        ));
    }
    Ok(item)
}
