//! Schema types
//!
//! A [`ConfigSchema`] is the single source of truth for which sections and
//! variables must exist in the configuration file and in process state. A
//! [`CommentTable`] holds the annotation lines shown above sections and
//! variables in a generated file. Both are built once and read-only afterward.

use crate::domain::{AppConfigError, Result, VarKind};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const VARIABLE_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$";
const SECTION_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_ .\-]*$";

/// A declared variable: name and kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub kind: VarKind,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, kind: VarKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A declared section and its variables, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub variables: Vec<VariableSpec>,
}

impl SectionSpec {
    /// Looks up a variable of this section by name
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Location of the version tag inside the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionKey {
    /// Reserved system section
    pub section: String,
    /// Option holding the schema version
    pub option: String,
}

impl Default for VersionKey {
    fn default() -> Self {
        Self {
            section: "SYSTEM".to_string(),
            option: "sys_cfg_version".to_string(),
        }
    }
}

impl VersionKey {
    pub fn new(section: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            option: option.into(),
        }
    }

    /// Whether `[section] option` is the version tag
    pub fn matches(&self, section: &str, option: &str) -> bool {
        self.section == section && self.option == option
    }
}

/// Ordered sections of typed variables plus the version tag location
///
/// # Examples
///
/// ```
/// use app_config::config::{ConfigSchema, VersionKey};
/// use app_config::domain::VarKind;
///
/// let schema = ConfigSchema::new(VersionKey::new("SYSTEM", "ver"))
///     .with_section("MAIN", [("flag", VarKind::Bool)])
///     .with_section("SYSTEM", [("ver", VarKind::Str)]);
///
/// assert_eq!(schema.sections().len(), 2);
/// assert!(schema.validate(&['#', ';']).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSchema {
    sections: Vec<SectionSpec>,
    version: VersionKey,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new(VersionKey::default())
    }
}

impl ConfigSchema {
    /// Creates an empty schema
    pub fn new(version: VersionKey) -> Self {
        Self {
            sections: Vec::new(),
            version,
        }
    }

    /// Appends a section. Declaring the same section twice appends to it.
    pub fn with_section<N, V, I>(mut self, name: N, variables: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, VarKind)>,
    {
        let name = name.into();
        let variables = variables
            .into_iter()
            .map(|(var, kind)| VariableSpec::new(var, kind));
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.variables.extend(variables),
            None => self.sections.push(SectionSpec {
                name,
                variables: variables.collect(),
            }),
        }
        self
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Finds a variable anywhere in the schema
    pub fn variable(&self, name: &str) -> Option<(&SectionSpec, &VariableSpec)> {
        self.sections
            .iter()
            .find_map(|s| s.variable(name).map(|v| (s, v)))
    }

    pub fn version_key(&self) -> &VersionKey {
        &self.version
    }

    /// Total number of declared variables
    pub fn variable_count(&self) -> usize {
        self.sections.iter().map(|s| s.variables.len()).sum()
    }

    /// Validates names and the version tag
    ///
    /// Variable names are unique across the whole schema, since process state
    /// is keyed by variable name alone. No declared name may begin with one of
    /// `comment_prefixes`: comment stripping would delete it.
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError::Declaration`] describing the first problem found.
    pub fn validate(&self, comment_prefixes: &[char]) -> Result<()> {
        let variable_re = compile(VARIABLE_NAME_PATTERN)?;
        let section_re = compile(SECTION_NAME_PATTERN)?;

        let mut sections = HashSet::new();
        let mut variables = HashSet::new();

        for section in &self.sections {
            check_prefix(&section.name, comment_prefixes)?;
            if !section_re.is_match(&section.name) {
                return Err(AppConfigError::Declaration(format!(
                    "Invalid section name '{}'",
                    section.name
                )));
            }
            if !sections.insert(section.name.as_str()) {
                return Err(AppConfigError::Declaration(format!(
                    "Section '{}' is declared more than once",
                    section.name
                )));
            }

            for variable in &section.variables {
                check_prefix(&variable.name, comment_prefixes)?;
                if !variable_re.is_match(&variable.name) {
                    return Err(AppConfigError::Declaration(format!(
                        "Invalid variable name '{}' in section '{}'",
                        variable.name, section.name
                    )));
                }
                if !variables.insert(variable.name.as_str()) {
                    return Err(AppConfigError::Declaration(format!(
                        "Variable '{}' is declared more than once",
                        variable.name
                    )));
                }
            }
        }

        let version = self
            .section(&self.version.section)
            .and_then(|s| s.variable(&self.version.option))
            .ok_or_else(|| {
                AppConfigError::Declaration(format!(
                    "Version variable '{}' must be declared in section '{}'",
                    self.version.option, self.version.section
                ))
            })?;
        if version.kind != VarKind::Str {
            return Err(AppConfigError::Declaration(format!(
                "Version variable '{}' must be a string, not {}",
                version.name, version.kind
            )));
        }

        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AppConfigError::Declaration(format!("Bad name pattern: {e}")))
}

fn check_prefix(name: &str, comment_prefixes: &[char]) -> Result<()> {
    match name.chars().next() {
        Some(c) if comment_prefixes.contains(&c) => Err(AppConfigError::Declaration(format!(
            "Name '{name}' starts with comment prefix '{c}' and would be stripped as a comment"
        ))),
        Some(_) => Ok(()),
        None => Err(AppConfigError::Declaration(
            "Section and variable names cannot be empty".to_string(),
        )),
    }
}

/// Annotation lines keyed by section or variable name
///
/// Purely presentational: comments never take part in value comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentTable(IndexMap<String, Vec<String>>);

impl CommentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds lines for `key`, appending to any already present
    pub fn with<K, L, I>(mut self, key: K, lines: I) -> Self
    where
        K: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        self.insert(key, lines);
        self
    }

    pub fn insert<K, L, I>(&mut self, key: K, lines: I)
    where
        K: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        self.0
            .entry(key.into())
            .or_default()
            .extend(lines.into_iter().map(Into::into));
    }

    /// Lines for `key`; empty if there are none
    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    /// Validates the logging configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIXES: &[char] = &['#', ';'];

    fn sample() -> ConfigSchema {
        ConfigSchema::default()
            .with_section(
                "MAIN",
                [("var1", VarKind::Bool), ("var2", VarKind::Int), ("var3", VarKind::Float)],
            )
            .with_section("DATA", [("m1", VarKind::Str), ("m2", VarKind::List)])
            .with_section(
                "SYSTEM",
                [("sys_cfg_version", VarKind::Str), ("sys_var", VarKind::Str)],
            )
    }

    #[test]
    fn test_sample_schema_is_valid() {
        let schema = sample();
        assert!(schema.validate(PREFIXES).is_ok());
        assert_eq!(schema.variable_count(), 7);
        let (section, var) = schema.variable("m2").unwrap();
        assert_eq!(section.name, "DATA");
        assert_eq!(var.kind, VarKind::List);
    }

    #[test]
    fn test_with_section_appends_to_existing() {
        let schema = sample().with_section("MAIN", [("var4", VarKind::Str)]);
        assert_eq!(schema.sections().len(), 3);
        assert_eq!(schema.section("MAIN").unwrap().variables.len(), 4);
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let schema = sample().with_section("DATA", [("var1", VarKind::Bool)]);
        let err = schema.validate(PREFIXES).unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_comment_prefixed_name_rejected() {
        let schema = sample().with_section("MAIN", [("#hidden", VarKind::Str)]);
        let err = schema.validate(PREFIXES).unwrap_err();
        assert!(err.to_string().contains("comment prefix"));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let schema = sample().with_section("MAIN", [("has space", VarKind::Str)]);
        assert!(schema.validate(PREFIXES).is_err());
        let schema = sample().with_section("MAIN", [("a=b", VarKind::Str)]);
        assert!(schema.validate(PREFIXES).is_err());
    }

    #[test]
    fn test_missing_version_variable_rejected() {
        let schema = ConfigSchema::default().with_section("MAIN", [("var1", VarKind::Bool)]);
        let err = schema.validate(PREFIXES).unwrap_err();
        assert!(err.to_string().contains("sys_cfg_version"));
    }

    #[test]
    fn test_version_variable_must_be_string() {
        let schema = ConfigSchema::new(VersionKey::new("SYSTEM", "ver"))
            .with_section("SYSTEM", [("ver", VarKind::Int)]);
        assert!(schema.validate(PREFIXES).is_err());
    }

    #[test]
    fn test_comment_table() {
        let table = CommentTable::new()
            .with("DATA", ["sec comment 1", "sec comment 2"])
            .with("m2", ["m2 comment 1"]);
        assert_eq!(table.get("DATA").len(), 2);
        assert_eq!(table.get("m2"), ["m2 comment 1".to_string()]);
        assert!(table.get("unknown").is_empty());
        assert!(!table.contains("unknown"));
    }

    #[test]
    fn test_logging_config_validation() {
        assert!(LoggingConfig::default().validate().is_ok());
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
