//! Ordered INI document
//!
//! [`ConfigDocument`] is the in-memory form of the configuration file: an
//! ordered list of sections, each an ordered list of options. An option may be
//! valueless (a bare key on its own line); synthetic comment options are
//! stored that way.
//!
//! Lines beginning with `#` or `;` are read as ordinary valueless options, not
//! skipped. Removing them is the job of the comment overlay, which keeps a
//! file-then-strip read identical to a generate-then-strip build.
//!
//! # Format
//!
//! ```text
//! [MAIN]
//! # this is a comment for var1
//! var1 = True
//! var2 = 2
//!
//! [SYSTEM]
//! sys_cfg_version = 0.1
//! ```

use crate::domain::context::ResultExt;
use crate::domain::{AppConfigError, Result};
use indexmap::IndexMap;
use std::fmt;
use std::fs;
use std::path::Path;

type Options = IndexMap<String, Option<String>>;

const COMMENT_LINE_PREFIXES: [char; 2] = ['#', ';'];

/// An ordered, section-scoped option store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: IndexMap<String, Options>,
}

impl ConfigDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError::Syntax`] for an option before the first section
    /// header, an unterminated or empty header, an empty key, or a continuation
    /// line following a valueless option.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }

            // Indented text continues the previous value
            if line.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (&current, &last_key) {
                    let slot = doc
                        .sections
                        .get_mut(section)
                        .and_then(|opts| opts.get_mut(key));
                    match slot {
                        Some(Some(value)) => {
                            value.push('\n');
                            value.push_str(trimmed);
                            continue;
                        }
                        _ => {
                            return Err(AppConfigError::Syntax {
                                line: line_no,
                                message: format!("continuation line after valueless option '{key}'"),
                            });
                        }
                    }
                }
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    return Err(AppConfigError::Syntax {
                        line: line_no,
                        message: format!("unterminated section header '{trimmed}'"),
                    });
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppConfigError::Syntax {
                        line: line_no,
                        message: "empty section name".to_string(),
                    });
                }
                doc.add_section(name);
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(AppConfigError::Syntax {
                    line: line_no,
                    message: format!("option '{trimmed}' appears before any section header"),
                });
            };

            // Comment lines are whole keys, never split at a delimiter
            let (key, value) = match trimmed.find(['=', ':']) {
                _ if trimmed.starts_with(COMMENT_LINE_PREFIXES) => (trimmed, None),
                Some(pos) => (
                    trimmed[..pos].trim(),
                    Some(trimmed[pos + 1..].trim().to_string()),
                ),
                None => (trimmed, None),
            };
            if key.is_empty() {
                return Err(AppConfigError::Syntax {
                    line: line_no,
                    message: format!("missing option name in '{trimmed}'"),
                });
            }

            if let Some(opts) = doc.sections.get_mut(section) {
                opts.insert(key.to_string(), value);
            }
            last_key = Some(key.to_string());
        }

        Ok(doc)
    }

    /// Reads and parses the file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AppConfigError::Io(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&contents).with_context(|| path.display().to_string())
    }

    /// Writes the document to `path`, creating the parent directory if needed
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppConfigError::Io(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(path, self.to_ini_string()).map_err(|e| {
            AppConfigError::Io(format!(
                "Failed to write configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Serializes to INI text
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }

    /// Section names in document order
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Adds an empty section at the end. Returns `false` if it already existed.
    pub fn add_section(&mut self, section: &str) -> bool {
        if self.has_section(section) {
            return false;
        }
        self.sections.insert(section.to_string(), Options::new());
        true
    }

    /// Removes every option of `section`, keeping the section in place
    pub fn clear_section(&mut self, section: &str) -> bool {
        match self.sections.get_mut(section) {
            Some(opts) => {
                opts.clear();
                true
            }
            None => false,
        }
    }

    pub fn remove_section(&mut self, section: &str) -> bool {
        self.sections.shift_remove(section).is_some()
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|opts| opts.contains_key(option))
    }

    /// Value of an option. `None` if the option is absent or valueless.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.get_raw(section, option).flatten()
    }

    /// Raw option slot: `None` if absent, `Some(None)` if valueless
    pub fn get_raw(&self, section: &str, option: &str) -> Option<Option<&str>> {
        self.sections
            .get(section)?
            .get(option)
            .map(|value| value.as_deref())
    }

    /// Sets an option, creating the section if it does not exist.
    /// An existing option keeps its position.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        self.slot(section)
            .insert(option.to_string(), Some(value.into()));
    }

    /// Sets a bare key with no value
    pub fn set_valueless(&mut self, section: &str, option: &str) {
        self.slot(section).insert(option.to_string(), None);
    }

    pub fn remove_option(&mut self, section: &str, option: &str) -> bool {
        self.sections
            .get_mut(section)
            .is_some_and(|opts| opts.shift_remove(option).is_some())
    }

    /// Options of `section` in order; empty if the section does not exist
    pub fn options<'a>(
        &'a self,
        section: &str,
    ) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|opts| opts.iter().map(|(k, v)| (k.as_str(), v.as_deref())))
    }

    /// Keeps only the options for which `keep(section, option)` is true.
    /// Returns how many were removed.
    pub fn retain_options<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut removed = 0;
        for (section, opts) in self.sections.iter_mut() {
            let before = opts.len();
            opts.retain(|option, _| keep(section, option));
            removed += before - opts.len();
        }
        removed
    }

    fn slot(&mut self, section: &str) -> &mut Options {
        self.sections.entry(section.to_string()).or_default()
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, opts) in &self.sections {
            writeln!(f, "[{section}]")?;
            for (option, value) in opts {
                match value {
                    Some(value) => writeln!(f, "{option} = {}", value.replace('\n', "\n\t"))?,
                    None => writeln!(f, "{option}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
