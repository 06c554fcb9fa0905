//! Declaration loader with TOML parsing and environment variable substitution

use super::declaration::Declaration;
use crate::domain::context::ResultExt;
use crate::domain::errors::AppConfigError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads a declaration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into a [`Declaration`]
/// 4. Validates names, prefixes and defaults
///
/// # Errors
///
/// - [`AppConfigError::NotFound`] if the file does not exist
/// - [`AppConfigError::Io`] if it cannot be read
/// - [`AppConfigError::Declaration`] if parsing, substitution or validation fails
///
/// # Examples
///
/// ```no_run
/// use app_config::config::loader::load_declaration;
///
/// let declaration = load_declaration("src/app-config.toml").expect("Failed to load declaration");
/// ```
pub fn load_declaration(path: impl AsRef<Path>) -> Result<Declaration> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(AppConfigError::NotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration {}", path.display()))?;

    let contents = substitute_env_vars(&contents)?;

    let declaration = Declaration::parse(&contents)
        .with_context(|| path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        sections = declaration.sections.len(),
        "Loaded declaration"
    );
    Ok(declaration)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AppConfigError::Declaration(format!("Bad substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AppConfigError::Declaration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[[sections]]
name = "SYSTEM"

[[sections.variables]]
name = "sys_cfg_version"
kind = "s"
default = "${APP_CONFIG_TEST_VERSION}"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("APP_CONFIG_TEST_SUBST", "value-1");
        let out = substitute_env_vars("a = \"${APP_CONFIG_TEST_SUBST}\"\n# ${NOT_SET_IN_COMMENT}\n")
            .unwrap();
        assert_eq!(out, "a = \"value-1\"\n# ${NOT_SET_IN_COMMENT}\n");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let err = substitute_env_vars("a = \"${APP_CONFIG_TEST_SURELY_UNSET}\"").unwrap_err();
        assert!(err.to_string().contains("APP_CONFIG_TEST_SURELY_UNSET"));
    }

    #[test]
    fn test_load_declaration_missing_file() {
        let err = load_declaration("/nonexistent/app-config.toml").unwrap_err();
        assert!(matches!(err, AppConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_declaration_valid() {
        std::env::set_var("APP_CONFIG_TEST_VERSION", "2.0");
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let declaration = load_declaration(temp_file.path()).unwrap();
        let state = declaration.defaults().unwrap();
        assert_eq!(state.get_str("sys_cfg_version"), Some("2.0"));
    }

    #[test]
    fn test_load_declaration_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[[sections]\nname = ").unwrap();

        let err = load_declaration(temp_file.path()).unwrap_err();
        assert!(matches!(err, AppConfigError::Declaration(_)));
    }
}
