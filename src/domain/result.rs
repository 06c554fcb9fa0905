//! Result type alias for app-config

use super::errors::AppConfigError;

/// Result type alias for app-config operations
///
/// # Examples
///
/// ```
/// use app_config::domain::result::Result;
/// use app_config::domain::errors::AppConfigError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AppConfigError::Declaration("duplicate section".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(AppConfigError::Io("disk full".to_string()));
        assert!(result.is_err());
    }
}
