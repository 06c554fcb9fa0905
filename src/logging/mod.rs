//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output on stderr
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use app_config::logging::init_logging;
//! use app_config::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a version-triggered rewrite of the configuration file
///
/// # Example
///
/// ```no_run
/// use app_config::log_migration;
///
/// log_migration!("0.1", "0.2");
/// ```
#[macro_export]
macro_rules! log_migration {
    ($from:expr, $to:expr) => {
        tracing::info!(
            from = %$from,
            to = %$to,
            "Configuration version changed, regenerating file"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use app_config::log_error_with_context;
/// use app_config::domain::AppConfigError;
///
/// let error = AppConfigError::NotFound("src/app-config.toml".to_string());
/// log_error_with_context!(&error, "Failed to load declaration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::AppConfigError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_migration!("0.1", String::from("0.2"));
        let error = AppConfigError::Hook("derive failed".to_string());
        log_error_with_context!(&error, "sync");
    }
}
