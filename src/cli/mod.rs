//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for app-config using clap.

pub mod commands;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};

/// app-config - keep an INI configuration file in step with its declaration
#[derive(Parser, Debug)]
#[command(name = "app-config")]
#[command(version, about, long_about = None)]
#[command(author = "app-config Contributors")]
pub struct Cli {
    /// Path to the declaration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "src/app-config.toml",
        env = "APP_CONFIG_DECLARATION"
    )]
    pub declaration: String,

    /// Data directory holding the configuration file (defaults to <working dir>/data)
    #[arg(long, global = true, env = "APP_CONFIG_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "APP_CONFIG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Also write JSON logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Console logging, plus daily-rotated file logging when `--log-dir` is given
    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log_dir {
            Some(dir) => LoggingConfig {
                local_enabled: true,
                local_path: dir.clone(),
                ..LoggingConfig::default()
            },
            None => LoggingConfig::default(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter declaration file
    Init(commands::init::InitArgs),

    /// Validate the declaration file
    Validate(commands::validate::ValidateArgs),

    /// Reconcile the configuration file with the declaration
    Sync(commands::sync::SyncArgs),

    /// Reconcile, then print the resulting configuration
    Show(commands::show::ShowArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from(["app-config", "sync"]);
        assert_eq!(cli.declaration, "src/app-config.toml");
        assert!(cli.data_dir.is_none());
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parse_with_declaration() {
        let cli = Cli::parse_from(["app-config", "-d", "custom.toml", "validate"]);
        assert_eq!(cli.declaration, "custom.toml");
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["app-config", "show", "--data-dir", "/tmp/d", "-l", "debug"]);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/d"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_show_flags() {
        let cli = Cli::parse_from(["app-config", "show", "--json", "--no-comments"]);
        match cli.command {
            Commands::Show(args) => {
                assert!(args.json);
                assert!(args.no_comments);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["app-config", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }

    #[test]
    fn test_logging_config_from_log_dir() {
        let cli = Cli::parse_from(["app-config", "--log-dir", "logs/app", "sync"]);
        let config = cli.logging_config();
        assert!(config.local_enabled);
        assert_eq!(config.local_path, "logs/app");

        let cli = Cli::parse_from(["app-config", "sync"]);
        assert!(!cli.logging_config().local_enabled);
    }
}
