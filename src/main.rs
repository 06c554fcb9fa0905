// app-config - typed INI configuration reconciliation
// Copyright (c) 2024 cswaim and app-config Contributors
// Licensed under the Apache License, Version 2.0

use app_config::cli::commands::{exit_code, EXIT_FATAL};
use app_config::cli::{Cli, Commands};
use app_config::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    let guard = match init_logging(log_level, &cli.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code(&e));
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "app-config starting");

    let code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let data_dir = cli.data_dir.as_deref();
    match &cli.command {
        Commands::Init(args) => args.execute(&cli.declaration),
        Commands::Validate(args) => args.execute(&cli.declaration, data_dir),
        Commands::Sync(args) => args.execute(&cli.declaration, data_dir),
        Commands::Show(args) => args.execute(&cli.declaration, data_dir),
    }
}
