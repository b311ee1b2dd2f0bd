// ABOUTME: Entry point for the moorage CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use moorage::config;
use moorage::deploy::RegistryLogin;
use moorage::error::Result;
use moorage::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli.command, output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: Output) -> Result<()> {
    match command {
        Commands::Init { force } => {
            let path = config::init_settings(&env::current_dir()?, force)?;
            output.success(&format!("Created {}", path.display()));
            Ok(())
        }
        Commands::Plan {
            file,
            transport,
            registry_server,
            registry_username,
            registry_password,
            config,
        } => {
            let registry = RegistryLogin {
                server: registry_server,
                username: registry_username,
                password: registry_password,
            };
            commands::plan(&file, transport, registry, config.as_deref(), output).await
        }
        Commands::Validate { file } => commands::validate(&file, output),
    }
}
