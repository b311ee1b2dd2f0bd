// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{ArgAction, Parser, Subcommand};
use moorage::config::DEFAULT_COMPOSE_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moorage")]
#[command(about = "Turn compose files into container app deployments")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (for CI)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new moorage.yml settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Resolve every service and show the deployment parameters
    Plan {
        /// Compose file to read
        #[arg(short, long, default_value = DEFAULT_COMPOSE_FILE)]
        file: PathBuf,

        /// Ingress transport override, as SERVICE=TRANSPORT (auto, http, http2, tcp)
        #[arg(long, value_name = "SERVICE=TRANSPORT", num_args = 1.., action = ArgAction::Append)]
        transport: Vec<String>,

        /// Container registry server the images are pulled from
        #[arg(long)]
        registry_server: Option<String>,

        /// Registry username
        #[arg(long)]
        registry_username: Option<String>,

        /// Registry password
        #[arg(long, env = "MOORAGE_REGISTRY_PASSWORD", hide_env_values = true)]
        registry_password: Option<String>,

        /// Settings file (default: discovered moorage.yml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that a compose file parses and validates
    Validate {
        /// Compose file to read
        #[arg(short, long, default_value = DEFAULT_COMPOSE_FILE)]
        file: PathBuf,
    },
}
