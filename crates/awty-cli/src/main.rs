//! Awty CLI - plan trips against the Awty trip API from the terminal.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::trips::run_trips;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// Log targets enabled at `info` unless `RUST_LOG` says otherwise
const LOG_DIRECTIVES: [&str; 2] = ["awty_cli=info", "awty_core=info"];

fn with_default_directives(mut filter: EnvFilter) -> Result<EnvFilter, CliError> {
    for directive in LOG_DIRECTIVES {
        let directive = directive
            .parse()
            .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(with_default_directives(EnvFilter::from_default_env())?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Trips { command } => run_trips(command, profile).await,
        Commands::Auth { command } => run_auth(command, profile).await,
        Commands::Config { command } => run_config(command, profile),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}
