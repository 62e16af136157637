//! TaskSync CLI - Command-line interface for TaskSync
//!
//! Provides commands for:
//! - Listing the remote todo list with filters
//! - Adding, toggling, renaming and deleting items
//! - Bulk clear-completed and toggle-all
//! - Viewing and validating configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    add::AddCommand,
    bulk::{ClearCompletedCommand, ToggleAllCommand},
    completions::CompletionsCommand,
    config::ConfigCommand,
    delete::DeleteCommand,
    list::ListCommand,
    rename::RenameCommand,
    toggle::ToggleCommand,
    Context,
};
use output::OutputFormat;
use tasksync_core::config::Config;

#[derive(Debug, Parser)]
#[command(name = "tasksync", version, about = "Keep a remote todo list in sync")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the list
    List(ListCommand),
    /// Add an item
    Add(AddCommand),
    /// Mark an item completed or active
    Toggle(ToggleCommand),
    /// Rename an item (an empty title deletes it)
    Rename(RenameCommand),
    /// Delete an item
    Delete(DeleteCommand),
    /// Delete every completed item
    ClearCompleted(ClearCompletedCommand),
    /// Complete every item, or reactivate all if all are completed
    ToggleAll(ToggleAllCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Setup tracing: RUST_LOG wins, then -v, then the configured level
    let filter = match cli.verbose {
        0 => Config::load_or_default(&config_path).logging.level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = Context {
        format,
        config_path,
    };

    match cli.command {
        Commands::List(cmd) => cmd.execute(&ctx).await,
        Commands::Add(cmd) => cmd.execute(&ctx).await,
        Commands::Toggle(cmd) => cmd.execute(&ctx).await,
        Commands::Rename(cmd) => cmd.execute(&ctx).await,
        Commands::Delete(cmd) => cmd.execute(&ctx).await,
        Commands::ClearCompleted(cmd) => cmd.execute(&ctx).await,
        Commands::ToggleAll(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}
