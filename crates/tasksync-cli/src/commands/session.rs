//! Shared plumbing for data commands
//!
//! 1. Load the configuration (defaults when the file is missing)
//! 2. Refuse to continue without an owner id
//! 3. Build the REST store and the engine, then load the list
//! 4. After the operation, print the list and any notification

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use tasksync_core::config::Config;
use tasksync_core::domain::Filter;
use tasksync_core::ports::IRemoteStore;
use tasksync_http::client::RestClient;
use tasksync_http::store::HttpRemoteStore;
use tasksync_sync::engine::SyncEngine;
use tasksync_sync::SyncError;

use super::Context;
use crate::output::{items_left_line, list_json, list_lines};

/// Loads the configuration at `path`, or defaults if there is no file
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(config_path = %path.display(), "No configuration file, using defaults");
        return Ok(Config::default());
    }
    Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Builds a loaded engine
///
/// Returns `None` when the command cannot proceed; the reason has already
/// been printed.
pub async fn open_engine(ctx: &Context) -> Result<Option<SyncEngine>> {
    let formatter = ctx.formatter();
    let config = load_config(&ctx.config_path)?;
    info!(config_path = %ctx.config_path.display(), "Loaded configuration");

    if config.owner().is_err() {
        formatter.warn(&format!(
            "User id is not configured. Set remote.owner_id in {}",
            ctx.config_path.display()
        ));
        return Ok(None);
    }

    let client = RestClient::from_config(&config).context("Failed to create REST client")?;
    let store: Arc<dyn IRemoteStore> = Arc::new(HttpRemoteStore::new(client));
    let engine = SyncEngine::from_config(store, &config)?;

    if let Err(e) = engine.load().await {
        debug!(error = %e, "Initial load failed");
        print_list(ctx, &engine, Filter::All).await;
        return Ok(None);
    }
    Ok(Some(engine))
}

/// Prints a confirmation line in human mode
pub fn announce(ctx: &Context, message: &str) {
    if !ctx.is_json() {
        ctx.formatter().success(message);
    }
}

/// Prints the list and any notification
///
/// Fails when a notification is visible.
pub async fn print_list(ctx: &Context, engine: &SyncEngine, filter: Filter) -> ExitCode {
    let formatter = ctx.formatter();
    let snapshot = engine.snapshot().await;

    if ctx.is_json() {
        formatter.print_json(&list_json(&snapshot, filter));
    } else {
        for line in list_lines(&snapshot, filter) {
            formatter.info(&line);
        }
        formatter.info(&items_left_line(&snapshot));
    }

    match &snapshot.notification {
        Some(notification) => {
            formatter.error(&notification.text);
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

/// Reports the outcome of an operation and prints the list
///
/// Errors that raised a notification are shown through it; the rest are
/// printed directly.
pub async fn finish<T>(
    ctx: &Context,
    engine: &SyncEngine,
    result: &Result<T, SyncError>,
    filter: Filter,
) -> ExitCode {
    let failed = match result {
        Ok(_) => false,
        Err(e) if e.kind().is_some() => {
            debug!(error = %e, "Operation failed");
            true
        }
        Err(e) => {
            ctx.formatter().error(&e.to_string());
            true
        }
    };

    let code = print_list(ctx, engine, filter).await;
    if failed {
        ExitCode::FAILURE
    } else {
        code
    }
}
