//! Bulk commands - clear-completed and toggle-all
//!
//! Both issue their calls concurrently. Items whose call failed are left
//! as they were and a single notification is shown.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasksync_core::domain::Filter;
use tasksync_sync::engine::BatchReport;

use super::{session, Context};

/// Arguments for the clear-completed subcommand
#[derive(Debug, Args)]
pub struct ClearCompletedCommand {}

impl ClearCompletedCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        info!("Clearing completed items");
        let result = engine.clear_completed().await;
        if let Ok(report) = &result {
            announce_report(ctx, report, "Deleted");
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}

/// Arguments for the toggle-all subcommand
#[derive(Debug, Args)]
pub struct ToggleAllCommand {}

impl ToggleAllCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        info!("Toggling all items");
        let result = engine.toggle_all().await;
        if let Ok(report) = &result {
            announce_report(ctx, report, "Updated");
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}

fn announce_report(ctx: &Context, report: &BatchReport, verb: &str) {
    if !report.skipped.is_empty() {
        ctx.formatter().warn(&skipped_note(report));
    }
    if report.attempted() == 0 {
        session::announce(ctx, "Nothing to do");
        return;
    }
    let mut message = format!("{verb} {} item(s)", report.succeeded.len());
    if !report.failed.is_empty() {
        message.push_str(&format!(", {} failed", report.failed.len()));
    }
    session::announce(ctx, &message);
}

fn skipped_note(report: &BatchReport) -> String {
    let ids: Vec<String> = report.skipped.iter().map(|id| id.to_string()).collect();
    format!(
        "Skipped {} busy item(s): {}",
        report.skipped.len(),
        ids.join(", ")
    )
}
