//! List command - Show the list
//!
//! Loads the list for the configured owner and prints the rows matching
//! the filter, followed by the number of active items.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use tasksync_core::domain::Filter;

use super::{session, Context};

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which items to show: all, active or completed
    #[arg(long, default_value_t = Filter::All)]
    pub filter: Filter,
}

impl ListCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };
        Ok(session::print_list(ctx, &engine, self.filter).await)
    }
}
