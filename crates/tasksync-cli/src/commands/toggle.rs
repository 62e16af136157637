//! Toggle command - Mark one item completed or active
//!
//! Without `--state` the current flag is flipped.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasksync_core::domain::{Filter, ItemId};

use super::{session, Context};

#[derive(Debug, Args)]
pub struct ToggleCommand {
    /// Id of the item to toggle
    pub id: ItemId,

    /// Completion state to set instead of flipping
    #[arg(long)]
    pub state: Option<bool>,
}

impl ToggleCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        let current = engine.item(self.id).await.map(|item| item.completed);
        let target = self.state.unwrap_or(!current.unwrap_or(false));
        info!(id = %self.id, completed = target, "Toggling item");

        let result = engine.toggle(self.id, target).await;
        if let Ok(item) = &result {
            let state = if item.completed { "completed" } else { "active" };
            session::announce(ctx, &format!("Item {} is {state}", item.id));
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}
