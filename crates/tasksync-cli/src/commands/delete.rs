//! Delete command - Remove one item

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasksync_core::domain::{Filter, ItemId};

use super::{session, Context};

#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the item to delete
    pub id: ItemId,
}

impl DeleteCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        info!(id = %self.id, "Deleting item");
        let result = engine.delete(self.id).await;
        if result.is_ok() {
            session::announce(ctx, &format!("Deleted item {}", self.id));
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}
