//! Rename command - Change the title of one item
//!
//! Runs through an edit session: open it on the item, replace its text,
//! submit. An unchanged title sends nothing; an empty one deletes the item.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasksync_core::domain::{Filter, ItemId};
use tasksync_sync::engine::RenameOutcome;

use super::{session, Context};

#[derive(Debug, Args)]
pub struct RenameCommand {
    /// Id of the item to rename
    pub id: ItemId,

    /// New title; leave out to delete the item
    #[arg(num_args = 0.., allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl RenameCommand {
    pub fn title(&self) -> String {
        self.words.join(" ")
    }

    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        info!(id = %self.id, "Renaming item");
        let result = match engine.start_editing(self.id).await {
            Ok(()) => {
                engine.set_edit_title(self.title()).await?;
                engine.submit_edit().await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(RenameOutcome::Unchanged) => session::announce(ctx, "Title unchanged"),
            Ok(RenameOutcome::Renamed(item)) => {
                session::announce(ctx, &format!("Renamed item {} to \"{}\"", item.id, item.title))
            }
            Ok(RenameOutcome::Deleted) => {
                session::announce(ctx, &format!("Deleted item {}", self.id))
            }
            Err(_) => {}
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}
