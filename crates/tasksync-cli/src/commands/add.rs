//! Add command - Create an item
//!
//! Joins the words given on the command line into one title. A blank
//! title is rejected before anything is sent.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasksync_core::domain::Filter;

use super::{session, Context};

#[derive(Debug, Args)]
pub struct AddCommand {
    /// Title of the new item
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub title: Vec<String>,
}

impl AddCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let Some(engine) = session::open_engine(ctx).await? else {
            return Ok(ExitCode::FAILURE);
        };

        let title = self.title.join(" ");
        info!(title = %title, "Adding item");
        engine.set_draft(title).await;
        let result = engine.submit_draft().await;
        if let Ok(item) = &result {
            session::announce(ctx, &format!("Added item {}", item.id));
        }
        Ok(session::finish(ctx, &engine, &result, Filter::All).await)
    }
}
