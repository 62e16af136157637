//! CLI subcommands
//!
//! Data commands share one flow (see [`session`]): load the configuration,
//! build the engine over the REST store, load the list, run the operation,
//! then print the list and any notification.

use std::path::PathBuf;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

pub mod add;
pub mod bulk;
pub mod completions;
pub mod config;
pub mod delete;
pub mod list;
pub mod rename;
pub mod session;
pub mod toggle;

/// Global options every command runs with
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    /// Configuration file in effect (`--config` or the default path)
    pub config_path: PathBuf,
}

impl Context {
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.is_json())
    }
}
