//! Config command - View and validate TaskSync configuration
//!
//! Provides the `tasksync config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Prints the configuration file path
//! 3. Validates the configuration file and reports errors

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use tracing::info;

use tasksync_core::config::Config;

use super::{session, Context};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Validate the configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Path => self.execute_path(ctx),
            ConfigCommand::Validate => self.execute_validate(ctx),
        }
    }

    fn execute_show(&self, ctx: &Context) -> Result<ExitCode> {
        let formatter = ctx.formatter();
        let config = session::load_config(&ctx.config_path)?;

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    fn execute_path(&self, ctx: &Context) -> Result<ExitCode> {
        if ctx.is_json() {
            ctx.formatter().print_json(&serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
            }));
        } else {
            println!("{}", ctx.config_path.display());
        }
        Ok(ExitCode::SUCCESS)
    }

    fn execute_validate(&self, ctx: &Context) -> Result<ExitCode> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;

        if !config_path.exists() {
            if ctx.is_json() {
                formatter.print_json(&serde_json::json!({
                    "valid": false,
                    "config_path": config_path.display().to_string(),
                    "errors": ["Configuration file not found"],
                }));
            } else {
                formatter.error(&format!(
                    "Configuration file not found at {}",
                    config_path.display()
                ));
                formatter.info("Create it with at least remote.owner_id set.");
            }
            return Ok(ExitCode::FAILURE);
        }

        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [format!("Failed to parse configuration: {e}")],
                    }));
                } else {
                    formatter.error(&format!("Failed to parse configuration: {e}"));
                    formatter.info(&format!("File: {}", config_path.display()));
                }
                return Ok(ExitCode::FAILURE);
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if ctx.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error(s)",
                errors.len()
            ));
            for error in &errors {
                formatter.info(&format!("{}: {}", error.field, error.message));
            }
        }

        Ok(if errors.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
