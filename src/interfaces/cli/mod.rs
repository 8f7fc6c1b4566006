//! CLI interface module
//!
//! This module provides command-line interface functionality for order-device-capture.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::capture::DeviceCaptureRepository;
use crate::cli::{Commands, ConfigCommands};
use crate::storage::StorageFactory;
use commands::{area_command, capture_order, config_generate, detect_command, show_order};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::CaptureError> for CliError {
    fn from(err: crate::errors::CaptureError) -> Self {
        match err {
            crate::errors::CaptureError::InvalidUserAgent(_) => {
                CliError::ParseError(err.format_simple())
            }
            _ if is_storage_error(&err) => CliError::StorageError(err.format_simple()),
            _ => CliError::CommandError(err.format_simple()),
        }
    }
}

fn is_storage_error(err: &crate::errors::CaptureError) -> bool {
    use crate::errors::CaptureError;
    matches!(
        err,
        CaptureError::DatabaseConfig(_)
            | CaptureError::DatabaseConnection(_)
            | CaptureError::DatabaseOperation(_)
    )
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // Commands without a database
        Commands::Config {
            action: ConfigCommands::Generate { output, force },
        } => config_generate(output, force).await,
        Commands::Detect { user_agent } => detect_command(user_agent),
        Commands::Area { area, referer } => area_command(&area, referer.as_deref()),

        Commands::Capture {
            order_id,
            area,
            user_agent,
            referer,
        } => capture_order(open_storage().await?, order_id, &area, user_agent, referer).await,
        Commands::Show { order_id } => show_order(open_storage().await?, order_id).await,
    }
}

async fn open_storage() -> Result<Arc<dyn DeviceCaptureRepository>, CliError> {
    let storage: Arc<dyn DeviceCaptureRepository> = StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    Ok(storage)
}
