//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for order-device-capture using clap's derive macros.

use clap::{Parser, Subcommand};

/// Order device capture - records which device and channel placed an order
#[derive(Parser)]
#[command(name = "order-device-capture")]
#[command(version)]
#[command(about = "Capture device and channel metadata for placed orders", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Capture device data for a placed order
    ///
    /// Usage: capture --order-id 42 --area frontend --user-agent "Mozilla/5.0 ..."
    /// - Repeated --user-agent values are joined with a single space
    /// - A second capture for the same order is a no-op
    Capture {
        /// Order identifier
        #[arg(long)]
        order_id: i64,

        /// Execution area (frontend, adminhtml, webapi_rest, webapi_soap, ...)
        #[arg(long)]
        area: String,

        /// User-Agent header, possibly split into fragments
        #[arg(long = "user-agent")]
        user_agent: Vec<String>,

        /// Referer header
        #[arg(long)]
        referer: Option<String>,
    },

    /// Classify a user agent without storing anything
    Detect {
        /// User-Agent header, possibly split into fragments
        #[arg(long = "user-agent", required = true)]
        user_agent: Vec<String>,
    },

    /// Classify an execution area and referer
    Area {
        /// Execution area
        #[arg(long)]
        area: String,

        /// Referer header
        #[arg(long)]
        referer: Option<String>,
    },

    /// Show the stored device data of an order as JSON
    Show {
        /// Order identifier
        #[arg(long)]
        order_id: i64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        #[arg(long, short = 'o')]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether the command needs a database connection
    pub fn needs_storage(&self) -> bool {
        matches!(self, Commands::Capture { .. } | Commands::Show { .. })
    }
}
