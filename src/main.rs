use clap::Parser;
use colored::Colorize;
use tracing::debug;

use order_device_capture::cli::Cli;
use order_device_capture::config::{StaticConfig, get_config, init_config, init_config_from};
use order_device_capture::interfaces::cli::run_cli_command;
use order_device_capture::system::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.config.as_deref() {
        Some(path) => match StaticConfig::load_from(path) {
            Ok(config) => init_config_from(config),
            Err(e) => {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        },
        None => init_config(),
    }

    let config = get_config();
    // guard 释放时刷新缓冲的日志
    let log_guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };
    debug!("Configuration: {:?}", config);

    let result = run_cli_command(cli.command).await;
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
