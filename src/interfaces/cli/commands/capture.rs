//! Capture and show commands

use std::sync::Arc;

use colored::Colorize;

use super::parse_area;
use crate::capture::{
    CaptureOutcome, DeviceCaptureRepository, OrderCaptureCoordinator, OrderPlaced, RequestContext,
};
use crate::config::get_config;
use crate::device::RawUserAgent;
use crate::interfaces::cli::CliError;

pub async fn capture_order(
    storage: Arc<dyn DeviceCaptureRepository>,
    order_id: i64,
    area: &str,
    user_agent: Vec<String>,
    referer: Option<String>,
) -> Result<(), CliError> {
    let config = get_config();
    let coordinator = OrderCaptureCoordinator::from_config(storage, &config.capture);

    let mut request = RequestContext::new(RawUserAgent::from(user_agent), parse_area(area));
    if let Some(referer) = referer {
        request = request.with_referer(referer);
    }

    match coordinator.capture(&OrderPlaced::new(order_id), &request).await {
        CaptureOutcome::Captured(record) => {
            println!(
                "{} order {} (device: {}, area: {})",
                "✓ Captured".green().bold(),
                record.order_id.to_string().cyan(),
                coordinator
                    .devices()
                    .device_name(record.device_code.as_deref())
                    .blue(),
                record.area_code.to_string().magenta()
            );
            Ok(())
        }
        CaptureOutcome::AlreadyCaptured => {
            println!(
                "{} order {} already has device data",
                "ℹ".bold().blue(),
                order_id.to_string().cyan()
            );
            Ok(())
        }
        CaptureOutcome::Failed(e) => Err(e.into()),
    }
}

pub async fn show_order(
    storage: Arc<dyn DeviceCaptureRepository>,
    order_id: i64,
) -> Result<(), CliError> {
    let record = storage.get_by_order_id(order_id).await.map_err(|e| {
        if e.is_not_found() {
            CliError::CommandError(format!("No device data for order {}", order_id))
        } else {
            CliError::from(e)
        }
    })?;

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| CliError::CommandError(format!("Failed to serialize record: {}", e)))?;
    println!("{}", json);
    Ok(())
}
