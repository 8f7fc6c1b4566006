//! Stateless classification commands

use colored::Colorize;

use super::parse_area;
use crate::area::AreaClassifier;
use crate::config::get_config;
use crate::device::{RawUserAgent, UserAgentClassifier};
use crate::interfaces::cli::CliError;

pub fn detect_command(user_agent: Vec<String>) -> Result<(), CliError> {
    let config = get_config();
    let classifier = UserAgentClassifier::from_config(&config.capture);

    if !classifier.has_detector() {
        println!(
            "{}",
            "Device detection is unavailable, no device code will be captured".yellow()
        );
    }

    let classification = classifier.classify_device(&RawUserAgent::from(user_agent))?;
    let code = classification.code.as_deref();

    println!(
        "  {} {}",
        "Device code:".bold(),
        code.unwrap_or("-").cyan()
    );
    println!(
        "  {} {}",
        "Device name:".bold(),
        classifier.device_name(code).blue()
    );
    if let Some(revision) = classifier.names().revision() {
        println!("  {} {}", "Name table:".bold(), revision.dimmed());
    }
    Ok(())
}

pub fn area_command(area: &str, referer: Option<&str>) -> Result<(), CliError> {
    let config = get_config();
    let classifier = AreaClassifier::new(&config.capture.checkout_base_path);
    let area = parse_area(area);
    let code = classifier.classify(&area, referer);

    println!(
        "{} {} ({})",
        area.to_string().cyan(),
        code.to_string().magenta().bold(),
        code.as_i16()
    );
    Ok(())
}
