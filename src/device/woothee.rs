//! woothee 实现
//!
//! Maps woothee's coarse categories onto numeric device-type codes so the
//! name lookup tables can label them.

use tracing::trace;
use ::woothee::parser::Parser;

use super::detector::{Detection, DeviceDetection};
use super::names::device_type;
use crate::errors::Result;

const CRAWLER: &str = "crawler";

#[derive(Debug, Clone, Copy, Default)]
pub struct WootheeDetector;

impl WootheeDetector {
    pub fn new() -> Self {
        Self
    }

    fn device_type_code(category: &str) -> Option<&'static str> {
        match category {
            "pc" => Some(device_type::DESKTOP),
            "smartphone" => Some(device_type::SMARTPHONE),
            "mobilephone" => Some(device_type::FEATURE_PHONE),
            "appliance" => Some(device_type::CONSOLE),
            _ => None,
        }
    }
}

impl DeviceDetection for WootheeDetector {
    fn detect(&self, user_agent: &str) -> Result<Detection> {
        let parser = Parser::new();
        let Some(result) = parser.parse(user_agent) else {
            trace!("woothee: no match for {:?}", user_agent);
            return Ok(Detection::default());
        };

        trace!(
            "woothee: category={}, name={}, os={}",
            result.category, result.name, result.os
        );

        if result.category == CRAWLER {
            return Ok(Detection::bot());
        }

        Ok(Detection {
            is_bot: false,
            device: Self::device_type_code(result.category).map(str::to_string),
        })
    }

    fn name(&self) -> &'static str {
        "woothee"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_chrome() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
        let detection = WootheeDetector::new().detect(ua).unwrap();
        assert!(!detection.is_bot);
        assert_eq!(detection.device.as_deref(), Some(device_type::DESKTOP));
    }

    #[test]
    fn test_iphone_safari() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
        let detection = WootheeDetector::new().detect(ua).unwrap();
        assert_eq!(detection.device.as_deref(), Some(device_type::SMARTPHONE));
    }

    #[test]
    fn test_googlebot_is_bot() {
        let ua = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
        let detection = WootheeDetector::new().detect(ua).unwrap();
        assert!(detection.is_bot);
        assert_eq!(detection.device, None);
    }

    #[test]
    fn test_unrecognised_agent_has_no_device() {
        let detection = WootheeDetector::new().detect("TestAgent").unwrap();
        assert!(!detection.is_bot);
        assert_eq!(detection.device, None);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(WootheeDetector::device_type_code("appliance"), Some("4"));
        assert_eq!(WootheeDetector::device_type_code("misc"), None);
        assert_eq!(WootheeDetector::device_type_code("UNKNOWN"), None);
    }
}
