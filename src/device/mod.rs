//! 设备识别模块
//!
//! - `user_agent`: raw header shapes and normalisation
//! - `detector`: optional detection capability
//! - `names`: device-type name tables and resolver
//! - `classifier`: user agent → device code

mod classifier;
mod detector;
pub mod names;
mod user_agent;
#[cfg(feature = "woothee")]
mod woothee;

use std::sync::Arc;

use tracing::{debug, info};

pub use classifier::{DeviceClassification, UserAgentClassifier};
pub use detector::{Detection, DeviceDetection};
pub use names::{DeviceNameLookup, DeviceNameResolver, DeviceTypeNames, LegacyDeviceTypeNames};
pub use user_agent::RawUserAgent;
#[cfg(feature = "woothee")]
pub use self::woothee::WootheeDetector;

use crate::config::CaptureConfig;

/// Build the detection capability the configuration and the build allow
///
/// `None` is a normal outcome: detection disabled in config, or the crate
/// compiled without the `woothee` feature.
pub fn default_detector(config: &CaptureConfig) -> Option<Arc<dyn DeviceDetection>> {
    if !config.device_detection {
        debug!("Device detection disabled by configuration");
        return None;
    }

    #[cfg(feature = "woothee")]
    {
        let detector: Arc<dyn DeviceDetection> = Arc::new(WootheeDetector::new());
        info!("Device detection: using {} detector", detector.name());
        Some(detector)
    }

    #[cfg(not(feature = "woothee"))]
    {
        info!("Device detection: built without a detector, device codes will not be captured");
        None
    }
}
