use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::detector::DeviceDetection;
use super::names::DeviceNameResolver;
use super::user_agent::RawUserAgent;
use crate::config::CaptureConfig;
use crate::errors::Result;

/// Device code plus the label derived from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceClassification {
    pub code: Option<String>,
    /// Only ever derived from `code`
    pub name: Option<String>,
}

/// Turns a raw user agent into an optional device code
///
/// The detector is optional; without one every classification is `None`.
/// Detector failures and bot traffic also yield `None`. The only error is
/// a malformed input shape.
#[derive(Clone)]
pub struct UserAgentClassifier {
    detector: Option<Arc<dyn DeviceDetection>>,
    names: DeviceNameResolver,
}

impl UserAgentClassifier {
    pub fn new(detector: Option<Arc<dyn DeviceDetection>>, names: DeviceNameResolver) -> Self {
        Self { detector, names }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(
            super::default_detector(config),
            DeviceNameResolver::from_mode(config.name_lookup),
        )
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    pub fn names(&self) -> &DeviceNameResolver {
        &self.names
    }

    pub fn classify(&self, user_agent: &RawUserAgent) -> Result<Option<String>> {
        let Some(detector) = &self.detector else {
            trace!("No device detector configured, skipping device classification");
            return Ok(None);
        };

        let user_agent = user_agent.normalize()?;

        match detector.detect(&user_agent) {
            Ok(detection) if detection.is_bot => {
                debug!("Bot user agent, not classified as a device: {:?}", user_agent);
                Ok(None)
            }
            Ok(detection) => Ok(detection.device),
            Err(e) => {
                // 检测器不可用不影响下单流程，记录后按无设备处理
                warn!("Device detector '{}' unavailable: {}", detector.name(), e);
                Ok(None)
            }
        }
    }

    /// Code and stored name in one pass
    pub fn classify_device(&self, user_agent: &RawUserAgent) -> Result<DeviceClassification> {
        let code = self.classify(user_agent)?;
        let name = code.as_deref().and_then(|c| self.names.lookup_name(c));
        Ok(DeviceClassification { code, name })
    }

    /// Display name for an already classified code
    pub fn device_name(&self, code: Option<&str>) -> String {
        self.names.resolve_name(code)
    }

    /// Classify, then resolve the display name of the result
    pub fn classify_with_name(&self, user_agent: &RawUserAgent) -> Result<String> {
        let code = self.classify(user_agent)?;
        Ok(self.device_name(code.as_deref()))
    }
}

impl std::fmt::Debug for UserAgentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAgentClassifier")
            .field("detector", &self.detector.as_ref().map(|d| d.name()))
            .field("names", &self.names)
            .finish()
    }
}
