//! Device detection capability
//!
//! The detection library is an optional collaborator: the classifier holds
//! an `Option<Arc<dyn DeviceDetection>>` and treats `None` as a supported
//! degraded mode rather than an error.

use crate::errors::Result;

/// What the detector reported for one user-agent string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// Request came from an automated agent
    pub is_bot: bool,
    /// Opaque device-type code understood by the name lookup tables
    pub device: Option<String>,
}

impl Detection {
    pub fn device(code: impl Into<String>) -> Self {
        Self {
            is_bot: false,
            device: Some(code.into()),
        }
    }

    pub fn bot() -> Self {
        Self {
            is_bot: true,
            device: None,
        }
    }
}

/// Device detection trait
///
/// `Err` means the detector could not be brought up for this request
/// (`CaptureError::DetectorUnavailable`); callers log it and carry on
/// without a device code.
pub trait DeviceDetection: Send + Sync {
    fn detect(&self, user_agent: &str) -> Result<Detection>;

    /// 获取 detector 名称（用于日志）
    fn name(&self) -> &'static str;
}
