use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::area::AreaCode;
use crate::device::DeviceClassification;

/// Device and channel captured for one order
///
/// `id` is assigned by the repository on first save; a record without one
/// has not been captured yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCaptureRecord {
    pub id: Option<i64>,
    pub order_id: i64,
    pub device_code: Option<String>,
    pub device_name: Option<String>,
    pub area_code: AreaCode,
    pub created_at: Option<DateTime<Utc>>,
}

impl DeviceCaptureRecord {
    /// Unsaved candidate, as handed out by `get_empty_entity`
    pub fn empty() -> Self {
        Self {
            id: None,
            order_id: 0,
            device_code: None,
            device_name: None,
            area_code: AreaCode::Unknown,
            created_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = order_id;
        self
    }

    /// Code and name always travel together
    pub fn with_device(mut self, device: DeviceClassification) -> Self {
        self.device_name = device.code.as_ref().and(device.name);
        self.device_code = device.code;
        self
    }

    pub fn with_area(mut self, area_code: AreaCode) -> Self {
        self.area_code = area_code;
        self
    }
}

impl Default for DeviceCaptureRecord {
    fn default() -> Self {
        Self::empty()
    }
}
