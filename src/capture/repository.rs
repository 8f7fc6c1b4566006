use async_trait::async_trait;

use super::record::DeviceCaptureRecord;
use crate::errors::Result;

/// Persistence port for captured device data
#[async_trait]
pub trait DeviceCaptureRepository: Send + Sync {
    /// `CaptureError::NotFound` when the order has no record yet
    async fn get_by_order_id(&self, order_id: i64) -> Result<DeviceCaptureRecord>;

    fn get_empty_entity(&self) -> DeviceCaptureRecord {
        DeviceCaptureRecord::empty()
    }

    /// Persist a record and return it with its assigned `id`
    ///
    /// A second record for an already captured order is rejected with
    /// `CaptureError::Conflict`.
    async fn save(&self, record: DeviceCaptureRecord) -> Result<DeviceCaptureRecord>;

    /// 获取后端名称（用于日志）
    fn backend_name(&self) -> &'static str;
}
