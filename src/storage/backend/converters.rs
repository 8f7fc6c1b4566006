use crate::area::AreaCode;
use crate::capture::DeviceCaptureRecord;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use migration::entities::order_device_data;

/// 将 Sea-ORM Model 转换为 DeviceCaptureRecord
pub fn model_to_record(model: order_device_data::Model) -> Result<DeviceCaptureRecord> {
    Ok(DeviceCaptureRecord {
        id: Some(model.id),
        order_id: model.order_id,
        device_code: model.device_code,
        device_name: model.device_name,
        area_code: AreaCode::try_from(model.area_code)?,
        created_at: Some(model.created_at),
    })
}

/// 将新记录转换为 ActiveModel（id 由数据库分配）
pub fn record_to_active_model(
    record: &DeviceCaptureRecord,
    created_at: DateTime<Utc>,
) -> order_device_data::ActiveModel {
    use sea_orm::ActiveValue::*;

    order_device_data::ActiveModel {
        id: NotSet,
        order_id: Set(record.order_id),
        device_code: Set(record.device_code.clone()),
        device_name: Set(record.device_name.clone()),
        area_code: Set(record.area_code.as_i16()),
        created_at: Set(created_at),
    }
}
