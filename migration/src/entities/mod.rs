pub mod order_device_data;

pub use order_device_data::Entity as OrderDeviceDataEntity;
