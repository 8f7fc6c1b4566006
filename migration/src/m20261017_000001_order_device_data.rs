//! 订单设备数据表
//!
//! order_id 唯一索引保证每个订单最多一条记录，
//! 并发重复投递时由数据库拒绝第二次写入。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderDeviceData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderDeviceData::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrderDeviceData::OrderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderDeviceData::DeviceCode).string_len(64).null())
                    .col(ColumnDef::new(OrderDeviceData::DeviceName).string_len(128).null())
                    .col(
                        ColumnDef::new(OrderDeviceData::AreaCode)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(OrderDeviceData::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_device_data_order_id")
                    .table(OrderDeviceData::Table)
                    .col(OrderDeviceData::OrderId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_device_data_area_code")
                    .table(OrderDeviceData::Table)
                    .col(OrderDeviceData::AreaCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDeviceData::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrderDeviceData {
    Table,
    Id,
    OrderId,
    DeviceCode,
    DeviceName,
    AreaCode,
    CreatedAt,
}
