//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
pub mod retry;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, info};

use crate::capture::{DeviceCaptureRecord, DeviceCaptureRepository};
use crate::errors::{CaptureError, Result};
use migration::entities::order_device_data;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_record, record_to_active_model};
use retry::{RetryConfig, with_retry};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CaptureError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SQLite 文件路径补全为 sqlx 可识别的 URL
fn normalize_sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}?mode=rwc", database_url)
    }
}

/// SeaORM-based capture repository
#[derive(Clone)]
pub struct SeaOrmCaptureRepository {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: RetryConfig,
}

impl SeaOrmCaptureRepository {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CaptureError::database_config("DATABASE_URL 未设置"));
        }

        let config = crate::config::get_config();
        let retry_config = RetryConfig::from_config(&config.database);

        let db = if backend_name == "sqlite" {
            connect_sqlite(&normalize_sqlite_url(database_url), &config.database).await?
        } else {
            connect_generic(database_url, backend_name, &config.database).await?
        };

        let storage = Self::from_connection(db, backend_name, retry_config);
        run_migrations(&storage.db).await?;

        info!(
            "{} capture storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// Wrap an existing connection; migrations are the caller's business
    pub fn from_connection(
        db: DatabaseConnection,
        backend_name: &str,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        }
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }
}

#[async_trait]
impl DeviceCaptureRepository for SeaOrmCaptureRepository {
    async fn get_by_order_id(&self, order_id: i64) -> Result<DeviceCaptureRecord> {
        let db = &self.db;
        let model = with_retry("get_by_order_id", self.retry_config, || async move {
            order_device_data::Entity::find()
                .filter(order_device_data::Column::OrderId.eq(order_id))
                .one(db)
                .await
        })
        .await?;

        match model {
            Some(model) => model_to_record(model),
            None => Err(CaptureError::not_found(format!(
                "No device data for order {}",
                order_id
            ))),
        }
    }

    async fn save(&self, record: DeviceCaptureRecord) -> Result<DeviceCaptureRecord> {
        // 只写一次，已有 id 的记录不会被更新
        if let Some(id) = record.id {
            return Err(CaptureError::conflict(format!(
                "Device data {} for order {} is already persisted",
                id, record.order_id
            )));
        }

        let created_at = record.created_at.unwrap_or_else(Utc::now);
        let active_model = record_to_active_model(&record, created_at);
        let db = &self.db;

        let inserted = with_retry("save_device_data", self.retry_config, || {
            let active_model = active_model.clone();
            async move {
                order_device_data::Entity::insert(active_model)
                    .exec(db)
                    .await
            }
        })
        .await?;

        debug!(
            "Inserted device data {} for order {}",
            inserted.last_insert_id, record.order_id
        );

        Ok(DeviceCaptureRecord {
            id: Some(inserted.last_insert_id),
            created_at: Some(created_at),
            ..record
        })
    }

    fn backend_name(&self) -> &'static str {
        match self.backend_name.as_str() {
            "mysql" => "mysql",
            "postgres" => "postgres",
            _ => "sqlite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend() {
        assert_eq!(infer_backend_from_url("sqlite://x.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("orders.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://u:p@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("postgresql://u:p@h/db").unwrap(), "postgres");
        assert!(infer_backend_from_url("redis://h").is_err());
    }

    #[test]
    fn test_normalize_sqlite_url() {
        assert_eq!(normalize_sqlite_url("orders.db"), "sqlite://orders.db?mode=rwc");
        assert_eq!(normalize_sqlite_url(":memory:"), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite://a.db"), "sqlite://a.db");
    }
}
