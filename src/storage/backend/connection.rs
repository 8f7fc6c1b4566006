//! Connection setup and schema migration for the capture table

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{CaptureError, Result};
use migration::{Migrator, MigratorTrait, SchemaManager};

const CAPTURE_TABLE: &str = "order_device_data";

/// 连接 SQLite 数据库（带自动创建和 WAL）
///
/// A busy database file is waited on for at most `timeout` seconds.
pub async fn connect_sqlite(database_url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
    };
    use std::str::FromStr;

    let timeout = Duration::from_secs(config.timeout);
    let opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| CaptureError::database_config(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.pool_size.max(1))
        .acquire_timeout(timeout)
        .connect_with(opt)
        .await
        .map_err(|e| {
            CaptureError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
        })?;

    debug!("SQLite pool ready (max {} connections)", config.pool_size.max(1));
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接通用数据库（MySQL/PostgreSQL）
pub async fn connect_generic(
    database_url: &str,
    backend_name: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection> {
    let timeout = Duration::from_secs(config.timeout);

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(config.pool_size)
        .min_connections(config.pool_size.min(2))
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(|e| {
        CaptureError::database_connection(format!(
            "无法连接到 {} 数据库: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// Apply pending migrations and make sure the capture table is there
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db)
        .await
        .map_err(|e| CaptureError::database_operation(format!("读取迁移状态失败: {}", e)))?;

    if pending.is_empty() {
        debug!("Capture schema is up to date");
    } else {
        Migrator::up(db, None)
            .await
            .map_err(|e| CaptureError::database_operation(format!("迁移失败: {}", e)))?;
        info!("Applied {} capture schema migration(s)", pending.len());
    }

    let has_table = SchemaManager::new(db)
        .has_table(CAPTURE_TABLE)
        .await
        .map_err(CaptureError::from)?;
    if !has_table {
        return Err(CaptureError::database_operation(format!(
            "Table {} is missing after migration",
            CAPTURE_TABLE
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("capture.db").display());
        let config = DatabaseConfig::default();

        let db = connect_sqlite(&url, &config).await.unwrap();
        run_migrations(&db).await.unwrap();
        run_migrations(&db).await.unwrap();

        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
        assert!(SchemaManager::new(&db).has_table(CAPTURE_TABLE).await.unwrap());
    }
}
