//! 存储层
//!
//! SeaORM-backed implementation of the capture repository port.

use std::sync::Arc;

use crate::errors::Result;

pub mod backend;

pub use backend::SeaOrmCaptureRepository;

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmCaptureRepository>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmCaptureRepository::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
