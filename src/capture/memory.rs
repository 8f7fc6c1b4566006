//! In-memory repository
//!
//! Backs the coordinator when no database is configured and in tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::record::DeviceCaptureRecord;
use super::repository::DeviceCaptureRepository;
use crate::errors::{CaptureError, Result};

#[derive(Debug)]
pub struct InMemoryCaptureRepository {
    /// order_id -> record
    records: DashMap<i64, DeviceCaptureRecord>,
    next_id: AtomicI64,
}

impl InMemoryCaptureRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of all records, ordered by id
    pub fn all(&self) -> Vec<DeviceCaptureRecord> {
        let mut records: Vec<DeviceCaptureRecord> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

impl Default for InMemoryCaptureRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceCaptureRepository for InMemoryCaptureRepository {
    async fn get_by_order_id(&self, order_id: i64) -> Result<DeviceCaptureRecord> {
        self.records
            .get(&order_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| {
                CaptureError::not_found(format!("No device data for order {}", order_id))
            })
    }

    async fn save(&self, mut record: DeviceCaptureRecord) -> Result<DeviceCaptureRecord> {
        // 只写一次，已有 id 的记录不会被更新
        if let Some(id) = record.id {
            return Err(CaptureError::conflict(format!(
                "Device data {} for order {} is already persisted",
                id, record.order_id
            )));
        }

        // entry() holds the shard lock, so check and insert are one step
        match self.records.entry(record.order_id) {
            Entry::Occupied(_) => Err(CaptureError::conflict(format!(
                "Device data for order {} already exists",
                record.order_id
            ))),
            Entry::Vacant(slot) => {
                record.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
                if record.created_at.is_none() {
                    record.created_at = Some(Utc::now());
                }
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaCode;

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let repo = InMemoryCaptureRepository::new();
        let err = repo.get_by_order_id(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let repo = InMemoryCaptureRepository::new();
        let saved = repo
            .save(repo.get_empty_entity().with_order_id(7).with_area(AreaCode::Rest))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(1));
        assert!(saved.created_at.is_some());
        assert_eq!(repo.get_by_order_id(7).await.unwrap(), saved);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_second_unsaved_record_conflicts() {
        let repo = InMemoryCaptureRepository::new();
        repo.save(DeviceCaptureRecord::empty().with_order_id(7))
            .await
            .unwrap();

        let err = repo
            .save(DeviceCaptureRecord::empty().with_order_id(7))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryCaptureRepository::new();
        for order_id in [10, 11, 12] {
            repo.save(DeviceCaptureRecord::empty().with_order_id(order_id))
                .await
                .unwrap();
        }
        let ids: Vec<Option<i64>> = repo.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_persisted_record_is_never_rewritten() {
        let repo = InMemoryCaptureRepository::new();
        let saved = repo
            .save(DeviceCaptureRecord::empty().with_order_id(7).with_area(AreaCode::Front))
            .await
            .unwrap();

        let err = repo
            .save(saved.clone().with_area(AreaCode::Admin))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.get_by_order_id(7).await.unwrap().area_code, AreaCode::Front);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_record_with_foreign_id_is_rejected() {
        let repo = InMemoryCaptureRepository::new();
        let mut record = DeviceCaptureRecord::empty().with_order_id(9);
        record.id = Some(42);

        assert!(repo.save(record).await.unwrap_err().is_conflict());
        assert!(repo.is_empty());
    }
}
