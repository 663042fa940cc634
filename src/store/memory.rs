use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ProfileStore, apply_delete, apply_upsert};
use crate::error::StoreError;
use crate::profile::RawProfileRecord;

/// Profile store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<RawProfileRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store without stamping timestamps.
    pub fn with_records(records: Vec<RawProfileRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn list_profiles(&self) -> Result<Vec<RawProfileRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get_profile(&self, id: &str) -> Result<RawProfileRecord, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn upsert_profile(
        &self,
        record: RawProfileRecord,
    ) -> Result<RawProfileRecord, StoreError> {
        let mut records = self.records.write().await;
        Ok(apply_upsert(&mut records, record, Utc::now()))
    }

    async fn delete_profile(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        apply_delete(&mut records, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let store = MemoryStore::new();
        assert!(store.list_profiles().await.unwrap().is_empty());

        let stored = store
            .upsert_profile(RawProfileRecord::new("a").with_field("roles", "Technical"))
            .await
            .unwrap();
        assert!(stored.updated_at.is_some());

        let fetched = store.get_profile("a").await.unwrap();
        assert_eq!(fetched, stored);

        store.delete_profile("a").await.unwrap();
        assert!(matches!(
            store.get_profile("a").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_seeded_records_keep_order() {
        let store = MemoryStore::with_records(vec![
            RawProfileRecord::new("b"),
            RawProfileRecord::new("a"),
        ]);
        let ids: Vec<_> = store
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
