//! Profile storage.
//!
//! The matching core never touches storage. The service reads a pool snapshot
//! through [`ProfileStore`] and hands normalized profiles to the core.

mod json_file;
mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::profile::RawProfileRecord;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// CRUD access to stored profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All stored records, in storage order.
    async fn list_profiles(&self) -> Result<Vec<RawProfileRecord>, StoreError>;

    /// A single record by id.
    async fn get_profile(&self, id: &str) -> Result<RawProfileRecord, StoreError>;

    /// Insert or update a record. Returns the record as stored.
    ///
    /// Fields present on `record` overwrite stored ones; fields it lacks are
    /// kept. `updated_at` is set to now and `created_at` is preserved.
    async fn upsert_profile(&self, record: RawProfileRecord)
    -> Result<RawProfileRecord, StoreError>;

    /// Remove a record.
    async fn delete_profile(&self, id: &str) -> Result<(), StoreError>;
}

/// Apply an upsert to an in-memory record list.
pub(crate) fn apply_upsert(
    records: &mut Vec<RawProfileRecord>,
    incoming: RawProfileRecord,
    now: DateTime<Utc>,
) -> RawProfileRecord {
    match records.iter_mut().find(|r| r.id == incoming.id) {
        Some(existing) => {
            if incoming.name.is_some() {
                existing.name = incoming.name;
            }
            if incoming.email.is_some() {
                existing.email = incoming.email;
            }
            existing.fields.extend(incoming.fields);
            existing.created_at = existing.created_at.or(incoming.created_at).or(Some(now));
            existing.updated_at = Some(now);
            existing.clone()
        }
        None => {
            let mut record = incoming;
            record.created_at = record.created_at.or(Some(now));
            record.updated_at = Some(now);
            records.push(record.clone());
            record
        }
    }
}

/// Remove a record by id from an in-memory list.
pub(crate) fn apply_delete(records: &mut Vec<RawProfileRecord>, id: &str) -> Result<(), StoreError> {
    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
        return Err(StoreError::NotFound { id: id.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_upsert_merges_and_stamps() {
        let t0 = Utc::now() - Duration::days(3);
        let t1 = Utc::now();
        let mut records = Vec::new();

        let mut first = RawProfileRecord::new("u1").with_field("availability", "full_time");
        first.name = Some("Maya".into());
        let stored = apply_upsert(&mut records, first, t0);
        assert_eq!(stored.created_at, Some(t0));
        assert_eq!(stored.updated_at, Some(t0));

        let second = RawProfileRecord::new("u1").with_field("communication", "async");
        let stored = apply_upsert(&mut records, second, t1);
        assert_eq!(records.len(), 1);
        assert_eq!(stored.name.as_deref(), Some("Maya"));
        assert_eq!(stored.fields["availability"], "full_time");
        assert_eq!(stored.fields["communication"], "async");
        assert_eq!(stored.created_at, Some(t0));
        assert_eq!(stored.updated_at, Some(t1));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let mut records = vec![RawProfileRecord::new("a")];
        assert!(matches!(
            apply_delete(&mut records, "b"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(apply_delete(&mut records, "a").is_ok());
        assert!(records.is_empty());
    }
}
