use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{ProfileStore, apply_delete, apply_upsert};
use crate::error::StoreError;
use crate::profile::RawProfileRecord;

/// Profile store backed by a single JSON array file.
///
/// A missing file is an empty store. Writes go to a sibling temp file that is
/// then renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<RawProfileRecord>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Profile file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_all(&self, records: &[RawProfileRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "Profiles written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profiles.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn list_profiles(&self) -> Result<Vec<RawProfileRecord>, StoreError> {
        self.read_all().await
    }

    async fn get_profile(&self, id: &str) -> Result<RawProfileRecord, StoreError> {
        self.read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn upsert_profile(
        &self,
        record: RawProfileRecord,
    ) -> Result<RawProfileRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let stored = apply_upsert(&mut records, record, Utc::now());
        self.write_all(&records).await?;
        Ok(stored)
    }

    async fn delete_profile(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        apply_delete(&mut records, id)?;
        self.write_all(&records).await
    }
}
