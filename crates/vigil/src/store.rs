//! Record persistence seam.
//!
//! The engine only ever talks to a [`RecordStore`]; the file-backed adapter
//! here is deliberately thin (one JSON document per record, last write wins).

use async_trait::async_trait;
use common::{Error, Result};
use serde_json::Value;
use std::path::PathBuf;

/// Collection holding check records.
pub const CHECKS: &str = "checks";

/// Key-value record persistence, keyed by collection and id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List all record ids in a collection.
    async fn list(&self, collection: &str) -> Result<Vec<String>>;

    /// Read a single record.
    async fn read(&self, collection: &str, id: &str) -> Result<Value>;

    /// Replace an existing record. Last write wins.
    async fn update(&self, collection: &str, id: &str, record: &Value) -> Result<()>;
}

/// File-backed record store: `{base_dir}/{collection}/{id}.json`.
pub struct FsRecordStore {
    base_dir: PathBuf,
}

impl FsRecordStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn record_path(&self, collection: &str, id: &str) -> PathBuf {
        self.base_dir.join(collection).join(format!("{id}.json"))
    }
}

#[async_trait]
impl RecordStore for FsRecordStore {
    async fn list(&self, collection: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(self.base_dir.join(collection)).await?;
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(id) = name.to_string_lossy().strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Value> {
        let contents = tokio::fs::read_to_string(self.record_path(collection, id)).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn update(&self, collection: &str, id: &str, record: &Value) -> Result<()> {
        let path = self.record_path(collection, id);
        // Updating a record that was deleted mid-cycle must fail, not recreate it.
        if !tokio::fs::try_exists(&path).await? {
            return Err(Error::persistence(format!(
                "no such record: {collection}/{id}"
            )));
        }
        tokio::fs::write(path, serde_json::to_string(record)?).await?;
        Ok(())
    }
}
