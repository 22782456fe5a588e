//! Append-only per-check audit logs with gzip archival.
//!
//! A live log is `{id}.log`: one JSON record per line, blank-line separated.
//! Rotation freezes a live log into `{id}-{timestamp}.gz.b64` — the gzip of
//! the live text, stored base64-encoded — and truncates the live file in
//! place so appends continue uninterrupted. Archives are never evicted;
//! unbounded accumulation is a known gap.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use common::{Error, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Per-check audit log storage rooted at one directory.
pub struct LogStore {
    base_dir: PathBuf,
}

impl LogStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn live_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.log"))
    }

    fn archive_path(&self, archive_id: &str) -> PathBuf {
        self.base_dir.join(format!("{archive_id}.gz.b64"))
    }

    /// Append one record line, creating the live log on first use.
    pub async fn append(&self, id: &str, line: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.live_path(id))
            .await?;
        file.write_all(format!("{line}\n\n").as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// List log ids: live logs always, archives only when asked for.
    pub async fn list(&self, include_archived: bool) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.base_dir).await?;
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(id) = name.strip_suffix(".log") {
                ids.push(id.to_string());
            } else if include_archived {
                if let Some(id) = name.strip_suffix(".gz.b64") {
                    ids.push(id.to_string());
                }
            }
        }
        Ok(ids)
    }

    /// Compress a live log into a new archive artifact.
    ///
    /// The archive is created with create-new semantics; an existing artifact
    /// with the same id is an error, never overwritten.
    pub async fn compress(&self, id: &str, archive_id: &str) -> Result<()> {
        let text = tokio::fs::read_to_string(self.live_path(id)).await?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes())?;
        let compressed = encoder.finish()?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.archive_path(archive_id))
            .await?;
        file.write_all(BASE64.encode(compressed).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Decompress an archive back to the live log text it was made from.
    pub async fn decompress(&self, archive_id: &str) -> Result<String> {
        let encoded = tokio::fs::read_to_string(self.archive_path(archive_id)).await?;
        let compressed = BASE64
            .decode(encoded.trim())
            .map_err(|e| Error::rotation(format!("invalid archive encoding: {e}")))?;

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Empty a live log in place so future appends continue uninterrupted.
    pub async fn truncate(&self, id: &str) -> Result<()> {
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .open(self.live_path(id))
            .await?;
        file.set_len(0).await?;
        Ok(())
    }
}
