use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::anyhow;
use async_trait::async_trait;
use domain_file::service::UploadTransportService;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Filesystem staging area for in-flight chunked uploads.
///
/// Parts land under `base/multipart/{meta_id}/{nth}` until a transport
/// assembles them; removing a file discards its whole per-file directory.
#[derive(TypedBuilder, Clone)]
pub struct LocalStagingTransport {
    #[builder(default = "staging".into(), setter(into))]
    base: PathBuf,
}

impl LocalStagingTransport {
    fn multipart_dir(&self, meta_id: Uuid) -> PathBuf {
        self.base.join(format!("multipart/{meta_id}"))
    }

    fn part_path(&self, meta_id: Uuid, nth: u64) -> PathBuf {
        self.base.join(format!("multipart/{meta_id}/{nth}"))
    }

    /// Write one staged part.
    pub async fn stage_part(&self, meta_id: Uuid, nth: u64, content: &[u8]) -> anyhow::Result<()> {
        let path = self.part_path(meta_id, nth);
        tokio::fs::create_dir_all(
            path.parent().ok_or(anyhow!("path: {path:?} doesn't has parent."))?,
        )
        .await?;
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    /// Indexes of currently staged parts, sorted.
    pub async fn staged_parts(&self, meta_id: Uuid) -> anyhow::Result<Vec<u64>> {
        let dir = self.multipart_dir(meta_id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut parts = vec![];
        while let Some(entry) = entries.next_entry().await? {
            if let Some(nth) = entry.file_name().to_str().and_then(|name| name.parse().ok()) {
                parts.push(nth);
            }
        }
        parts.sort_unstable();
        Ok(parts)
    }
}

#[async_trait]
impl UploadTransportService for LocalStagingTransport {
    async fn discard_staged_chunks(&self, meta_id: Uuid) -> anyhow::Result<()> {
        let dir = self.multipart_dir(meta_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::debug!("Discarded staged chunks under: {}", dir.display());
                Ok(())
            }
            // Nothing staged for this file; removal calls unconditionally.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
