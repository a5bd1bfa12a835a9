use async_trait::async_trait;
use uuid::Uuid;

/// # Upload transport service
///
/// The transport owns chunked byte movement and the `chunk_count` /
/// `chunk_sum` counters on the record. This core only asks it to drop
/// whatever is staged when a file is removed.
#[async_trait]
pub trait UploadTransportService: Send + Sync {
    /// Discard staged chunk data for the file, if any.
    ///
    /// Nothing staged is a success; removal calls this unconditionally.
    async fn discard_staged_chunks(&self, meta_id: Uuid) -> anyhow::Result<()>;
}
