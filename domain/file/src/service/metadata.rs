use async_trait::async_trait;
use url::Url;

use crate::model::vo::RemoteFileInfo;

/// # Remote metadata service
///
/// Answers descriptive metadata (type, size, name) for a remote file
/// without transferring its content.
#[async_trait]
pub trait RemoteMetadataService: Send + Sync {
    /// Metadata-only lookup for `url`.
    ///
    /// Any unreported field comes back `None`; transport failures are
    /// errors.
    async fn fetch(&self, url: &Url) -> anyhow::Result<RemoteFileInfo>;
}
