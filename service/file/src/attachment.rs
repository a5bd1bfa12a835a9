use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use domain_file::{
    exception::{FileException, FileResult},
    model::vo::{AttachSource, Payload, PayloadData, ResolvedAttachment},
    service::RemoteMetadataService,
};
use typed_builder::TypedBuilder;

/// Normalizes heterogeneous attachment sources into a typed payload.
#[derive(TypedBuilder, Clone)]
pub struct AttachmentResolver {
    metadata_service: Arc<dyn RemoteMetadataService>,
}

impl AttachmentResolver {
    /// Resolve `source` into a payload plus whatever descriptive fields the
    /// source carries.
    ///
    /// All branches resolve the content type the same way: the source's own
    /// declared type wins and `explicit_type` is the fallback. Remote URLs
    /// are answered by the metadata resolver without transferring content;
    /// a resolver failure propagates and attaches nothing.
    pub async fn resolve(
        &self,
        source: AttachSource,
        explicit_type: Option<&str>,
    ) -> FileResult<ResolvedAttachment> {
        match source {
            AttachSource::File(path) => {
                let meta = tokio::fs::metadata(&path)
                    .await
                    .with_context(|| format!("reading metadata of attach source {path:?}"))?;
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("reading attach source {path:?}"))?;

                let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                let modified_at = meta.modified().ok().map(DateTime::<Utc>::from);
                let declared = infer::get(&bytes).map(|kind| kind.mime_type().to_string());
                let content_type = declared.or_else(|| explicit_type.map(str::to_owned));

                Ok(ResolvedAttachment {
                    payload: Payload {
                        data: PayloadData::Bytes(bytes),
                        content_type,
                    },
                    name,
                    size: Some(meta.len()),
                    modified_at,
                })
            }
            AttachSource::Buffer {
                bytes,
                content_type,
            } => {
                let size = bytes.len() as u64;
                let content_type = content_type.or_else(|| explicit_type.map(str::to_owned));
                Ok(ResolvedAttachment {
                    payload: Payload {
                        data: PayloadData::Bytes(bytes),
                        content_type,
                    },
                    name: None,
                    size: Some(size),
                    modified_at: Some(Utc::now()),
                })
            }
            AttachSource::Url(url) => {
                let info = self.metadata_service.fetch(&url).await.map_err(|source| {
                    FileException::MetadataFetch {
                        url: url.clone(),
                        source,
                    }
                })?;
                let content_type =
                    info.content_type.or_else(|| explicit_type.map(str::to_owned));
                Ok(ResolvedAttachment {
                    payload: Payload {
                        data: PayloadData::Remote(url),
                        content_type,
                    },
                    name: info.name,
                    size: info.size,
                    modified_at: None,
                })
            }
            AttachSource::Untyped(bytes) => Ok(ResolvedAttachment {
                payload: Payload {
                    data: PayloadData::Bytes(bytes),
                    content_type: explicit_type.map(str::to_owned),
                },
                name: None,
                size: None,
                modified_at: None,
            }),
        }
    }
}
