use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Input accepted by data attachment, classified once at the boundary.
#[derive(Debug, Clone)]
pub enum AttachSource {
    /// A file on the local filesystem. Name, size and modification time
    /// come from filesystem metadata, the declared type from the bytes.
    File(PathBuf),
    /// An in-memory buffer carrying its own declared content type.
    Buffer {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// A remote file reachable over http(s); only metadata is fetched.
    Url(Url),
    /// Bytes of unknown provenance, typed only by an explicit hint.
    Untyped(Vec<u8>),
}

impl AttachSource {
    /// Classify a text input: http(s) URLs become [`AttachSource::Url`],
    /// everything else is kept as untyped bytes.
    pub fn from_text(text: &str) -> Self {
        match Url::parse(text) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => AttachSource::Url(url),
            _ => AttachSource::Untyped(text.as_bytes().to_vec()),
        }
    }
}

/// Normalized attachment data plus its resolved content type.
#[derive(Debug, Clone)]
pub struct Payload {
    pub data: PayloadData,
    pub content_type: Option<String>,
}

/// Where payload bytes live.
#[derive(Debug, Clone)]
pub enum PayloadData {
    /// Bytes held in memory.
    Bytes(Vec<u8>),
    /// A remote location whose content has not been transferred.
    Remote(Url),
}

impl Payload {
    /// Byte length for in-memory data; unknown for remote payloads.
    pub fn len(&self) -> Option<u64> {
        match &self.data {
            PayloadData::Bytes(bytes) => Some(bytes.len() as u64),
            PayloadData::Remote(_) => None,
        }
    }
}

/// Descriptive metadata answered by a remote metadata resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileInfo {
    /// MIME type the remote end reports.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Content length in bytes, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// File name, when one can be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Outcome of attachment resolution, ready to merge into a handle.
#[derive(Debug, Clone)]
pub struct ResolvedAttachment {
    pub payload: Payload,
    /// Display name, when the source carried one.
    pub name: Option<String>,
    /// Total byte size, when the source declared one.
    pub size: Option<u64>,
    /// Modification time, when the source carried one.
    pub modified_at: Option<DateTime<Utc>>,
}
