use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CopyInfo;

/// Snapshot of a file's authoritative record in its record store.
///
/// Before mounting, or after a refresh that missed, a handle holds a
/// partially known record, so every field except `copies` is optional.
/// `None` always means "not known here", never "known to be absent".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Record id, assigned by the store when mounting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Display name; also carries the extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Byte length of the original content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type of the original content.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Last-modified timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Chunks received so far, maintained by the upload transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<u64>,
    /// Total chunks expected for a complete upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_sum: Option<u64>,
    /// Published copies keyed by storage target name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub copies: HashMap<String, CopyInfo>,
    /// Name of the record store this record is mounted in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl FileRecord {
    /// Absorb a fresher snapshot into this record.
    ///
    /// Fields the snapshot does not carry never erase local values. The
    /// `copies` map is replaced wholesale when the snapshot brings a
    /// non-empty one: the store's view of published copies is authoritative.
    pub fn merge(&mut self, snapshot: &FileRecord) {
        if snapshot.id.is_some() {
            self.id = snapshot.id;
        }
        if let Some(name) = &snapshot.name {
            self.name = Some(name.clone());
        }
        if snapshot.size.is_some() {
            self.size = snapshot.size;
        }
        if let Some(content_type) = &snapshot.content_type {
            self.content_type = Some(content_type.clone());
        }
        if snapshot.updated_at.is_some() {
            self.updated_at = snapshot.updated_at;
        }
        if snapshot.chunk_count.is_some() {
            self.chunk_count = snapshot.chunk_count;
        }
        if snapshot.chunk_sum.is_some() {
            self.chunk_sum = snapshot.chunk_sum;
        }
        if !snapshot.copies.is_empty() {
            self.copies = snapshot.copies.clone();
        }
        if let Some(collection) = &snapshot.collection {
            self.collection = Some(collection.clone());
        }
    }

    /// Lower-cased extension, taken after the last `.` of `name`.
    ///
    /// Empty when the name is unknown or carries no dot.
    pub fn extension(&self) -> String {
        let Some(name) = &self.name else {
            return String::new();
        };
        match name.rfind('.') {
            Some(dot) => name[dot + 1..].to_lowercase(),
            None => String::new(),
        }
    }

    /// Whether every expected chunk has arrived.
    ///
    /// The counters are compared as options, so two unknown counters answer
    /// `true`; only mounted records give a meaningful answer.
    pub fn is_upload_complete(&self) -> bool {
        self.chunk_count == self.chunk_sum
    }

    /// Percentage of uploaded chunks, rounded to a whole number.
    ///
    /// An unknown or zero `chunk_sum` yields the non-finite value the
    /// division produces (NaN or infinity) rather than a panic, so callers
    /// that skipped the mount check can still test with `f64::is_finite`.
    pub fn upload_progress(&self) -> f64 {
        let count = self.chunk_count.map_or(f64::NAN, |n| n as f64);
        let sum = self.chunk_sum.map_or(f64::NAN, |n| n as f64);
        (count / sum * 100.0).round()
    }
}
