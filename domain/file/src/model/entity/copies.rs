use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::FileRecord;
use crate::model::vo::MediaKind;

/// What one storage target published for a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyInfo {
    /// Key addressing the copy inside its storage target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Name the copy was stored under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size of the stored artifact; a transformed copy may differ from the
    /// original.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type of the stored artifact.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Whatever else the storage target publishes.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CopyInfo {
    /// An entry with no known fields does not count as a materialized copy.
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
            && self.name.is_none()
            && self.size.is_none()
            && self.content_type.is_none()
            && self.extra.is_empty()
    }
}

/// Read-only view over one record's published copies.
///
/// Absence from the map is ambiguous between "not published yet" and "will
/// never exist"; `has` resolves that with the caller's optimism flag.
#[derive(Debug, Clone, Copy)]
pub struct CopyRegistry<'a> {
    record: &'a FileRecord,
}

impl<'a> CopyRegistry<'a> {
    pub fn of(record: &'a FileRecord) -> Self {
        Self { record }
    }

    /// Whether `store` holds a materialized copy.
    ///
    /// While no copy data has reached this record at all the true state is
    /// unknown and `optimistic` is returned as-is. Once any copy data
    /// exists, only a literal non-empty entry counts.
    pub fn has(&self, store: &str, optimistic: bool) -> bool {
        if self.record.copies.is_empty() {
            return optimistic;
        }
        self.record.copies.get(store).is_some_and(|info| !info.is_empty())
    }

    /// Copy info for `store`; `None` when nothing is published there.
    pub fn info(&self, store: &str) -> Option<&'a CopyInfo> {
        self.record.copies.get(store)
    }

    /// Content-type family test against a copy or the original.
    ///
    /// With a store name that holds a copy the copy's type is tested,
    /// otherwise the original record's type. Unknown types never match.
    pub fn media_matches(&self, kind: MediaKind, store: Option<&str>) -> bool {
        let content_type = match store {
            Some(name) if self.has(name, false) => {
                self.info(name).and_then(|info| info.content_type.as_deref())
            }
            _ => self.record.content_type.as_deref(),
        };
        kind.matches(content_type)
    }
}
