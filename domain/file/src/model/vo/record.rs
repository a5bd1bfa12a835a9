use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::entity::CopyInfo;

/// Sparse write against a mounted record.
///
/// Only fields carried as `Some` reach the store; `copies` entries are
/// upserted per storage target name. Identity (`id`, `collection`) is never
/// written through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_sum: Option<u64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub copies: HashMap<String, CopyInfo>,
}

/// Store-level options for an update.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Insert the patch as a fresh record when the id is unknown to the
    /// store.
    pub upsert: bool,
}
