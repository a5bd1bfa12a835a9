use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{
    entity::FileRecord,
    vo::{RecordPatch, UpdateOptions},
};

/// A named collection of file records.
///
/// Point lookups answer `None` for unknown ids; writes answer with the
/// affected-record count the backing store reports.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get the record with `id`, if the store knows it.
    async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<FileRecord>>;

    /// Apply a sparse patch to the record with `id`.
    async fn update(
        &self,
        id: Uuid,
        patch: &RecordPatch,
        options: UpdateOptions,
    ) -> anyhow::Result<u64>;

    /// Remove the record with `id`.
    async fn remove(&self, id: Uuid) -> anyhow::Result<u64>;
}
