use std::sync::Arc;

use domain_file::{
    exception::FileResult,
    model::{entity::FileRecord, vo::SyncContext},
    repository::{RecordStore, StoreRegistry},
};
use typed_builder::TypedBuilder;

/// Keeps a handle's local record in step with its authoritative store.
///
/// Refreshing is read-then-merge. Two back-to-back refreshes may observe an
/// intervening write and land on the newer snapshot; that last-snapshot-wins
/// outcome is the intended behavior, not a race to guard against.
#[derive(TypedBuilder, Clone)]
pub struct RecordSynchronizer {
    registry: Arc<StoreRegistry>,
}

impl RecordSynchronizer {
    /// Pull a fresh snapshot for `record` and merge it in.
    ///
    /// Store-produced handles inside an active reactive subscription are
    /// already current, so that combination answers from local fields
    /// without touching the store. An unresolvable store or an unknown id
    /// is a normal state answered with an empty snapshot, never an error.
    pub async fn refresh(
        &self,
        record: &mut FileRecord,
        created_by_transform: bool,
        ctx: SyncContext,
    ) -> FileResult<FileRecord> {
        if created_by_transform && ctx.is_reactive() {
            return Ok(record.clone());
        }

        let (Some(store), Some(id)) = (self.resolve_store(record), record.id) else {
            return Ok(FileRecord::default());
        };

        match store.find_one(id).await? {
            Some(snapshot) => {
                record.merge(&snapshot);
                Ok(snapshot)
            }
            None => Ok(FileRecord::default()),
        }
    }

    /// Resolve the record's backing store through the registry.
    pub fn resolve_store(&self, record: &FileRecord) -> Option<Arc<dyn RecordStore>> {
        record.collection.as_deref().and_then(|name| self.registry.resolve(name))
    }
}
