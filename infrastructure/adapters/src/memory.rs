use async_trait::async_trait;
use dashmap::DashMap;
use domain_file::{
    model::{
        entity::FileRecord,
        vo::{RecordPatch, UpdateOptions},
    },
    repository::RecordStore,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// In-memory record store, the reference mounting collaborator.
///
/// Keeps whole records under their id and stamps inserted records with an
/// id and this store's collection name.
#[derive(TypedBuilder)]
pub struct MemoryRecordStore {
    #[builder(setter(into))]
    collection: String,
    #[builder(default)]
    records: DashMap<Uuid, FileRecord>,
}

impl MemoryRecordStore {
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Mount a record: assign an id unless it brings one, stamp the
    /// collection name, keep it. Answers the stamped record.
    pub fn insert(&self, mut record: FileRecord) -> FileRecord {
        let id = record.id.unwrap_or_else(Uuid::new_v4);
        record.id = Some(id);
        record.collection = Some(self.collection.clone());
        self.records.insert(id, record.clone());
        record
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn apply_patch(record: &mut FileRecord, patch: &RecordPatch) {
    if let Some(name) = &patch.name {
        record.name = Some(name.clone());
    }
    if patch.size.is_some() {
        record.size = patch.size;
    }
    if let Some(content_type) = &patch.content_type {
        record.content_type = Some(content_type.clone());
    }
    if patch.updated_at.is_some() {
        record.updated_at = patch.updated_at;
    }
    if patch.chunk_count.is_some() {
        record.chunk_count = patch.chunk_count;
    }
    if patch.chunk_sum.is_some() {
        record.chunk_sum = patch.chunk_sum;
    }
    // Copies are upserted per storage target, not replaced wholesale.
    for (store, info) in &patch.copies {
        record.copies.insert(store.clone(), info.clone());
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<FileRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &RecordPatch,
        options: UpdateOptions,
    ) -> anyhow::Result<u64> {
        if let Some(mut entry) = self.records.get_mut(&id) {
            apply_patch(entry.value_mut(), patch);
            return Ok(1);
        }
        if options.upsert {
            let mut record = FileRecord {
                id: Some(id),
                collection: Some(self.collection.clone()),
                ..Default::default()
            };
            apply_patch(&mut record, patch);
            self.records.insert(id, record);
            return Ok(1);
        }
        Ok(0)
    }

    async fn remove(&self, id: Uuid) -> anyhow::Result<u64> {
        let removed = self.records.remove(&id).map_or(0, |_| 1);
        tracing::debug!("removed {removed} record(s) with id: {id} from {}", self.collection);
        Ok(removed)
    }
}
