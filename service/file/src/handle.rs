use std::sync::{Arc, Weak};

use domain_file::{
    exception::{FileException, FileResult},
    model::{
        entity::{CopyInfo, CopyRegistry, FileRecord},
        vo::{AttachSource, MediaKind, Payload, RecordPatch, SyncContext, UpdateOptions},
    },
    repository::RecordStore,
    service::UploadTransportService,
};
use typed_builder::TypedBuilder;

use crate::{attachment::AttachmentResolver, synchronizer::RecordSynchronizer};

/// Local, possibly-stale working object for one file.
///
/// The handle owns the last-known record fields plus an optional payload
/// and goes through its collaborators for anything authoritative. Methods
/// that answer derived state refresh first, so answers reflect the newest
/// reachable snapshot. Handles are single-owner: methods take `&mut self`
/// and sequencing concurrent use of one handle is the caller's business.
#[derive(TypedBuilder)]
pub struct FileHandle {
    #[builder(default)]
    record: FileRecord,
    /// Attached data waiting to be uploaded, if any.
    #[builder(default)]
    payload: Option<Payload>,
    /// Set when the store's own read path produced this handle, which is
    /// what licenses trusting an active reactive subscription.
    #[builder(default = false)]
    created_by_transform: bool,
    synchronizer: RecordSynchronizer,
    attachment: AttachmentResolver,
    transport: Arc<dyn UploadTransportService>,
    /// Derived from `collection` and revalidated on use, never owned.
    #[builder(default, setter(skip))]
    bound_store: Option<Weak<dyn RecordStore>>,
}

impl FileHandle {
    /// Pull the freshest reachable snapshot into this handle.
    ///
    /// Returns the pulled snapshot; unmounted handles and unknown ids get
    /// an empty one and keep their local fields.
    pub async fn refresh(&mut self, ctx: SyncContext) -> FileResult<FileRecord> {
        let snapshot = self
            .synchronizer
            .refresh(&mut self.record, self.created_by_transform, ctx)
            .await?;
        self.bound_store =
            self.synchronizer.resolve_store(&self.record).map(|store| Arc::downgrade(&store));
        Ok(snapshot)
    }

    /// Whether this handle has an id and a resolvable backing store.
    pub fn is_mounted(&self) -> bool {
        self.record.id.is_some() && self.synchronizer.resolve_store(&self.record).is_some()
    }

    /// Rounded percentage of uploaded chunks; non-finite when the handle
    /// has no usable chunk counters.
    pub async fn upload_progress(&mut self, ctx: SyncContext) -> FileResult<f64> {
        self.refresh(ctx).await?;
        Ok(self.record.upload_progress())
    }

    /// Whether every expected chunk has arrived.
    pub async fn is_uploaded(&mut self, ctx: SyncContext) -> FileResult<bool> {
        self.refresh(ctx).await?;
        Ok(self.record.is_upload_complete())
    }

    /// Lower-cased extension of the current name; empty when unknown.
    pub async fn extension(&mut self, ctx: SyncContext) -> FileResult<String> {
        self.refresh(ctx).await?;
        Ok(self.record.extension())
    }

    /// Whether `store` holds a materialized copy, with `optimistic` as the
    /// answer while no copy data exists at all.
    pub async fn has_copy(
        &mut self,
        store: &str,
        optimistic: bool,
        ctx: SyncContext,
    ) -> FileResult<bool> {
        self.refresh(ctx).await?;
        Ok(CopyRegistry::of(&self.record).has(store, optimistic))
    }

    /// Copy info for `store`; `None` when nothing is published there.
    pub async fn copy_info(
        &mut self,
        store: &str,
        ctx: SyncContext,
    ) -> FileResult<Option<CopyInfo>> {
        self.refresh(ctx).await?;
        Ok(CopyRegistry::of(&self.record).info(store).cloned())
    }

    pub async fn is_image(&mut self, store: Option<&str>, ctx: SyncContext) -> FileResult<bool> {
        self.media_matches(MediaKind::Image, store, ctx).await
    }

    pub async fn is_video(&mut self, store: Option<&str>, ctx: SyncContext) -> FileResult<bool> {
        self.media_matches(MediaKind::Video, store, ctx).await
    }

    pub async fn is_audio(&mut self, store: Option<&str>, ctx: SyncContext) -> FileResult<bool> {
        self.media_matches(MediaKind::Audio, store, ctx).await
    }

    async fn media_matches(
        &mut self,
        kind: MediaKind,
        store: Option<&str>,
        ctx: SyncContext,
    ) -> FileResult<bool> {
        self.refresh(ctx).await?;
        Ok(CopyRegistry::of(&self.record).media_matches(kind, store))
    }

    /// Normalize `source` and take it as this handle's payload.
    ///
    /// On success the record's type follows the payload's resolved type and
    /// any name, size or modification time the source carried is taken
    /// over. On failure the handle is left untouched.
    pub async fn attach_data(
        &mut self,
        source: AttachSource,
        explicit_type: Option<&str>,
    ) -> FileResult<()> {
        let resolved = self.attachment.resolve(source, explicit_type).await?;

        if let Some(name) = resolved.name {
            self.record.name = Some(name);
        }
        if let Some(size) = resolved.size {
            self.record.size = Some(size);
        }
        if let Some(modified_at) = resolved.modified_at {
            self.record.updated_at = Some(modified_at);
        }
        self.record.content_type = resolved.payload.content_type.clone();
        self.payload = Some(resolved.payload);
        Ok(())
    }

    /// Write a sparse patch through to the backing store.
    ///
    /// Requires a mounted handle. In a [`SyncContext::Manual`] context the
    /// store does not propagate the write back by itself, so the handle
    /// re-pulls afterwards. The pull is best effort: once the write landed
    /// the affected-record count is answered even when the pull fails.
    pub async fn update(
        &mut self,
        patch: RecordPatch,
        options: UpdateOptions,
        ctx: SyncContext,
    ) -> FileResult<u64> {
        let Some(id) = self.record.id else {
            return Err(FileException::NotMounted);
        };
        let Some(store) = self.store() else {
            return Err(FileException::NotMounted);
        };

        let affected = store.update(id, &patch, options).await?;
        if !ctx.is_reactive() {
            // The write landed; a failed pull must not mask the count.
            self.refresh(ctx).await.ok();
        }
        Ok(affected)
    }

    /// Remove the file: staged chunks first, then the record.
    ///
    /// Requires a mounted handle. Afterwards the handle is detached: id,
    /// collection and payload are cleared, while descriptive fields stay
    /// for inspection. Answers with the store's removed-record count.
    pub async fn remove(&mut self) -> FileResult<u64> {
        let Some(id) = self.record.id else {
            return Err(FileException::NotMounted);
        };
        let Some(store) = self.store() else {
            return Err(FileException::NotMounted);
        };

        // Staged chunk data would leak if the record vanished first.
        self.transport.discard_staged_chunks(id).await?;
        let removed = store.remove(id).await?;

        self.record.id = None;
        self.record.collection = None;
        self.payload = None;
        self.bound_store = None;
        Ok(removed)
    }

    /// Absorb a snapshot, e.g. from a store read path or a mounting
    /// collaborator stamping id and collection.
    pub fn merge_record(&mut self, snapshot: &FileRecord) {
        self.record.merge(snapshot);
    }

    /// Last-known record fields, as refreshed.
    pub fn record(&self) -> &FileRecord {
        &self.record
    }

    /// Attached payload, when data has been attached and not yet dropped.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn created_by_transform(&self) -> bool {
        self.created_by_transform
    }

    /// The backing store, resolved through the registry. The registry is
    /// authoritative: the cached binding is reused only while it matches
    /// the current registration, so an unmount or remount is visible to
    /// write paths without an intervening refresh.
    fn store(&mut self) -> Option<Arc<dyn RecordStore>> {
        let resolved = self.synchronizer.resolve_store(&self.record);
        let cached = self.bound_store.as_ref().and_then(Weak::upgrade);
        match (resolved, cached) {
            (Some(resolved), Some(cached)) if Arc::ptr_eq(&resolved, &cached) => Some(cached),
            (resolved, _) => {
                self.bound_store = resolved.as_ref().map(Arc::downgrade);
                resolved
            }
        }
    }
}
